use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CancelReservationRequest, CreateReservationRequest};
use crate::api::dtos::responses::{ConfirmationResponse, EventSummary, ReservationCreatedResponse, ReservationView};
use crate::domain::models::reservation::BookingInput;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("create_reservation: Starting for event {}", payload.event_id);

    let input = BookingInput {
        fields: payload.fields,
        participation_method: payload.participation_method,
    };

    let created = state.booking.submit(&payload.event_id, input).await?;

    Ok(Json(ReservationCreatedResponse {
        reservation_code: created.reservation_code,
    }))
}

/// Confirmation view for an active reservation, looked up by its code.
pub async fn get_confirmation(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_active_by_code(&code).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    let event = state.event_repo.find_by_id(&reservation.event_id).await?
        .ok_or(AppError::Internal)?;

    let active = state.reservation_repo.count_active(&event.id).await?;

    Ok(Json(ConfirmationResponse {
        reservation: ReservationView::from(&reservation),
        event: EventSummary::from_event(&event, active),
    }))
}

pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CancelReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.booking.cancel(&payload.reservation_code).await?;

    Ok(Json(serde_json::json!({
        "status": "cancelled",
        "reservation_code": payload.reservation_code,
    })))
}

/// Self-service lookup of active reservations by a submitted contact value,
/// e.g. `?contact=example@email.com&field=email`.
pub async fn lookup_reservations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let value = params.get("contact")
        .ok_or(AppError::Validation("contact required".into()))?;
    let field_key = params.get("field").map(String::as_str).unwrap_or("contact_info");

    let matches = state.booking.find_by_contact(field_key, value).await?;

    Ok(Json(matches.iter().map(ReservationView::from).collect::<Vec<_>>()))
}
