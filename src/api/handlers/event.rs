use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dtos::responses::{ActiveFieldResponse, EventDetailResponse, EventSummary};
use crate::domain::services::form_schema::fields_for_event;
use crate::error::AppError;
use crate::state::AppState;

/// Upcoming events with freshly computed availability.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_upcoming(Utc::now().date_naive()).await?;

    let mut out = Vec::with_capacity(events.len());
    for event in &events {
        let active = state.reservation_repo.count_active(&event.id).await?;
        out.push(EventSummary::from_event(event, active));
    }

    Ok(Json(out))
}

/// Event detail for the registration form: availability plus the active form
/// fields resolved against the catalog.
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let active = state.reservation_repo.count_active(&event.id).await?;
    let catalog = state.catalog_repo.list().await?;
    let fields = fields_for_event(&catalog, &event.form_schema());

    Ok(Json(EventDetailResponse {
        event: EventSummary::from_event(&event, active),
        form_fields: fields.iter().map(ActiveFieldResponse::from).collect(),
    }))
}
