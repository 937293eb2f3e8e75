use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::{NaiveTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::api::dtos::requests::{CreateEventRequest, FieldToggle, UpdateEventRequest};
use crate::api::dtos::responses::{AdminEventDetailResponse, EventSummary, ReservationView};
use crate::domain::models::event::Event;
use crate::error::AppError;
use crate::state::AppState;

fn encode_options(options: Option<Vec<String>>) -> Option<String> {
    let options: Vec<String> = options?
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if options.is_empty() {
        return None;
    }
    Some(serde_json::Value::from(options).to_string())
}

fn encode_form_fields(fields: Option<HashMap<String, FieldToggle>>) -> Result<Option<String>, AppError> {
    match fields {
        Some(map) => serde_json::to_string(&map)
            .map(Some)
            .map_err(|_| AppError::Validation("Invalid form fields".into())),
        None => Ok(None),
    }
}

fn validate_time(time: &str) -> Result<(), AppError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating event: {}", payload.title);

    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    validate_time(&payload.time)?;

    let capacity = payload.capacity.unwrap_or(5);
    if capacity <= 0 {
        return Err(AppError::Validation("Capacity must be positive".into()));
    }

    let now = Utc::now();
    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: payload.title,
        description: payload.description.unwrap_or_default(),
        date: payload.date,
        time: payload.time,
        capacity,
        event_type: payload.event_type.unwrap_or_else(|| "business".to_string()),
        venue: payload.venue,
        online_url: payload.online_url,
        participation_options: encode_options(payload.participation_options),
        form_fields: encode_form_fields(payload.form_fields)?,
        created_at: now,
        updated_at: now,
    };

    let created = state.event_repo.create(&event).await?;
    Ok(Json(created))
}

/// Every event, past ones included, newest first.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list_all().await?;

    let mut out = Vec::with_capacity(events.len());
    for event in &events {
        let active = state.reservation_repo.count_active(&event.id).await?;
        out.push(EventSummary::from_event(event, active));
    }

    Ok(Json(out))
}

/// Event detail with its active registrants.
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let reservations = state.reservation_repo.list_active_by_event(&event.id).await?;

    Ok(Json(AdminEventDetailResponse {
        event: EventSummary::from_event(&event, reservations.len() as i64),
        reservations: reservations.iter().map(ReservationView::from).collect(),
    }))
}

/// Edits overwrite in place; events are never versioned. Stored reservations
/// keep the data shape they were submitted with.
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(val) = payload.title { event.title = val; }
    if let Some(val) = payload.description { event.description = val; }
    if let Some(val) = payload.date { event.date = val; }
    if let Some(val) = payload.time {
        validate_time(&val)?;
        event.time = val;
    }
    if let Some(val) = payload.capacity {
        if val <= 0 {
            return Err(AppError::Validation("Capacity must be positive".into()));
        }
        event.capacity = val;
    }
    if let Some(val) = payload.event_type { event.event_type = val; }
    if let Some(val) = payload.venue { event.venue = Some(val); }
    if let Some(val) = payload.online_url { event.online_url = Some(val); }
    if payload.participation_options.is_some() {
        event.participation_options = encode_options(payload.participation_options);
    }
    if payload.form_fields.is_some() {
        event.form_fields = encode_form_fields(payload.form_fields)?;
    }
    event.updated_at = Utc::now();

    let updated = state.event_repo.update(&event).await?;
    info!("Event updated: {}", updated.id);
    Ok(Json(updated))
}

/// Cancels every active reservation before removing the event itself.
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state.booking.delete_event(&event_id).await?;

    Ok(Json(serde_json::json!({
        "status": "deleted",
        "cancelled_reservations": cancelled,
    })))
}
