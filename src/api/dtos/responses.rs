use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::models::{event::Event, field::FieldDefinition, reservation::Reservation};
use crate::domain::services::availability::{is_full, remaining_seats};
use crate::domain::services::form_schema::ActiveField;

#[derive(Serialize)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub formatted_date: String,
    pub time: String,
    pub capacity: i32,
    pub event_type: String,
    pub venue: Option<String>,
    pub online_url: Option<String>,
    pub participation_options: Vec<String>,
    pub reserved_count: i64,
    pub available_count: i64,
    pub full: bool,
}

impl EventSummary {
    pub fn from_event(event: &Event, active_count: i64) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date,
            formatted_date: event.formatted_date(),
            time: event.time.clone(),
            capacity: event.capacity,
            event_type: event.event_type.clone(),
            venue: event.venue.clone(),
            online_url: event.online_url.clone(),
            participation_options: event.parsed_options(),
            reserved_count: active_count,
            available_count: remaining_seats(event.capacity, active_count),
            full: is_full(event.capacity, active_count),
        }
    }
}

#[derive(Serialize)]
pub struct ActiveFieldResponse {
    pub field_key: String,
    pub label: String,
    pub field_type: String,
    pub options: Vec<String>,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub required: bool,
}

impl From<&ActiveField> for ActiveFieldResponse {
    fn from(field: &ActiveField) -> Self {
        Self {
            field_key: field.definition.field_key.clone(),
            label: field.definition.label.clone(),
            field_type: field.definition.field_type.clone(),
            options: field.definition.parsed_options(),
            placeholder: field.definition.placeholder.clone(),
            description: field.definition.description.clone(),
            required: field.required,
        }
    }
}

#[derive(Serialize)]
pub struct FieldDefinitionResponse {
    pub field_key: String,
    pub label: String,
    pub field_type: String,
    pub options: Vec<String>,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub sort_order: i32,
}

impl From<&FieldDefinition> for FieldDefinitionResponse {
    fn from(def: &FieldDefinition) -> Self {
        Self {
            field_key: def.field_key.clone(),
            label: def.label.clone(),
            field_type: def.field_type.clone(),
            options: def.parsed_options(),
            placeholder: def.placeholder.clone(),
            description: def.description.clone(),
            sort_order: def.sort_order,
        }
    }
}

#[derive(Serialize)]
pub struct EventDetailResponse {
    pub event: EventSummary,
    pub form_fields: Vec<ActiveFieldResponse>,
}

#[derive(Serialize)]
pub struct ReservationCreatedResponse {
    pub reservation_code: String,
}

#[derive(Serialize)]
pub struct ReservationView {
    pub reservation_code: String,
    pub event_id: String,
    pub status: String,
    pub data: BTreeMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<&Reservation> for ReservationView {
    fn from(reservation: &Reservation) -> Self {
        Self {
            reservation_code: reservation.reservation_code.clone(),
            event_id: reservation.event_id.clone(),
            status: reservation.status.clone(),
            data: reservation.parsed_data(),
            created_at: reservation.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ConfirmationResponse {
    pub reservation: ReservationView,
    pub event: EventSummary,
}

#[derive(Serialize)]
pub struct AdminEventDetailResponse {
    pub event: EventSummary,
    pub reservations: Vec<ReservationView>,
}
