use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of an event's form configuration as submitted by the admin UI.
#[derive(Serialize, Deserialize)]
pub struct FieldToggle {
    #[serde(default)]
    pub required: bool,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub capacity: Option<i32>,
    pub event_type: Option<String>,
    pub venue: Option<String>,
    pub online_url: Option<String>,
    pub participation_options: Option<Vec<String>>,
    pub form_fields: Option<HashMap<String, FieldToggle>>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub capacity: Option<i32>,
    pub event_type: Option<String>,
    pub venue: Option<String>,
    pub online_url: Option<String>,
    pub participation_options: Option<Vec<String>>,
    pub form_fields: Option<HashMap<String, FieldToggle>>,
}

/// The dynamic form post: everything that is not one of the named members is
/// a form-field value keyed by its catalog key.
#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub event_id: String,
    pub participation_method: Option<String>,
    #[serde(flatten)]
    pub fields: HashMap<String, String>,
}

#[derive(Deserialize)]
pub struct CancelReservationRequest {
    pub reservation_code: String,
}
