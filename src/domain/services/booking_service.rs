use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::domain::models::reservation::{BookingInput, Reservation};
use crate::domain::ports::{EventRepository, FieldCatalogRepository, ReservationRepository};
use crate::domain::services::availability::is_full;
use crate::error::AppError;

/// How often a fresh code is generated after hitting the unique constraint
/// before the request is given up on.
const MAX_CODE_ATTEMPTS: u32 = 5;

pub struct BookingService {
    events: Arc<dyn EventRepository>,
    reservations: Arc<dyn ReservationRepository>,
    catalog: Arc<dyn FieldCatalogRepository>,
}

impl BookingService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        reservations: Arc<dyn ReservationRepository>,
        catalog: Arc<dyn FieldCatalogRepository>,
    ) -> Self {
        Self { events, reservations, catalog }
    }

    /// The booking workflow. Failure order matters: a missing event reports
    /// `NotFound` before anything else, a full event reports `Full` no matter
    /// how broken the payload is, and validation reports every missing key at
    /// once. The final insert re-checks capacity atomically, so two requests
    /// racing for the last seat cannot both get in.
    pub async fn submit(&self, event_id: &str, input: BookingInput) -> Result<Reservation, AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        let active = self.reservations.count_active(&event.id).await?;
        if is_full(event.capacity, active) {
            return Err(AppError::Full);
        }

        let schema = event.form_schema();

        let missing: Vec<String> = schema
            .required_keys()
            .into_iter()
            .filter(|key| {
                input
                    .fields
                    .get(key)
                    .map(|value| value.trim().is_empty())
                    .unwrap_or(true)
            })
            .collect();
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        let mut data = serde_json::Map::new();
        for key in schema.keys() {
            if let Some(value) = input.fields.get(key) {
                if !value.is_empty() {
                    data.insert(key.clone(), Value::String(value.clone()));
                }
            }
        }
        if let Some(method) = input.participation_method {
            // Appended outside the form schema, only for events that offer
            // participation options.
            if !event.parsed_options().is_empty() {
                data.insert("participation_method".to_string(), Value::String(method));
            }
        }
        let data_json = Value::Object(data).to_string();

        for attempt in 0..MAX_CODE_ATTEMPTS {
            let reservation = Reservation::new(&event.id, data_json.clone());
            match self.reservations.insert_if_available(&reservation).await {
                Ok(Some(created)) => {
                    info!("Reservation confirmed: {} for event {}", created.reservation_code, event.id);
                    return Ok(created);
                }
                Ok(None) => return Err(AppError::Full),
                Err(AppError::CodeCollision) => {
                    warn!("Reservation code collision (attempt {}), regenerating", attempt + 1);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::CodeCollision)
    }

    /// `active -> cancelled`. Whether the code never existed or was already
    /// cancelled is not distinguishable from the outside.
    pub async fn cancel(&self, code: &str) -> Result<(), AppError> {
        let updated = self.reservations.cancel_by_code(code).await?;
        if updated == 0 {
            return Err(AppError::NotFoundOrAlreadyCancelled);
        }
        info!("Reservation cancelled: {}", code);
        Ok(())
    }

    /// Self-service lookup by a value submitted into the data blob, e.g. the
    /// contact field. Only catalog keys are queryable; anything else yields an
    /// empty result rather than an error.
    pub async fn find_by_contact(&self, field_key: &str, value: &str) -> Result<Vec<Reservation>, AppError> {
        let catalog = self.catalog.list().await?;
        if !catalog.iter().any(|def| def.field_key == field_key) {
            return Ok(Vec::new());
        }
        self.reservations.find_active_by_data_field(field_key, value).await
    }

    /// Cancels every active reservation, then removes the event. Cancellation
    /// of already-cancelled reservations is a no-op, so the whole sequence is
    /// safe to retry after a `PartialFailure`.
    pub async fn delete_event(&self, event_id: &str) -> Result<u64, AppError> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        let cancelled = self.reservations.cancel_all_active(event_id).await?;

        if let Err(e) = self.events.delete(event_id).await {
            return Err(AppError::PartialFailure(format!(
                "cancelled {} reservation(s) for event {} but failed to remove the event: {}",
                cancelled, event_id, e
            )));
        }

        info!("Event deleted: {} ({} reservation(s) cancelled)", event_id, cancelled);
        Ok(cancelled)
    }
}
