use crate::domain::models::{event::Event, field::FieldDefinition, reservation::Reservation};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait FieldCatalogRepository: Send + Sync {
    /// The full catalog, ordered by `sort_order` ascending.
    async fn list(&self) -> Result<Vec<FieldDefinition>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list_upcoming(&self, from: NaiveDate) -> Result<Vec<Event>, AppError>;
    async fn list_all(&self) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts only while the event still has a free seat; the check and the
    /// insert are atomic at the storage layer. `None` means the event filled
    /// up (or disappeared) between the caller's availability check and the
    /// insert. A code collision surfaces as `AppError::CodeCollision`.
    async fn insert_if_available(&self, reservation: &Reservation) -> Result<Option<Reservation>, AppError>;
    async fn count_active(&self, event_id: &str) -> Result<i64, AppError>;
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Reservation>, AppError>;
    /// Queries into the opaque data blob by a known field key.
    async fn find_active_by_data_field(&self, field_key: &str, value: &str) -> Result<Vec<Reservation>, AppError>;
    async fn list_active_by_event(&self, event_id: &str) -> Result<Vec<Reservation>, AppError>;
    /// `active -> cancelled`, the only allowed transition. Returns rows affected.
    async fn cancel_by_code(&self, code: &str) -> Result<u64, AppError>;
    async fn cancel_all_active(&self, event_id: &str) -> Result<u64, AppError>;
}
