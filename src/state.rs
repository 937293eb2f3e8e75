use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{EventRepository, FieldCatalogRepository, ReservationRepository};
use crate::domain::services::booking_service::BookingService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog_repo: Arc<dyn FieldCatalogRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub booking: Arc<BookingService>,
}
