pub mod sqlite_event_repo;
pub mod sqlite_field_catalog_repo;
pub mod sqlite_reservation_repo;

pub mod postgres_event_repo;
pub mod postgres_field_catalog_repo;
pub mod postgres_reservation_repo;
