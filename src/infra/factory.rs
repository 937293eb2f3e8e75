use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::booking_service::BookingService;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_event_repo::PostgresEventRepo,
    postgres_field_catalog_repo::PostgresFieldCatalogRepo,
    postgres_reservation_repo::PostgresReservationRepo,
    sqlite_event_repo::SqliteEventRepo,
    sqlite_field_catalog_repo::SqliteFieldCatalogRepo,
    sqlite_reservation_repo::SqliteReservationRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let event_repo = Arc::new(PostgresEventRepo::new(pool.clone()));
        let reservation_repo = Arc::new(PostgresReservationRepo::new(pool.clone()));
        let catalog_repo = Arc::new(PostgresFieldCatalogRepo::new(pool.clone()));
        let booking = Arc::new(BookingService::new(
            event_repo.clone(),
            reservation_repo.clone(),
            catalog_repo.clone(),
        ));

        AppState {
            config: config.clone(),
            catalog_repo,
            event_repo,
            reservation_repo,
            booking,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
        let reservation_repo = Arc::new(SqliteReservationRepo::new(pool.clone()));
        let catalog_repo = Arc::new(SqliteFieldCatalogRepo::new(pool.clone()));
        let booking = Arc::new(BookingService::new(
            event_repo.clone(),
            reservation_repo.clone(),
            catalog_repo.clone(),
        ));

        AppState {
            config: config.clone(),
            catalog_repo,
            event_repo,
            reservation_repo,
            booking,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
