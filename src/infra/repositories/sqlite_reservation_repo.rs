use crate::domain::{models::reservation::Reservation, ports::ReservationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqliteReservationRepo {
    pool: SqlitePool,
}

impl SqliteReservationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // 2067 = SQLite Unique Constraint; the only unique column here is the
        // reservation code, so the caller may regenerate and retry.
        if db_err.code().as_deref() == Some("2067") {
            return AppError::CodeCollision;
        }
    }
    AppError::Database(e)
}

#[async_trait]
impl ReservationRepository for SqliteReservationRepo {
    async fn insert_if_available(&self, reservation: &Reservation) -> Result<Option<Reservation>, AppError> {
        // Single statement, so the capacity re-check and the insert cannot be
        // interleaved by a concurrent booking.
        sqlx::query_as::<_, Reservation>(
            r#"INSERT INTO reservations (id, event_id, reservation_data, reservation_code, status, created_at)
               SELECT ?, ?, ?, ?, ?, ?
               WHERE (SELECT COUNT(*) FROM reservations WHERE event_id = ? AND status = 'active')
                     < (SELECT capacity FROM events WHERE id = ?)
               RETURNING *"#,
        )
            .bind(&reservation.id)
            .bind(&reservation.event_id)
            .bind(&reservation.reservation_data)
            .bind(&reservation.reservation_code)
            .bind(&reservation.status)
            .bind(reservation.created_at)
            .bind(&reservation.event_id)
            .bind(&reservation.event_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_insert_error)
    }

    async fn count_active(&self, event_id: &str) -> Result<i64, AppError> {
        let result = sqlx::query(
            "SELECT COUNT(*) as count FROM reservations WHERE event_id = ? AND status = 'active'",
        )
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE reservation_code = ? AND status = 'active'",
        )
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_by_data_field(&self, field_key: &str, value: &str) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE status = 'active' AND json_extract(reservation_data, ?) = ? ORDER BY created_at ASC",
        )
            .bind(format!("$.{}", field_key))
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_by_event(&self, event_id: &str) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE event_id = ? AND status = 'active' ORDER BY created_at ASC",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn cancel_by_code(&self, code: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE reservations SET status = 'cancelled' WHERE reservation_code = ? AND status = 'active'",
        )
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }

    async fn cancel_all_active(&self, event_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE reservations SET status = 'cancelled' WHERE event_id = ? AND status = 'active'",
        )
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
