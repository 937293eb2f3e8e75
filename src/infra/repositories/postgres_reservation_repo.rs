use crate::domain::{models::reservation::Reservation, ports::ReservationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresReservationRepo {
    pool: PgPool,
}

impl PostgresReservationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // 23505 = PostgreSQL Unique Violation; the only unique column here is
        // the reservation code, so the caller may regenerate and retry.
        if db_err.code().as_deref() == Some("23505") {
            return AppError::CodeCollision;
        }
    }
    AppError::Database(e)
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepo {
    async fn insert_if_available(&self, reservation: &Reservation) -> Result<Option<Reservation>, AppError> {
        // Row-lock the event so concurrent bookings near the last seat
        // serialize on the capacity re-check.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let capacity: Option<i32> = sqlx::query("SELECT capacity FROM events WHERE id = $1 FOR UPDATE")
            .bind(&reservation.event_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .map(|row| row.get("capacity"));

        let Some(capacity) = capacity else {
            return Ok(None);
        };

        let active: i64 = sqlx::query(
            "SELECT COUNT(*) as count FROM reservations WHERE event_id = $1 AND status = 'active'",
        )
            .bind(&reservation.event_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .get("count");

        if active >= capacity as i64 {
            return Ok(None);
        }

        let created = sqlx::query_as::<_, Reservation>(
            r#"INSERT INTO reservations (id, event_id, reservation_data, reservation_code, status, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#,
        )
            .bind(&reservation.id)
            .bind(&reservation.event_id)
            .bind(&reservation.reservation_data)
            .bind(&reservation.reservation_code)
            .bind(&reservation.status)
            .bind(reservation.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_insert_error)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(Some(created))
    }

    async fn count_active(&self, event_id: &str) -> Result<i64, AppError> {
        let result = sqlx::query(
            "SELECT COUNT(*) as count FROM reservations WHERE event_id = $1 AND status = 'active'",
        )
            .bind(event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.get::<i64, _>("count"))
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE reservation_code = $1 AND status = 'active'",
        )
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_by_data_field(&self, field_key: &str, value: &str) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE status = 'active' AND reservation_data::jsonb ->> $1 = $2 ORDER BY created_at ASC",
        )
            .bind(field_key)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_active_by_event(&self, event_id: &str) -> Result<Vec<Reservation>, AppError> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE event_id = $1 AND status = 'active' ORDER BY created_at ASC",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn cancel_by_code(&self, code: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE reservations SET status = 'cancelled' WHERE reservation_code = $1 AND status = 'active'",
        )
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }

    async fn cancel_all_active(&self, event_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE reservations SET status = 'cancelled' WHERE event_id = $1 AND status = 'active'",
        )
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected())
    }
}
