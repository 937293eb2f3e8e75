use crate::domain::{models::field::FieldDefinition, ports::FieldCatalogRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresFieldCatalogRepo {
    pool: PgPool,
}

impl PostgresFieldCatalogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FieldCatalogRepository for PostgresFieldCatalogRepo {
    async fn list(&self) -> Result<Vec<FieldDefinition>, AppError> {
        sqlx::query_as::<_, FieldDefinition>(
            "SELECT * FROM form_field_definitions ORDER BY sort_order ASC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
