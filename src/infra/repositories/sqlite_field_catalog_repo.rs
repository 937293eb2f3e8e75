use crate::domain::{models::field::FieldDefinition, ports::FieldCatalogRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteFieldCatalogRepo {
    pool: SqlitePool,
}

impl SqliteFieldCatalogRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FieldCatalogRepository for SqliteFieldCatalogRepo {
    async fn list(&self) -> Result<Vec<FieldDefinition>, AppError> {
        sqlx::query_as::<_, FieldDefinition>(
            "SELECT * FROM form_field_definitions ORDER BY sort_order ASC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
