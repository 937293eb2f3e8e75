use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::models::parse_or_default;

/// A catalog entry describing one known form field. Seeded at provisioning
/// time; `field_key` is unique across the catalog.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct FieldDefinition {
    pub id: i64,
    pub field_key: String,
    pub label: String,
    pub field_type: String,
    pub field_options: Option<String>,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl FieldDefinition {
    /// Select options, present for `select` fields only.
    pub fn parsed_options(&self) -> Vec<String> {
        parse_or_default(self.field_options.as_deref())
    }
}
