use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

use crate::domain::models::parse_or_default;

/// Per-event form configuration: a mapping from catalog field key to an entry
/// object (`{"required": true}`). Entries with anything other than a boolean
/// `required` flag count as optional.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct FormSchema(pub BTreeMap<String, serde_json::Value>);

impl FormSchema {
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_required(&self, key: &str) -> bool {
        self.0
            .get(key)
            .and_then(|entry| entry.get("required"))
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn required_keys(&self) -> Vec<String> {
        self.0
            .keys()
            .filter(|key| self.is_required(key))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub capacity: i32,
    pub event_type: String,
    pub venue: Option<String>,
    pub online_url: Option<String>,
    pub participation_options: Option<String>,
    pub form_fields: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn form_schema(&self) -> FormSchema {
        parse_or_default(self.form_fields.as_deref())
    }

    pub fn parsed_options(&self) -> Vec<String> {
        parse_or_default(self.participation_options.as_deref())
    }

    pub fn formatted_date(&self) -> String {
        self.date.format("%Y年%m月%d日").to_string()
    }
}
