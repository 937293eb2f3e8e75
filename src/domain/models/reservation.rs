use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::domain::models::parse_or_default;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Reservation {
    pub id: String,
    pub event_id: String,
    pub reservation_data: String,
    pub reservation_code: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Raw submission handed to the booking workflow: the dynamic form values
/// plus the optional participation method picked outside the form schema.
pub struct BookingInput {
    pub fields: HashMap<String, String>,
    pub participation_method: Option<String>,
}

impl Reservation {
    pub fn new(event_id: &str, reservation_data: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            reservation_data,
            reservation_code: Self::generate_code(),
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }

    /// 8 characters is short enough to read out over the phone. Uniqueness is
    /// enforced by the store; a collision is regenerated, never reused.
    pub fn generate_code() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect::<String>()
            .to_ascii_uppercase()
    }

    pub fn parsed_data(&self) -> BTreeMap<String, serde_json::Value> {
        parse_or_default(Some(&self.reservation_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_shape() {
        for _ in 0..100 {
            let code = Reservation::generate_code();
            assert_eq!(code.len(), 8);
            assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_new_reservation_is_active() {
        let reservation = Reservation::new("ev1", r#"{"participant_name":"山田 太郎"}"#.to_string());
        assert_eq!(reservation.status, "active");
        assert_eq!(reservation.event_id, "ev1");
        assert_eq!(
            reservation.parsed_data().get("participant_name").and_then(|v| v.as_str()),
            Some("山田 太郎")
        );
    }

    #[test]
    fn test_parsed_data_tolerates_garbage() {
        let mut reservation = Reservation::new("ev1", String::new());
        reservation.reservation_data = "not json".to_string();
        assert!(reservation.parsed_data().is_empty());
    }
}
