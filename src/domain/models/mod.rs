pub mod event;
pub mod field;
pub mod reservation;

use serde::de::DeserializeOwned;

/// Decodes an opaque JSON text column. Stored blobs are display-path data:
/// a malformed or absent blob yields the type's empty default, never an error.
pub fn parse_or_default<T: DeserializeOwned + Default>(raw: Option<&str>) -> T {
    raw.and_then(|s| serde_json::from_str(s).ok()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default_tolerates_garbage() {
        let parsed: Vec<String> = parse_or_default(Some(r#"["a", "b"]"#));
        assert_eq!(parsed, vec!["a".to_string(), "b".to_string()]);

        let garbage: Vec<String> = parse_or_default(Some("not json {"));
        assert!(garbage.is_empty());

        let absent: Vec<String> = parse_or_default(None);
        assert!(absent.is_empty());
    }
}
