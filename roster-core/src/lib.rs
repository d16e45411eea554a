//! Roster Core - Record Types
//!
//! Data types shared by the store client and the terminal UI, plus the
//! validation rules applied to form input before it is sent anywhere.

pub mod error;
pub mod validation;

pub use error::ValidationError;
pub use validation::{is_valid_email, is_valid_phone, validate_fields};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

// ============================================================================
// IDENTITY
// ============================================================================

/// Server-assigned record identifier.
///
/// The remote store hands out either numeric or textual ids. The client never
/// interprets them; they are displayed and sent back verbatim. Numbers that do
/// not fit an `i64` keep their JSON text, and a null or missing id decodes as
/// empty text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Text(String::new())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(n) => RecordId::Number(n),
                None => RecordId::Text(n.to_string()),
            },
            serde_json::Value::String(s) => RecordId::Text(s),
            serde_json::Value::Null => RecordId::default(),
            other => RecordId::Text(other.to_string()),
        })
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Number(i64::from(value))
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// One contact-like entry as returned by the remote store.
///
/// Text fields are decoded leniently: spreadsheet-backed stores routinely
/// return phone numbers as JSON numbers and leave cells null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_required_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_required_text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: None,
            created_at: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Editable fields of this record, as they would be pre-filled into a form.
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone().unwrap_or_default(),
        }
    }

    /// Short human label used by the delete confirmation.
    pub fn summary(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }
}

/// Request body for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl RecordFields {
    /// Build fields from raw form input, trimming every value.
    pub fn from_input(name: &str, email: &str, phone: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
        }
    }

    /// Copy with every value trimmed.
    pub fn trimmed(&self) -> Self {
        Self::from_input(&self.name, &self.email, &self.phone)
    }
}

/// Parse a server timestamp. Accepts RFC 3339 and a plain
/// `YYYY-MM-DD HH:MM:SS` (interpreted as UTC).
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn lenient_required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_untagged_number_and_text() {
        let n: RecordId = serde_json::from_str("7").unwrap();
        let s: RecordId = serde_json::from_str("\"rec-7\"").unwrap();
        assert_eq!(n, RecordId::Number(7));
        assert_eq!(s, RecordId::Text("rec-7".to_string()));
        assert_eq!(n.to_string(), "7");
        assert_eq!(s.to_string(), "rec-7");
    }

    #[test]
    fn test_record_id_tolerates_odd_values() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[2.5, 18446744073709551615, null, true]"#).unwrap();
        assert_eq!(ids[0], RecordId::Text("2.5".to_string()));
        assert_eq!(ids[1].to_string(), "18446744073709551615");
        assert_eq!(ids[2], RecordId::Text(String::new()));
        assert_eq!(ids[3].to_string(), "true");

        let record: Record = serde_json::from_str(r#"{"name":"A","email":"a@x.com"}"#).unwrap();
        assert_eq!(record.id, RecordId::default());
    }

    #[test]
    fn test_record_missing_optional_fields() {
        let record: Record =
            serde_json::from_str(r#"{"id":1,"name":"A","email":"a@x.com"}"#).unwrap();
        assert_eq!(record, Record::new(1, "A", "a@x.com"));
        assert!(record.phone.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_record_numeric_phone_and_null_cells() {
        let record: Record = serde_json::from_str(
            r#"{"id":"x","name":null,"email":"b@x.com","phone":5551234,"created_at":null}"#,
        )
        .unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.phone.as_deref(), Some("5551234"));
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_fields_from_input_trims() {
        let fields = RecordFields::from_input("  Ann ", "ann@x.com\n", " ");
        assert_eq!(fields.name, "Ann");
        assert_eq!(fields.email, "ann@x.com");
        assert_eq!(fields.phone, "");
    }

    #[test]
    fn test_record_fields_prefill() {
        let record = Record::new(3, "Bo", "bo@x.com").with_phone("123");
        let fields = record.fields();
        assert_eq!(fields.phone, "123");
        assert_eq!(record.summary(), "Bo (bo@x.com)");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-03-01T10:20:30Z").is_some());
        assert!(parse_timestamp("2024-03-01T10:20:30.123+02:00").is_some());
        assert!(parse_timestamp("2024-03-01 10:20:30").is_some());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_fields_serialize_shape() {
        let fields = RecordFields::from_input("A", "a@x.com", "");
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json, serde_json::json!({"name":"A","email":"a@x.com","phone":""}));
    }
}
