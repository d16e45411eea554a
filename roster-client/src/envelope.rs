//! Response envelope shared by every endpoint verb.

use crate::error::{Operation, RemoteError};
use roster_core::Record;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// `{ success, data?, error? }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Payload of a successful response, which may legitimately be absent.
    pub fn into_data(self, operation: Operation) -> Result<Option<T>, RemoteError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(RemoteError::rejected(operation, self.error))
        }
    }

    /// Payload of a successful response that must carry data.
    pub fn into_required(self, operation: Operation) -> Result<T, RemoteError> {
        self.into_data(operation)?
            .ok_or_else(|| RemoteError::InvalidResponse("response missing data".to_string()))
    }
}

/// Decode a response body into an envelope.
///
/// The body is decoded whatever the HTTP status: script-hosted endpoints
/// report failures in the envelope rather than the status line.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<Envelope<T>, RemoteError> {
    serde_json::from_str::<Envelope<T>>(body).map_err(|err| {
        tracing::warn!(status, error = %err, "Undecodable response body");
        RemoteError::InvalidResponse(format!("HTTP {}: {}", status, truncate(body, 200)))
    })
}

/// Decode list rows one by one. A row that is not a record object is skipped
/// so one bad row cannot take the rest of the collection with it.
pub fn decode_rows(rows: Vec<serde_json::Value>) -> Vec<Record> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<Record>(row) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping undecodable record");
                None
            }
        })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}
