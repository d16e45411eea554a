//! Error types for record validation

use thiserror::Error;

/// Validation errors.
///
/// Raised locally before any request is built; never sent to the server.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} is required", capitalize(.field))]
    RequiredFieldMissing { field: &'static str },

    #[error("Invalid {field} format")]
    InvalidFormat { field: &'static str },

    #[error("No record selected for {action}")]
    NoPendingTarget { action: &'static str },

    #[error("{}", join_messages(.0))]
    Multiple(Vec<ValidationError>),
}

impl ValidationError {
    /// Flatten into individual issues.
    pub fn issues(&self) -> Vec<&ValidationError> {
        match self {
            ValidationError::Multiple(errors) => errors.iter().flat_map(|e| e.issues()).collect(),
            other => vec![other],
        }
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
