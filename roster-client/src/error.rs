//! Error types for remote store calls.

use std::fmt;

/// The store operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message used when the server rejects a call without saying why.
    pub fn generic_failure(&self) -> &'static str {
        match self {
            Operation::List => "Failed to load records",
            Operation::Create => "Failed to add record",
            Operation::Update => "Failed to update record",
            Operation::Delete => "Failed to delete record",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The server answered with `success: false`.
    #[error("{message}")]
    Rejected { operation: Operation, message: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    /// The endpoint could not be reached or did not answer in time.
    #[error("Network unreachable: {0}")]
    Unreachable(String),
}

impl RemoteError {
    pub fn rejected(operation: Operation, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| operation.generic_failure().to_string());
        Self::Rejected { operation, message }
    }

    /// Classify a reqwest failure, separating "could not reach the endpoint"
    /// from other HTTP errors.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::Unreachable(err.to_string())
        } else {
            Self::Http(err)
        }
    }

    /// Whether the call failed before a response could be read.
    pub fn is_transport(&self) -> bool {
        match self {
            RemoteError::Http(err) => err.is_request(),
            RemoteError::Unreachable(_) => true,
            RemoteError::Rejected { .. } | RemoteError::InvalidResponse(_) => false,
        }
    }
}
