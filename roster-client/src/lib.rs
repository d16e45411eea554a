//! Roster store client.
//!
//! [`RecordStore`] is the seam between the UI controller and the remote
//! endpoint; [`RestRecordStore`] is the reqwest-backed implementation.

pub mod envelope;
pub mod error;
pub mod rest;
pub mod store;

pub use envelope::Envelope;
pub use error::{Operation, RemoteError};
pub use rest::RestRecordStore;
pub use store::RecordStore;
