//! Roster Test Utilities
//!
//! Shared test infrastructure for the roster workspace:
//! - An in-memory [`MockRecordStore`] that journals every call
//! - Fixtures for common record sets
//! - Proptest generators for records and form input

pub use roster_client::{Operation, RecordStore, RemoteError};
pub use roster_core::{Record, RecordFields, RecordId};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// ============================================================================
// MOCK STORE
// ============================================================================

/// One call observed by [`MockRecordStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Create(RecordFields),
    Update(RecordId, RecordFields),
    Delete(RecordId),
}

impl StoreCall {
    pub fn operation(&self) -> Operation {
        match self {
            StoreCall::List => Operation::List,
            StoreCall::Create(_) => Operation::Create,
            StoreCall::Update(..) => Operation::Update,
            StoreCall::Delete(_) => Operation::Delete,
        }
    }
}

/// Failure to inject into the next matching call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    /// Server answers `success: false` with an optional message.
    Rejected(Option<String>),
    /// Network is down.
    Unreachable,
}

impl MockFailure {
    fn into_error(self, operation: Operation) -> RemoteError {
        match self {
            MockFailure::Rejected(message) => RemoteError::rejected(operation, message),
            MockFailure::Unreachable => RemoteError::Unreachable("mock network down".to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    records: Vec<Record>,
    next_id: i64,
    calls: Vec<StoreCall>,
    failures: VecDeque<(Operation, MockFailure)>,
    offline: bool,
}

/// In-memory record store for controller tests.
///
/// Clones share state, so a test can keep a handle while the controller owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MockRecordStore {
    state: Arc<Mutex<MockState>>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store; new ids continue after the largest numeric id.
    pub fn with_records(records: Vec<Record>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| match r.id {
                RecordId::Number(n) => Some(n),
                RecordId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        let store = Self::new();
        {
            let mut state = store.state.lock().unwrap();
            state.records = records;
            state.next_id = next_id;
        }
        store
    }

    /// Fail the next call of `operation`.
    pub fn fail_next(&self, operation: Operation, failure: MockFailure) {
        self.state
            .lock()
            .unwrap()
            .failures
            .push_back((operation, failure));
    }

    /// Make every call fail at transport level until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub fn records(&self) -> Vec<Record> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn count_of(&self, operation: Operation) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.operation() == operation)
            .count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    fn begin(&self, call: StoreCall) -> Result<(), RemoteError> {
        let mut state = self.state.lock().unwrap();
        let operation = call.operation();
        state.calls.push(call);
        if state.offline {
            return Err(MockFailure::Unreachable.into_error(operation));
        }
        if let Some(pos) = state.failures.iter().position(|(op, _)| *op == operation) {
            if let Some((_, failure)) = state.failures.remove(pos) {
                return Err(failure.into_error(operation));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn list(&self) -> Result<Vec<Record>, RemoteError> {
        self.begin(StoreCall::List)?;
        Ok(self.records())
    }

    async fn create(&self, fields: &RecordFields) -> Result<Record, RemoteError> {
        self.begin(StoreCall::Create(fields.clone()))?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let record = Record {
            id: RecordId::Number(state.next_id),
            name: fields.name.clone(),
            email: fields.email.clone(),
            phone: Some(fields.phone.clone()).filter(|p| !p.is_empty()),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &RecordId, fields: &RecordFields) -> Result<Record, RemoteError> {
        self.begin(StoreCall::Update(id.clone(), fields.clone()))?;
        let mut state = self.state.lock().unwrap();
        let record = state
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| RemoteError::rejected(Operation::Update, Some("Record not found".to_string())))?;
        record.name = fields.name.clone();
        record.email = fields.email.clone();
        record.phone = Some(fields.phone.clone()).filter(|p| !p.is_empty());
        Ok(record.clone())
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RemoteError> {
        self.begin(StoreCall::Delete(id.clone()))?;
        let mut state = self.state.lock().unwrap();
        let before = state.records.len();
        state.records.retain(|r| &r.id != id);
        if state.records.len() == before {
            return Err(RemoteError::rejected(
                Operation::Delete,
                Some("Record not found".to_string()),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Three records with mixed id kinds and optional fields.
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new(1, "Ada Lovelace", "ada@example.com")
            .with_phone("+44 20 7946 0958")
            .with_created_at("2024-01-15T09:30:00Z"),
        Record::new(2, "Grace Hopper", "grace@example.com").with_created_at("2024-02-01T12:00:00Z"),
        Record::new("legacy-7", "Alan Turing", "alan@example.com"),
    ]
}

pub fn valid_fields() -> RecordFields {
    RecordFields::from_input("Katherine Johnson", "kj@example.com", "555-0100")
}

// ============================================================================
// GENERATORS
// ============================================================================

pub mod generators {
    use super::*;
    use proptest::prelude::*;

    pub fn arb_record_id() -> impl Strategy<Value = RecordId> {
        prop_oneof![
            (1i64..100_000).prop_map(RecordId::Number),
            "[a-z0-9-]{1,12}".prop_map(RecordId::Text),
        ]
    }

    pub fn arb_record() -> impl Strategy<Value = Record> {
        (
            arb_record_id(),
            "[A-Za-z][A-Za-z ]{0,24}",
            "[a-z0-9.]{1,10}@[a-z]{1,10}\\.(com|org|net)",
            proptest::option::of("\\+?[1-9][0-9]{4,11}"),
        )
            .prop_map(|(id, name, email, phone)| Record {
                id,
                name,
                email,
                phone,
                created_at: None,
            })
    }

    /// Records with distinct ids, in the order a server would return them.
    pub fn arb_records(max: usize) -> impl Strategy<Value = Vec<Record>> {
        proptest::collection::vec(arb_record(), 0..=max).prop_map(|records| {
            let mut seen = std::collections::HashSet::new();
            records
                .into_iter()
                .filter(|r| seen.insert(r.id.clone()))
                .collect()
        })
    }

    pub fn arb_valid_fields() -> impl Strategy<Value = RecordFields> {
        (
            "[A-Za-z][A-Za-z ]{0,24}",
            "[a-z0-9]{1,10}@[a-z]{1,10}\\.com",
            prop_oneof![Just(String::new()), "[1-9][0-9]{6,10}"],
        )
            .prop_map(|(name, email, phone)| RecordFields::from_input(&name, &email, &phone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_crud_cycle() {
        let store = MockRecordStore::with_records(sample_records());
        let created = store.create(&valid_fields()).await.unwrap();
        assert_eq!(created.id, RecordId::Number(3));
        store
            .update(&created.id, &RecordFields::from_input("K", "k@example.com", ""))
            .await
            .unwrap();
        store.delete(&RecordId::from("legacy-7")).await.unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[2].name, "K");
        assert_eq!(store.call_count(), 4);
    }

    #[tokio::test]
    async fn test_injected_failure_applies_once() {
        let store = MockRecordStore::new();
        store.fail_next(Operation::List, MockFailure::Rejected(None));
        assert!(store.list().await.is_err());
        assert!(store.list().await.is_ok());
        assert_eq!(store.count_of(Operation::List), 2);
    }

    #[tokio::test]
    async fn test_offline_is_transport_failure() {
        let store = MockRecordStore::new();
        store.set_offline(true);
        let err = store.list().await.unwrap_err();
        assert!(err.is_transport());
    }
}
