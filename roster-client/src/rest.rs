//! REST implementation of [`RecordStore`].

use crate::envelope::{self, Envelope};
use crate::error::{Operation, RemoteError};
use crate::store::RecordStore;
use roster_core::{Record, RecordFields, RecordId};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for a single JSON endpoint that multiplexes the collection on HTTP
/// verbs, addressing individual records with an `id` query parameter.
#[derive(Clone)]
pub struct RestRecordStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestRecordStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, RemoteError> {
        tracing::debug!(%operation, url = %self.base_url, "Sending store request");
        let response = request.send().await.map_err(RemoteError::from_transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(RemoteError::from_transport)?;
        envelope::decode(status, &body)
    }
}

#[async_trait::async_trait]
impl RecordStore for RestRecordStore {
    async fn list(&self) -> Result<Vec<Record>, RemoteError> {
        let request = self.client.get(&self.base_url);
        let envelope: Envelope<Vec<serde_json::Value>> = self.send(Operation::List, request).await?;
        let rows = envelope.into_data(Operation::List)?.unwrap_or_default();
        Ok(envelope::decode_rows(rows))
    }

    async fn create(&self, fields: &RecordFields) -> Result<Record, RemoteError> {
        let request = self.client.post(&self.base_url).json(fields);
        let envelope: Envelope<Record> = self.send(Operation::Create, request).await?;
        envelope.into_required(Operation::Create)
    }

    async fn update(&self, id: &RecordId, fields: &RecordFields) -> Result<Record, RemoteError> {
        let request = self
            .client
            .put(&self.base_url)
            .query(&[("id", id.to_string())])
            .json(fields);
        let envelope: Envelope<Record> = self.send(Operation::Update, request).await?;
        envelope.into_required(Operation::Update)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RemoteError> {
        let request = self
            .client
            .delete(&self.base_url)
            .query(&[("id", id.to_string())]);
        let envelope: Envelope<serde_json::Value> = self.send(Operation::Delete, request).await?;
        envelope.into_data(Operation::Delete)?;
        Ok(())
    }
}
