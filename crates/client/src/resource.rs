//! Generic CRUD client for a remote resource collection.

use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::Url;

use smartbiz_auth::SessionStore;
use smartbiz_core::{Entity, Operation, RecordId, Resource};
use smartbiz_parties::Suppliers;

use crate::{ClientConfig, ClientError, http};

/// CRUD client for the collection described by `R`.
///
/// The bearer token is read from the session store on every call, never
/// cached, so a token refreshed between calls is honoured.
pub struct ResourceClient<R: Resource> {
    http: reqwest::Client,
    config: ClientConfig,
    sessions: Arc<dyn SessionStore>,
    _resource: PhantomData<fn() -> R>,
}

pub type SupplierClient = ResourceClient<Suppliers>;

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            sessions: self.sessions.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(config: ClientConfig, sessions: Arc<dyn SessionStore>) -> Self {
        Self::with_http(reqwest::Client::new(), config, sessions)
    }

    /// Share a `reqwest::Client` (and its connection pool) with other clients.
    pub fn with_http(
        http: reqwest::Client,
        config: ClientConfig,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            http,
            config,
            sessions,
            _resource: PhantomData,
        }
    }

    pub fn collection_url(&self) -> Url {
        self.config.endpoint(R::PATH)
    }

    /// `{collection}/{id}`, with the id percent-encoded as one path segment.
    pub fn record_url(&self, id: &RecordId) -> Result<Url, ClientError> {
        let mut url = self.collection_url();
        url.path_segments_mut()
            .map_err(|_| ClientError::Validation("API url cannot carry a record path".to_string()))?
            .push(id.as_str());
        Ok(url)
    }

    /// GET the whole collection.
    pub async fn list(&self) -> Result<Vec<R::Record>, ClientError> {
        let fallback = R::fallback_message(Operation::List);
        let url = self.collection_url();
        tracing::debug!(%url, "listing records");

        let req = http::authorized(self.http.get(url), self.sessions.as_ref());
        let records: Vec<R::Record> = http::send_json(req, fallback).await?;

        tracing::debug!(count = records.len(), path = R::PATH, "listed records");
        Ok(records)
    }

    /// POST a new record; the server assigns its id.
    pub async fn create(&self, draft: &R::Draft) -> Result<R::Record, ClientError> {
        R::validate(draft)?;

        let fallback = R::fallback_message(Operation::Create);
        let url = self.collection_url();
        tracing::debug!(%url, "creating record");

        let req = http::authorized(self.http.post(url).json(draft), self.sessions.as_ref());
        let record: R::Record = http::send_json(req, fallback).await?;

        tracing::info!(id = %record.id(), path = R::PATH, "record created");
        Ok(record)
    }

    /// PUT new field values for `id`. Existence of `id` is not checked first.
    pub async fn update(&self, id: &RecordId, fields: &R::Draft) -> Result<R::Record, ClientError> {
        R::validate(fields)?;

        let fallback = R::fallback_message(Operation::Update);
        let url = self.record_url(id)?;
        tracing::debug!(%url, "updating record");

        let req = http::authorized(self.http.put(url).json(fields), self.sessions.as_ref());
        let record: R::Record = http::send_json(req, fallback).await?;

        tracing::info!(%id, path = R::PATH, "record updated");
        Ok(record)
    }

    /// DELETE `id`. Any 2xx counts as success; the body is ignored.
    pub async fn remove(&self, id: &RecordId) -> Result<(), ClientError> {
        let fallback = R::fallback_message(Operation::Delete);
        let url = self.record_url(id)?;
        tracing::debug!(%url, "deleting record");

        let req = http::authorized(self.http.delete(url), self.sessions.as_ref());
        http::send(req, fallback).await?;

        tracing::info!(%id, path = R::PATH, "record deleted");
        Ok(())
    }
}
