//! Descriptor for a remote resource collection manipulated through CRUD.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{DomainError, Entity, RecordId};

/// The four CRUD intents a client can issue against a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one resource collection (e.g. suppliers).
///
/// Implementors are zero-sized marker types; all behaviour that varies between
/// collections (path, wire types, user-facing fallback messages) lives here so
/// the HTTP client and the panel controller stay generic.
pub trait Resource: Send + Sync + 'static {
    /// Record as returned by the server (carries a server-assigned id).
    type Record: Entity<Id = RecordId>
        + Clone
        + core::fmt::Debug
        + PartialEq
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Editable fields, sent as the body of create and update requests.
    type Draft: Clone
        + core::fmt::Debug
        + Default
        + PartialEq
        + Serialize
        + Send
        + Sync
        + 'static;

    /// Collection path relative to the API base URL, e.g. `/api/suppliers`.
    const PATH: &'static str;

    /// Message shown when an operation fails without a server-provided message.
    fn fallback_message(op: Operation) -> &'static str;

    /// Local "required field" check applied before a draft is sent.
    fn validate(draft: &Self::Draft) -> Result<(), DomainError>;

    /// Editable fields of an existing record (used to pre-fill edit forms).
    fn draft_from(record: &Self::Record) -> Self::Draft;
}
