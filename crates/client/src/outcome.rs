//! Per-panel request state driving loading / error / success rendering.

use smartbiz_core::RecordId;

/// State of the most recent operation on a panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestOutcome<T> {
    #[default]
    Idle,
    Pending,
    Success(T),
    Failure(String),
}

impl<T> RequestOutcome<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestOutcome::Pending)
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            RequestOutcome::Failure(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            RequestOutcome::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// What a successful panel operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completed<T> {
    /// The list was replaced; holds the new length.
    Listed(usize),
    Created(T),
    Updated(T),
    Deleted(RecordId),
}
