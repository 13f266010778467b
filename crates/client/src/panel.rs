//! CRUD panel controller: one resource client call at a time, exposed as
//! renderable state.
//!
//! The controller is not optimistic. A successful create, update
//! or delete never touches `items`; only a fresh [`CrudPanelController::refresh`]
//! shows the authoritative collection.
//!
//! Concurrency policy:
//! - While the outcome is `Pending`, every further operation is rejected with
//!   [`PanelError::Busy`] (the shell disables the triggering control).
//! - [`CrudPanelController::deactivate`] invalidates in-flight work; a response
//!   arriving afterwards is dropped instead of being applied.
//! - An operation future dropped before completion (task abort, timeout,
//!   `select!`) puts the panel back to `Idle`.
//! - A successful submit only clears a form buffer that still holds what was
//!   submitted; edits typed while the request was in flight are kept.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use smartbiz_core::{RecordId, Resource};
use smartbiz_parties::Suppliers;

use crate::{ClientError, Completed, RequestOutcome, ResourceClient};

/// Edit buffer for the update form: the target id (as typed or pre-filled
/// from a row) plus the new field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDraft<D> {
    pub id: String,
    pub fields: D,
}

/// Snapshot of everything a panel renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState<T, D> {
    pub items: Vec<T>,
    pub outcome: RequestOutcome<Completed<T>>,
    pub create_draft: D,
    pub update_draft: UpdateDraft<D>,
    /// Standalone id field of the delete form.
    pub delete_id: String,
}

impl<T, D: Default> Default for PanelState<T, D> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            outcome: RequestOutcome::Idle,
            create_draft: D::default(),
            update_draft: UpdateDraft::default(),
            delete_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    /// Another operation is still pending; nothing was sent.
    #[error("another operation is still in progress")]
    Busy,

    /// The panel was deactivated while the request was in flight; its result
    /// was discarded.
    #[error("panel was deactivated before the request completed")]
    Invalidated,

    /// The operation failed; the same message is in the panel's outcome.
    #[error(transparent)]
    Failed(#[from] ClientError),
}

struct Inner<T, D> {
    state: PanelState<T, D>,
    generation: u64,
}

/// One operation's claim on the `Pending` outcome.
///
/// Dropped without [`PendingGuard::disarm`], it resets the outcome to `Idle`,
/// but only if the panel is still on the same generation and still `Pending`.
struct PendingGuard<'a, T, D> {
    inner: &'a Mutex<Inner<T, D>>,
    generation: u64,
    path: &'static str,
    armed: bool,
}

impl<T, D> PendingGuard<'_, T, D> {
    fn disarm(mut self) -> u64 {
        self.armed = false;
        self.generation
    }
}

impl<T, D> Drop for PendingGuard<'_, T, D> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.generation == self.generation && inner.state.outcome.is_pending() {
            inner.state.outcome = RequestOutcome::Idle;
            tracing::debug!(path = self.path, "operation dropped before completion");
        }
    }
}

type Shared<R> = Arc<Mutex<Inner<<R as Resource>::Record, <R as Resource>::Draft>>>;

/// Controller for one "Manage X" panel.
///
/// Cloning yields another handle to the same panel, so the shell can spawn an
/// operation as a task and keep reading [`CrudPanelController::state`].
pub struct CrudPanelController<R: Resource> {
    client: ResourceClient<R>,
    inner: Shared<R>,
}

pub type SupplierPanel = CrudPanelController<Suppliers>;

impl<R: Resource> Clone for CrudPanelController<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<R: Resource> CrudPanelController<R> {
    pub fn new(client: ResourceClient<R>) -> Self {
        Self {
            client,
            inner: Arc::new(Mutex::new(Inner {
                state: PanelState::default(),
                generation: 0,
            })),
        }
    }

    // Poisoning is recovered: state is only ever replaced field-wise.
    fn lock(&self) -> MutexGuard<'_, Inner<R::Record, R::Draft>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> PanelState<R::Record, R::Draft> {
        self.lock().state.clone()
    }

    pub fn items(&self) -> Vec<R::Record> {
        self.lock().state.items.clone()
    }

    pub fn outcome(&self) -> RequestOutcome<Completed<R::Record>> {
        self.lock().state.outcome.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().state.outcome.is_pending()
    }

    pub fn create_draft(&self) -> R::Draft {
        self.lock().state.create_draft.clone()
    }

    pub fn update_draft(&self) -> UpdateDraft<R::Draft> {
        self.lock().state.update_draft.clone()
    }

    pub fn set_create_draft(&self, draft: R::Draft) {
        self.lock().state.create_draft = draft;
    }

    pub fn set_update_draft(&self, draft: UpdateDraft<R::Draft>) {
        self.lock().state.update_draft = draft;
    }

    pub fn set_delete_id(&self, id: impl Into<String>) {
        self.lock().state.delete_id = id.into();
    }

    /// "Edit" on a row: pre-fill the update form. No server round-trip.
    pub fn begin_edit(&self, record: &R::Record) {
        use smartbiz_core::Entity;

        self.lock().state.update_draft = UpdateDraft {
            id: record.id().to_string(),
            fields: R::draft_from(record),
        };
    }

    /// Leaving the panel: drop cached items and form buffers, and make any
    /// in-flight response stale.
    pub fn deactivate(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = PanelState::default();
        tracing::debug!(path = R::PATH, "panel deactivated");
    }

    /// "Read": replace `items` wholesale with the server's collection.
    ///
    /// On failure `items` keeps its previous (stale but visible) value.
    pub async fn refresh(&self) -> Result<(), PanelError> {
        let pending = self.begin()?;
        let result = self.client.list().await;

        self.finish(pending, result, |state, items| {
            let count = items.len();
            state.items = items;
            Completed::Listed(count)
        })
    }

    /// Submit the create form. Success clears the form; failure keeps it.
    pub async fn submit_create(&self) -> Result<(), PanelError> {
        let pending = self.begin()?;
        let draft = self.create_draft();
        let result = self.client.create(&draft).await;

        self.finish(pending, result, |state, record| {
            if state.create_draft == draft {
                state.create_draft = R::Draft::default();
            }
            Completed::Created(record)
        })
    }

    /// Submit the update form. Success clears the form; failure keeps it.
    pub async fn submit_update(&self) -> Result<(), PanelError> {
        let pending = self.begin()?;
        let draft = self.update_draft();

        let result = match RecordId::parse(draft.id.as_str()) {
            Ok(id) => self.client.update(&id, &draft.fields).await,
            Err(err) => Err(ClientError::from(err)),
        };

        self.finish(pending, result, |state, record| {
            if state.update_draft == draft {
                state.update_draft = UpdateDraft::default();
            }
            Completed::Updated(record)
        })
    }

    /// "Delete" on a row.
    pub async fn delete(&self, id: &RecordId) -> Result<(), PanelError> {
        let pending = self.begin()?;
        let result = self.client.remove(id).await.map(|()| id.clone());

        self.finish(pending, result, |_, id| Completed::Deleted(id))
    }

    /// Submit the delete form (standalone id field). Success clears the field.
    pub async fn submit_delete(&self) -> Result<(), PanelError> {
        let pending = self.begin()?;
        let raw = self.lock().state.delete_id.clone();

        let result = match RecordId::parse(raw.as_str()) {
            Ok(id) => self.client.remove(&id).await.map(|()| id),
            Err(err) => Err(ClientError::from(err)),
        };

        self.finish(pending, result, |state, id| {
            if state.delete_id == raw {
                state.delete_id.clear();
            }
            Completed::Deleted(id)
        })
    }

    /// Move to `Pending`, or refuse if something is already pending.
    fn begin(&self) -> Result<PendingGuard<'_, R::Record, R::Draft>, PanelError> {
        let mut inner = self.lock();
        if inner.state.outcome.is_pending() {
            tracing::debug!(path = R::PATH, "operation rejected: panel busy");
            return Err(PanelError::Busy);
        }
        inner.state.outcome = RequestOutcome::Pending;
        Ok(PendingGuard {
            inner: self.inner.as_ref(),
            generation: inner.generation,
            path: R::PATH,
            armed: true,
        })
    }

    /// Apply a finished call, unless the panel was deactivated meanwhile.
    fn finish<T>(
        &self,
        pending: PendingGuard<'_, R::Record, R::Draft>,
        result: Result<T, ClientError>,
        on_success: impl FnOnce(&mut PanelState<R::Record, R::Draft>, T) -> Completed<R::Record>,
    ) -> Result<(), PanelError> {
        let generation = pending.disarm();
        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::debug!(path = R::PATH, "discarding response for a deactivated panel");
            return Err(PanelError::Invalidated);
        }

        match result {
            Ok(value) => {
                let completed = on_success(&mut inner.state, value);
                inner.state.outcome = RequestOutcome::Success(completed);
                Ok(())
            }
            Err(err) => {
                inner.state.outcome = RequestOutcome::Failure(err.message().to_string());
                Err(PanelError::Failed(err))
            }
        }
    }
}
