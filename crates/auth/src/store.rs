//! Durable session storage.
//!
//! All other components read the session through a [`SessionStore`] handle and
//! never touch storage directly.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{AuthToken, Role, Session};

const TOKEN_KEY: &str = "token";
const ROLE_KEY: &str = "role";

type Entries = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed session entries: {0}")]
    Json(#[from] serde_json::Error),

    /// Token and role must be saved together (or cleared together).
    #[error("session must carry both a token and a role")]
    PartialSession,

    /// A writer panicked while holding the store lock.
    #[error("session store lock poisoned")]
    Poisoned,
}

/// Single source of truth for the current identity.
///
/// Implementations must make `save` and `clear` replace both fields together
/// from the caller's point of view.
pub trait SessionStore: Send + Sync {
    /// Persist token and role, replacing any prior session.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Current session; fields that were never set (or were cleared) are absent.
    fn read(&self) -> Session;

    /// Remove both fields.
    fn clear(&self) -> Result<(), StoreError>;

    /// True iff a token is present. No signature, expiry or server check.
    fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }
}

fn ensure_whole(session: &Session) -> Result<(), StoreError> {
    if session.token().is_some() != session.role().is_some() {
        return Err(StoreError::PartialSession);
    }
    Ok(())
}

/// Process-local store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        ensure_whole(session)?;
        let mut guard = self.session.write().map_err(|_| StoreError::Poisoned)?;
        *guard = session.clone();
        Ok(())
    }

    fn read(&self) -> Session {
        // A poisoned lock reads as logged out.
        self.session
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.session.write().map_err(|_| StoreError::Poisoned)?;
        *guard = Session::anonymous();
        Ok(())
    }
}

/// Session store backed by a small JSON object file.
///
/// The file is the client-local namespace: a flat JSON object of which this
/// store owns the `"token"` and `"role"` strings. Other entries, whatever their
/// value type, are preserved.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load_entries(&self) -> Result<Entries, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    /// Entries for a read-modify-write. A corrupt file is replaced rather than
    /// blocking login forever.
    fn load_entries_for_write(&self) -> Result<Entries, StoreError> {
        match self.load_entries() {
            Ok(entries) => Ok(entries),
            Err(StoreError::Json(err)) => {
                tracing::warn!(path = %self.path.display(), error = %err, "discarding malformed session file");
                Ok(Entries::new())
            }
            Err(err) => Err(err),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StoreError> {
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(self.io_error(err)),
            };
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let payload = serde_json::to_string_pretty(entries)?;

        // Write-then-rename so token and role change together.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, payload).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &Session) -> Result<(), StoreError> {
        ensure_whole(session)?;
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.load_entries_for_write()?;

        match session.token() {
            Some(token) => entries.insert(TOKEN_KEY.to_string(), Value::from(token.as_str())),
            None => entries.remove(TOKEN_KEY),
        };
        match session.role() {
            Some(role) => entries.insert(ROLE_KEY.to_string(), Value::from(role.as_str())),
            None => entries.remove(ROLE_KEY),
        };

        self.write_entries(&entries)
    }

    fn read(&self) -> Session {
        let entries = match self.load_entries() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "session storage unreadable; treating as logged out");
                return Session::anonymous();
            }
        };

        let token = entries
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(AuthToken::new);
        let role = entries
            .get(ROLE_KEY)
            .and_then(Value::as_str)
            .and_then(|r| match r.parse::<Role>() {
                Ok(role) => Some(role),
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring stored role");
                    None
                }
            });

        Session::from_parts(token, role)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.load_entries_for_write()?;
        entries.remove(TOKEN_KEY);
        entries.remove(ROLE_KEY);
        self.write_entries(&entries)
    }
}
