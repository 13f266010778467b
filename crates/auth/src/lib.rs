//! `smartbiz-auth`: session state and role-based access gating.
//!
//! This crate is intentionally decoupled from HTTP. The only I/O it performs is
//! the durable session file behind [`FileSessionStore`].

pub mod gate;
pub mod roles;
pub mod routes;
pub mod session;
pub mod store;

pub use gate::{Access, decide, guard};
pub use roles::{Role, UnknownRole};
pub use routes::Route;
pub use session::{AuthToken, Session};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoreError};
