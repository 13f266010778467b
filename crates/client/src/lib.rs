//! `smartbiz-client`
//!
//! **Responsibility:** the client core behind the SmartBiz dashboards.
//!
//! This crate provides:
//! - Login / registration / logout against the auth endpoints
//! - A generic CRUD client for remote resource collections (suppliers)
//! - Panel controllers that turn those calls into renderable state
//!
//! The presentation shell is a **thin layer** on top: it gates routes with
//! [`smartbiz_auth::guard`] and renders whatever the controllers expose. The
//! API remains the authority; nothing here is optimistic.

pub mod auth;
pub mod config;
pub mod error;
mod http;
pub mod outcome;
pub mod panel;
pub mod resource;

pub use auth::{AuthClient, Credentials, RegistrationRequest};
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use outcome::{Completed, RequestOutcome};
pub use panel::{CrudPanelController, PanelError, PanelState, SupplierPanel, UpdateDraft};
pub use resource::{ResourceClient, SupplierClient};
