//! `smartbiz-core`: shared building blocks for the SmartBiz client.
//!
//! This crate contains **pure** primitives (no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod resource;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use resource::{Operation, Resource};
