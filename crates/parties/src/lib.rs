//! Parties domain module (suppliers).
//!
//! Record and draft shapes exchanged with the supplier collection, plus the
//! local required-field rules. No IO, no HTTP, no storage.

pub mod supplier;

pub use supplier::{Supplier, SupplierDraft, Suppliers};
