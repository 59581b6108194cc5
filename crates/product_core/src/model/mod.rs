//! Product domain model.
//!
//! # Responsibility
//! - Define the stored `Product` record and its list projection.
//! - Validate untrusted request candidates into well-formed records.
//!
//! # Invariants
//! - `Product::id` is assigned by the store and never changes.
//! - Only validated candidates reach persistence.

pub mod product;
pub mod validation;
