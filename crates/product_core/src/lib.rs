//! Core domain logic for the product API.
//! This crate owns the product model, its validation, storage and use-cases.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::product::{NewProduct, Product, ProductId, ProductSummary};
pub use model::validation::{validate, FieldError, ProductCandidate, ValidationErrors};
pub use repo::product_repo::{ProductRepository, RepoError, RepoResult, SqliteProductRepository};
pub use service::product_service::{BadInput, ProductService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
