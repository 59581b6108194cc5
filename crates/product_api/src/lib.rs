//! HTTP surface for the product store.
//!
//! # Responsibility
//! - Map `/api/Product` requests onto `product_core` use-cases.
//! - Load server configuration and wire the actix-web application.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use routes::configure_routes;
pub use state::AppState;
