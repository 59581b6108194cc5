//! Shared application state handed to every handler.
//!
//! # Invariants
//! - The state carries only the store location; each request opens and drops
//!   its own connection.

use crate::error::ApiError;
use actix_web::web;
use log::error;
use product_core::db::open_db_for_request;
use product_core::{ProductService, ServiceResult, SqliteProductRepository};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    pub fn db_path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Runs `op` against a request-scoped service on the blocking pool.
    ///
    /// The connection is opened inside the blocking task and dropped when
    /// `op` returns, whatever its outcome.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&ProductService<SqliteProductRepository<'_>>) -> ServiceResult<T>
            + Send
            + 'static,
    {
        let db_path = Arc::clone(&self.db_path);
        web::block(move || with_product_service(&db_path, op)).await?
    }
}

fn with_product_service<T>(
    db_path: &Path,
    op: impl FnOnce(&ProductService<SqliteProductRepository<'_>>) -> ServiceResult<T>,
) -> Result<T, ApiError> {
    let conn = open_db_for_request(db_path).map_err(|err| {
        error!(
            "event=request_db_open module=api status=error path={} error={}",
            db_path.display(),
            err
        );
        ApiError::StoreUnavailable(err)
    })?;
    let service = ProductService::new(SqliteProductRepository::new(&conn));
    let outcome = op(&service);
    outcome.map_err(ApiError::from)
}
