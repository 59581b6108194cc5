//! HTTP error mapping.
//!
//! # Responsibility
//! - Translate service failures into status codes and JSON bodies.
//!
//! # Invariants
//! - NotFound -> 404 with empty body.
//! - BadInput / malformed requests -> 400 with a `{message, errors}` body.
//! - Conflict, Internal and store failures -> 500; the source chain is
//!   logged, not echoed.

use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use product_core::db::DbError;
use product_core::{BadInput, ProductId, ServiceError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use thiserror::Error;

const INVALID_REQUEST_MESSAGE: &str = "The request is invalid.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("product not found: {0}")]
    NotFound(ProductId),

    #[error("{0}")]
    BadInput(BadInput),

    /// Body or path could not be decoded at all.
    #[error("malformed {part}: {detail}")]
    Malformed { part: &'static str, detail: String },

    #[error("update conflict")]
    Conflict(#[source] ServiceError),

    #[error("service failure")]
    Internal(#[source] ServiceError),

    #[error("store unavailable")]
    StoreUnavailable(#[source] DbError),

    #[error("blocking task failed")]
    Blocking(#[from] BlockingError),
}

/// Body returned with 400 responses.
#[derive(Debug, Serialize)]
pub struct InvalidRequestBody {
    pub message: &'static str,
    pub errors: BTreeMap<&'static str, Vec<String>>,
}

impl ApiError {
    fn invalid_request_body(&self) -> InvalidRequestBody {
        let errors = match self {
            Self::BadInput(BadInput::Invalid(errors)) => errors.by_field(),
            Self::BadInput(reason @ BadInput::IdMismatch { .. }) => {
                BTreeMap::from([("id", vec![reason.to_string()])])
            }
            Self::Malformed { part, detail } => BTreeMap::from([(*part, vec![detail.clone()])]),
            _ => BTreeMap::new(),
        };
        InvalidRequestBody {
            message: INVALID_REQUEST_MESSAGE,
            errors,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound(id) => Self::NotFound(id),
            ServiceError::BadInput(reason) => Self::BadInput(reason),
            err @ ServiceError::Conflict { .. } => Self::Conflict(err),
            err @ ServiceError::Internal(_) => Self::Internal(err),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadInput(_) | Self::Malformed { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict(_)
            | Self::Internal(_)
            | Self::StoreUnavailable(_)
            | Self::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::NotFound(_) => HttpResponse::NotFound().finish(),
            Self::BadInput(_) | Self::Malformed { .. } => {
                HttpResponse::BadRequest().json(self.invalid_request_body())
            }
            Self::Conflict(_)
            | Self::Internal(_)
            | Self::StoreUnavailable(_)
            | Self::Blocking(_) => {
                error!(
                    "event=http_error module=api status=error code={} error={}",
                    self.status_code().as_u16(),
                    error_chain(self)
                );
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "message": "An error has occurred." }))
            }
        }
    }
}

/// Joins an error and its sources with `: `, skipping repeated messages.
fn error_chain(err: &dyn StdError) -> String {
    let mut parts: Vec<String> = vec![err.to_string()];
    let mut next = err.source();
    while let Some(cause) = next {
        let message = cause.to_string();
        if parts.last() != Some(&message) {
            parts.push(message);
        }
        next = cause.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::{error_chain, ApiError};
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;
    use product_core::{BadInput, ProductCandidate, RepoError, ServiceError};
    use std::error::Error;

    #[test]
    fn service_errors_map_to_status_codes() {
        let not_found = ApiError::from(ServiceError::NotFound(9));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let conflict = ApiError::from(ServiceError::Conflict { id: 1, source: None });
        assert_eq!(conflict.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let mismatch = ApiError::from(ServiceError::BadInput(BadInput::IdMismatch {
            path_id: 1,
            body_id: Some(2),
        }));
        assert_eq!(mismatch.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_errors_are_grouped_by_field() {
        let errors = ProductCandidate::default()
            .into_new_product()
            .expect_err("empty candidate must fail");
        let body = ApiError::BadInput(BadInput::Invalid(errors)).invalid_request_body();

        assert_eq!(body.message, "The request is invalid.");
        let fields: Vec<&str> = body.errors.keys().copied().collect();
        assert_eq!(fields, vec!["description", "name", "price", "quantity"]);
    }

    #[test]
    fn conflict_keeps_service_error_as_source() {
        let err = ApiError::from(ServiceError::Conflict { id: 3, source: None });

        let source = err.source().expect("conflict carries its service error");
        let service_err = source
            .downcast_ref::<ServiceError>()
            .expect("source is the service error");
        assert!(matches!(service_err, ServiceError::Conflict { id: 3, .. }));
    }

    #[test]
    fn internal_source_chain_reaches_repository_error() {
        let err = ApiError::from(ServiceError::Internal(RepoError::InvalidData(
            "Product.price out of range".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let repo_err = err
            .source()
            .and_then(|service_err| service_err.source())
            .and_then(|cause| cause.downcast_ref::<RepoError>())
            .expect("repository error stays in the chain");
        assert!(matches!(repo_err, RepoError::InvalidData(_)));
        assert!(error_chain(&err).starts_with("service failure: "));
        assert!(error_chain(&err).contains("Product.price out of range"));
    }
}
