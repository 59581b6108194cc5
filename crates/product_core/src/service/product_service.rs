//! Product use-case service.
//!
//! # Responsibility
//! - Expose list/get/create/update/delete over a product repository.
//! - Turn request candidates into validated records before persistence.
//! - Classify failures into not-found, bad-input, conflict and internal.
//!
//! # Invariants
//! - Service APIs never bypass validation.
//! - Update never changes a product id; a body/path id mismatch is rejected.
//! - Service layer remains storage-agnostic.

use crate::model::product::{Product, ProductId, ProductSummary};
use crate::model::validation::{ProductCandidate, ValidationErrors};
use crate::repo::product_repo::{ProductRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Reason a request body was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadInput {
    /// One or more fields failed validation.
    Invalid(ValidationErrors),
    /// The body id does not match the addressed id.
    IdMismatch {
        path_id: ProductId,
        body_id: Option<ProductId>,
    },
}

impl Display for BadInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "invalid product: {errors}"),
            Self::IdMismatch {
                path_id,
                body_id: Some(body_id),
            } => write!(f, "body id {body_id} does not match path id {path_id}"),
            Self::IdMismatch {
                path_id,
                body_id: None,
            } => write!(f, "body id is missing, expected {path_id}"),
        }
    }
}

/// Service error for product use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// No product with the given id.
    NotFound(ProductId),
    /// Malformed or inconsistent request body.
    BadInput(BadInput),
    /// A concurrent write interfered with an update and the row still exists.
    Conflict {
        id: ProductId,
        source: Option<RepoError>,
    },
    /// Store unreachable or unexpected failure.
    Internal(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::BadInput(reason) => write!(f, "{reason}"),
            Self::Conflict { id, .. } => {
                write!(f, "concurrent modification detected for product {id}")
            }
            Self::Internal(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Conflict {
                source: Some(err), ..
            } => Some(err),
            Self::Internal(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Internal(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(value: ValidationErrors) -> Self {
        Self::BadInput(BadInput::Invalid(value))
    }
}

/// Use-case service wrapper for product CRUD operations.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every product as a summary, in id order.
    ///
    /// Any store failure aborts the whole listing.
    pub fn list(&self) -> ServiceResult<Vec<ProductSummary>> {
        let products = self.repo.list_products().map_err(ServiceError::Internal)?;
        Ok(products.into_iter().map(ProductSummary::from).collect())
    }

    /// Gets the full record for `id`.
    pub fn get(&self, id: ProductId) -> ServiceResult<Product> {
        self.repo.get_product(id)?.ok_or(ServiceError::NotFound(id))
    }

    /// Validates and stores a new product; the candidate id is ignored.
    ///
    /// # Contract
    /// - Returns the stored record with its store-assigned id.
    pub fn create(&self, candidate: ProductCandidate) -> ServiceResult<Product> {
        let draft = candidate.into_new_product()?;
        let product = self.repo.create_product(&draft)?;
        info!(
            "event=product_create module=service status=ok id={}",
            product.id
        );
        Ok(product)
    }

    /// Replaces every field of product `id` with the candidate values.
    ///
    /// # Contract
    /// - Validation errors and id mismatch yield `BadInput`, in that order.
    /// - A write that misses its row, or is refused by a busy store, triggers
    ///   an existence re-check: missing row is `NotFound`, a present row is
    ///   `Conflict`.
    pub fn update(&self, id: ProductId, candidate: ProductCandidate) -> ServiceResult<()> {
        let body_id = candidate.id;
        let draft = candidate.into_new_product()?;
        if body_id != Some(id) {
            return Err(ServiceError::BadInput(BadInput::IdMismatch {
                path_id: id,
                body_id,
            }));
        }

        let write_err = match self.repo.update_product(&draft.with_id(id)) {
            Ok(()) => {
                info!("event=product_update module=service status=ok id={id}");
                return Ok(());
            }
            Err(err @ RepoError::NotFound(_)) => err,
            Err(err) if err.is_busy() => err,
            Err(err) => return Err(ServiceError::Internal(err)),
        };

        if !self.repo.product_exists(id)? {
            return Err(ServiceError::NotFound(id));
        }

        warn!(
            "event=product_update module=service status=conflict id={} error={}",
            id, write_err
        );
        let source = match write_err {
            RepoError::NotFound(_) => None,
            other => Some(other),
        };
        Err(ServiceError::Conflict { id, source })
    }

    /// Removes product `id` and returns the removed record.
    pub fn delete(&self, id: ProductId) -> ServiceResult<Product> {
        let product = self
            .repo
            .delete_product(id)?
            .ok_or(ServiceError::NotFound(id))?;
        info!("event=product_delete module=service status=ok id={id}");
        Ok(product)
    }
}

