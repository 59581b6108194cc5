//! `/api/Product` endpoints.
//!
//! Each handler forwards to one `ProductService` operation on a
//! request-scoped connection; failures become responses via `ApiError`.
//! The scope is also mounted at `/api/product`; other casings are not matched.

use crate::error::ApiError;
use crate::state::AppState;
use actix_web::http::header;
use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, put, HttpResponse};
use product_core::{ProductCandidate, ProductId};

pub const PRODUCT_SCOPE: &str = "/api/Product";

/// Prefixes the product handlers are mounted under. `Location` headers always
/// use [`PRODUCT_SCOPE`].
pub const PRODUCT_SCOPE_ALIASES: [&str; 2] = [PRODUCT_SCOPE, "/api/product"];

#[get("")]
pub async fn get_all(state: Data<AppState>) -> Result<HttpResponse, ApiError> {
    let products = state.run(|service| service.list()).await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/{id}")]
pub async fn get(state: Data<AppState>, path: Path<ProductId>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let product = state.run(move |service| service.get(id)).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[post("")]
pub async fn create(
    state: Data<AppState>,
    body: Json<ProductCandidate>,
) -> Result<HttpResponse, ApiError> {
    let candidate = body.into_inner();
    let product = state.run(move |service| service.create(candidate)).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{PRODUCT_SCOPE}/{}", product.id)))
        .json(product))
}

#[put("/{id}")]
pub async fn update(
    state: Data<AppState>,
    path: Path<ProductId>,
    body: Json<ProductCandidate>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let candidate = body.into_inner();
    state
        .run(move |service| service.update(id, candidate))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/{id}")]
pub async fn delete(
    state: Data<AppState>,
    path: Path<ProductId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let product = state.run(move |service| service.delete(id)).await?;
    Ok(HttpResponse::Ok().json(product))
}
