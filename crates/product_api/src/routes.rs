use crate::endpoints::{health, products};
use crate::error::ApiError;
use actix_web::{web, Scope};

/// Registers every route plus the extractor configs that turn undecodable
/// bodies and ids into 400 responses.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Malformed {
            part: "body",
            detail: err.to_string(),
        }
        .into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::Malformed {
            part: "id",
            detail: err.to_string(),
        }
        .into()
    }))
    .service(health::health);

    for prefix in products::PRODUCT_SCOPE_ALIASES {
        cfg.service(product_scope(prefix));
    }
}

fn product_scope(prefix: &str) -> Scope {
    web::scope(prefix)
        .service(products::get_all)
        .service(products::get)
        .service(products::create)
        .service(products::update)
        .service(products::delete)
}
