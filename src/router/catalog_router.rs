use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handler::catalog_handler::{get_options_handler, product_details_handler};
use crate::service::catalog_service::CatalogServiceImpl;

pub fn catalog_router(service: Arc<CatalogServiceImpl>) -> Router {
    Router::new()
        .route("/api/options", get(get_options_handler))
        .route("/api/product-details", post(product_details_handler))
        .with_state(service)
}
