use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::dto::catalog_dto::ProductDetailsRequest;
use crate::service::catalog_service::{CatalogService, CatalogServiceImpl};
use crate::util::error::HandlerError;

pub async fn get_options_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let options = service.list_options().await?;
    Ok(Json(options))
}

pub async fn product_details_handler(
    State(service): State<Arc<CatalogServiceImpl>>,
    Json(payload): Json<ProductDetailsRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let product = service.resolve_product(payload).await?;
    Ok(Json(product))
}
