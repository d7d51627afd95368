use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use crate::dto::quote_dto::{SubmitQuoteRequest, SubmitQuoteResponse};
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};

pub async fn submit_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    Json(payload): Json<SubmitQuoteRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError {
            error: HandlerErrorKind::Validation,
            message: format!("Validation error: {}", e),
            details: None,
        });
    }

    service.submit_quote(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitQuoteResponse {
            message: "Quote submitted successfully!".to_string(),
        }),
    ))
}
