use serde::{Deserialize, Serialize};
use validator::Validate;

/// Quote submission payload.
///
/// Field naming mirrors the existing frontend: the quote fields are
/// camelCase, the four option selections snake_case. Every field is
/// optional at the schema level; presence of the eight required quote
/// fields is checked by the submission workflow so the client gets a 400
/// rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuoteRequest {
    #[validate(length(min = 1, max = 200))]
    pub customer_name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub customer_phone: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub product_id: Option<String>,

    #[validate(range(exclusive_min = 0.0))]
    pub actual_width: Option<f64>,

    #[validate(range(exclusive_min = 0.0))]
    pub actual_height: Option<f64>,

    #[validate(range(exclusive_min = 0.0))]
    pub actual_depth: Option<f64>,

    #[validate(range(min = 1))]
    pub quantity: Option<i64>,

    #[validate(range(exclusive_min = 0.0))]
    pub total_price: Option<f64>,

    #[serde(rename = "aluminum_id")]
    pub aluminum_id: Option<String>,

    #[serde(rename = "handle_id")]
    pub handle_id: Option<String>,

    #[serde(rename = "glass_id")]
    pub glass_id: Option<String>,

    #[serde(rename = "part_id")]
    pub part_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuoteResponse {
    pub message: String,
}
