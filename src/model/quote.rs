use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub customer_name: String,
    pub customer_phone: String,
    pub product_id: String,
    pub actual_width: f64,
    pub actual_height: f64,
    pub actual_depth: f64,
    pub quantity: i64,
    pub total_price: f64,

    pub created_at: Option<String>,
}

/// Internal record signalling staff that a new quote needs attention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub message: String,
    pub quote_id: ObjectId,
    pub created_at: Option<String>,
}
