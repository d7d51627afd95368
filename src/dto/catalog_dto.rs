use serde::{Deserialize, Serialize};

use crate::model::catalog::OptionItem;

/// The four option selections identifying a product configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetailsRequest {
    pub aluminum_id: Option<String>,
    pub handle_id: Option<String>,
    pub glass_id: Option<String>,
    pub part_id: Option<String>,
}

/// The four option lists, grouped under fixed labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOptionsResponse {
    pub aluminums: Vec<OptionItem>,
    pub handles: Vec<OptionItem>,
    pub glasses: Vec<OptionItem>,
    pub parts: Vec<OptionItem>,
}
