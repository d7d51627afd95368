use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::dto::catalog_dto::{ProductDetailsRequest, ProductOptionsResponse};
use crate::model::catalog::OptionKind;
use crate::repository::catalog_repo::CatalogRepository;
use crate::util::error::ServiceError;

/// Composite product key: the four option ids concatenated in fixed order
/// (aluminum, handle, glass, part).
pub fn composite_product_id(aluminum: &str, handle: &str, glass: &str, part: &str) -> String {
    format!("{}{}{}{}", aluminum, handle, glass, part)
}

#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_options(&self) -> Result<ProductOptionsResponse, ServiceError>;
    async fn resolve_product(
        &self,
        selection: ProductDetailsRequest,
    ) -> Result<serde_json::Value, ServiceError>;
}

pub struct CatalogServiceImpl {
    pub catalog_repo: Arc<dyn CatalogRepository>,
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    #[instrument(skip(self))]
    async fn list_options(&self) -> Result<ProductOptionsResponse, ServiceError> {
        info!("Fetching product options");

        // Clients get a generic message on failure; the cause is logged here.
        let fetch_failed = |e| {
            error!("Failed to fetch product options: {}", e);
            ServiceError::InternalError("Failed to fetch product options".to_string())
        };

        let aluminums = self
            .catalog_repo
            .list_options(OptionKind::Aluminum)
            .await
            .map_err(fetch_failed)?;
        let handles = self
            .catalog_repo
            .list_options(OptionKind::Handle)
            .await
            .map_err(fetch_failed)?;
        let glasses = self
            .catalog_repo
            .list_options(OptionKind::Glass)
            .await
            .map_err(fetch_failed)?;
        let parts = self
            .catalog_repo
            .list_options(OptionKind::Part)
            .await
            .map_err(fetch_failed)?;

        Ok(ProductOptionsResponse {
            aluminums,
            handles,
            glasses,
            parts,
        })
    }

    #[instrument(skip(self, selection))]
    async fn resolve_product(
        &self,
        selection: ProductDetailsRequest,
    ) -> Result<serde_json::Value, ServiceError> {
        let mut missing = Vec::new();
        let mut required = |field: &Option<String>, name: &'static str| -> String {
            match field.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let aluminum_id = required(&selection.aluminum_id, "aluminum_id");
        let handle_id = required(&selection.handle_id, "handle_id");
        let glass_id = required(&selection.glass_id, "glass_id");
        let part_id = required(&selection.part_id, "part_id");

        if !missing.is_empty() {
            return Err(ServiceError::InvalidInput(format!(
                "Missing product selections: {}",
                missing.join(", ")
            )));
        }

        let product_id = composite_product_id(&aluminum_id, &handle_id, &glass_id, &part_id);
        info!(product_id = %product_id, "Resolving product");

        let product = self.catalog_repo.find_product(&product_id).await?;
        Ok(product)
    }
}
