use crate::model::catalog::{OptionItem, OptionKind};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::stream::StreamExt;
use mongodb::{
    options::{FindOneOptions, FindOptions},
    Database,
};
use tracing::{error, info};

/// Read-only access to the option lookup tables and the product table.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All rows of one option table, id and name only, in store order.
    async fn list_options(&self, kind: OptionKind) -> RepositoryResult<Vec<OptionItem>>;

    /// The single product row matching a composite product id.
    ///
    /// Zero matches is NotFound; more than one match is reported as a
    /// database error, never resolved by picking a row.
    async fn find_product(&self, product_id: &str) -> RepositoryResult<serde_json::Value>;

    /// Display name for one option id, if the row exists and carries a name.
    async fn find_option_name(
        &self,
        kind: OptionKind,
        id: &str,
    ) -> RepositoryResult<Option<String>>;
}

pub struct MongoCatalogRepository {
    db: Database,
}

impl MongoCatalogRepository {
    pub fn new(db: Database) -> Self {
        MongoCatalogRepository { db }
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    #[tracing::instrument(skip(self), fields(collection = kind.collection()))]
    async fn list_options(&self, kind: OptionKind) -> RepositoryResult<Vec<OptionItem>> {
        info!("Listing {}", kind.collection());
        let collection = self.db.collection::<OptionItem>(kind.collection());
        let options = FindOptions::builder()
            .projection(doc! { "id": 1, "name": 1, "_id": 0 })
            .build();

        let mut cursor = collection.find(None, options).await.map_err(|e| {
            error!("Failed to query {}: {}", kind.collection(), e);
            RepositoryError::database(format!("Failed to query {}: {}", kind.collection(), e))
        })?;

        let mut items = Vec::new();
        while let Some(item) = cursor.next().await {
            match item {
                Ok(i) => items.push(i),
                Err(e) => {
                    error!("Failed to deserialize option row: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize option row: {}",
                        e
                    )));
                }
            }
        }
        info!("Fetched {} rows from {}", items.len(), kind.collection());
        Ok(items)
    }

    #[tracing::instrument(skip(self), fields(product_id = %product_id))]
    async fn find_product(&self, product_id: &str) -> RepositoryResult<serde_json::Value> {
        info!("Looking up product by composite id");
        let collection = self.db.collection::<Document>("product_details");
        let mut cursor = collection
            .find(doc! { "product_id": product_id }, None)
            .await
            .map_err(|e| {
                error!("Failed to query product_details: {}", e);
                RepositoryError::database(format!("Failed to query product_details: {}", e))
            })?;

        let mut matches: Vec<Document> = Vec::new();
        while let Some(row) = cursor.next().await {
            let row = row.map_err(|e| {
                error!("Failed to read product row: {}", e);
                RepositoryError::database(format!("Failed to read product row: {}", e))
            })?;
            matches.push(row);
            if matches.len() > 1 {
                break;
            }
        }

        match matches.len() {
            0 => {
                info!("No product found for composite id");
                Err(RepositoryError::not_found(format!(
                    "No product found for product_id {}",
                    product_id
                )))
            }
            1 => {
                // length checked above
                let row = matches.pop().unwrap();
                Ok(Bson::Document(row).into_relaxed_extjson())
            }
            _ => {
                error!("Multiple product rows share product_id {}", product_id);
                Err(RepositoryError::database(format!(
                    "Multiple product rows share product_id {}",
                    product_id
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(collection = kind.collection(), id = %id))]
    async fn find_option_name(
        &self,
        kind: OptionKind,
        id: &str,
    ) -> RepositoryResult<Option<String>> {
        let collection = self.db.collection::<Document>(kind.collection());
        let options = FindOneOptions::builder()
            .projection(doc! { "name": 1, "_id": 0 })
            .build();

        let row = collection
            .find_one(doc! { "id": id }, options)
            .await
            .map_err(|e| {
                error!("Failed to query {}: {}", kind.collection(), e);
                RepositoryError::database(format!("Failed to query {}: {}", kind.collection(), e))
            })?;

        Ok(row.and_then(|doc| doc.get_str("name").ok().map(String::from)))
    }
}
