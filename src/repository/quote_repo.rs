use crate::model::quote::Quote;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::oid::ObjectId;
use mongodb::Database;
use tracing::{error, info};

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote>;
}

pub struct MongoQuoteRepository {
    collection: mongodb::Collection<Quote>,
}

impl MongoQuoteRepository {
    pub fn new(db: &Database) -> Self {
        MongoQuoteRepository {
            collection: db.collection::<Quote>("quotes"),
        }
    }
}

#[async_trait]
impl QuoteRepository for MongoQuoteRepository {
    #[tracing::instrument(skip(self, quote), fields(customer = %quote.customer_name, product_id = %quote.product_id))]
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote> {
        info!("Creating new quote");
        let mut new_quote = quote;
        // Set id manually before inserting so the caller gets it back
        new_quote.id = Some(ObjectId::new());
        new_quote.created_at = Some(chrono::Utc::now().to_rfc3339());

        let result = self.collection.insert_one(new_quote.clone(), None).await;
        match result {
            Ok(_) => {
                info!("Quote created successfully");
                Ok(new_quote)
            }
            Err(e) => {
                error!("Failed to create quote: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create quote: {}",
                    e
                )))
            }
        }
    }
}
