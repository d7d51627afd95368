use crate::model::quote::Notification;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::oid::ObjectId;
use mongodb::Database;
use tracing::{error, info};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: Notification) -> RepositoryResult<Notification>;
}

pub struct MongoNotificationRepository {
    collection: mongodb::Collection<Notification>,
}

impl MongoNotificationRepository {
    pub fn new(db: &Database) -> Self {
        MongoNotificationRepository {
            collection: db.collection::<Notification>("notifications"),
        }
    }
}

#[async_trait]
impl NotificationRepository for MongoNotificationRepository {
    #[tracing::instrument(skip(self, notification), fields(quote_id = %notification.quote_id))]
    async fn create(&self, notification: Notification) -> RepositoryResult<Notification> {
        info!("Creating quote notification");
        let mut new_notification = notification;
        new_notification.id = Some(ObjectId::new());
        new_notification.created_at = Some(chrono::Utc::now().to_rfc3339());

        let result = self
            .collection
            .insert_one(new_notification.clone(), None)
            .await;
        match result {
            Ok(_) => {
                info!("Notification created successfully");
                Ok(new_notification)
            }
            Err(e) => {
                error!("Failed to create notification: {}", e);
                Err(RepositoryError::database(format!(
                    "Failed to create notification: {}",
                    e
                )))
            }
        }
    }
}
