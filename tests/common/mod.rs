#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use bson::oid::ObjectId;
use serde_json::json;

use aluquote_backend::model::catalog::{OptionItem, OptionKind};
use aluquote_backend::model::quote::{Notification, Quote};
use aluquote_backend::repository::catalog_repo::CatalogRepository;
use aluquote_backend::repository::notification_repo::NotificationRepository;
use aluquote_backend::repository::quote_repo::QuoteRepository;
use aluquote_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use aluquote_backend::service::quote_service::QuoteServiceImpl;
use aluquote_backend::util::email::{EmailError, EmailMessage, EmailSender};

/// In-memory quote store recording every insert.
#[derive(Default)]
pub struct FakeQuoteRepo {
    pub created: Mutex<Vec<Quote>>,
    pub fail: bool,
}

#[async_trait]
impl QuoteRepository for FakeQuoteRepo {
    async fn create(&self, quote: Quote) -> RepositoryResult<Quote> {
        if self.fail {
            return Err(RepositoryError::database("quote insert failed"));
        }
        let mut stored = quote;
        stored.id = Some(ObjectId::new());
        self.created.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}

/// In-memory notification store recording every insert.
#[derive(Default)]
pub struct FakeNotificationRepo {
    pub created: Mutex<Vec<Notification>>,
    pub fail: bool,
}

#[async_trait]
impl NotificationRepository for FakeNotificationRepo {
    async fn create(&self, notification: Notification) -> RepositoryResult<Notification> {
        if self.fail {
            return Err(RepositoryError::database("notification insert failed"));
        }
        let mut stored = notification;
        stored.id = Some(ObjectId::new());
        self.created.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}

/// Seeded option tables and product rows, plus a record of every composite
/// key that was looked up.
#[derive(Default)]
pub struct FakeCatalogRepo {
    pub options: HashMap<&'static str, Vec<OptionItem>>,
    pub products: Vec<(String, serde_json::Value)>,
    pub requested_product_ids: Mutex<Vec<String>>,
    pub fail_listing: bool,
}

impl FakeCatalogRepo {
    pub fn seeded() -> Self {
        let mut options = HashMap::new();
        options.insert(
            OptionKind::Aluminum.collection(),
            vec![
                option("A1", "Silver anodized"),
                option("A2", "Black matte"),
            ],
        );
        options.insert(
            OptionKind::Handle.collection(),
            vec![option("H2", "Bar handle"), option("H9", "Recessed handle")],
        );
        options.insert(
            OptionKind::Glass.collection(),
            vec![option("G3", "Tempered 8mm"), option("G5", "Frosted 6mm")],
        );
        options.insert(
            OptionKind::Part.collection(),
            vec![option("P4", "Sliding door"), option("P7", "Fixed panel")],
        );

        FakeCatalogRepo {
            options,
            products: vec![(
                "A1H2G3P4".to_string(),
                json!({
                    "product_id": "A1H2G3P4",
                    "name": "Sliding door, silver frame",
                    "unit_price": 250.0
                }),
            )],
            requested_product_ids: Mutex::new(Vec::new()),
            fail_listing: false,
        }
    }
}

fn option(id: &str, name: &str) -> OptionItem {
    OptionItem {
        id: id.to_string(),
        name: name.to_string(),
    }
}

#[async_trait]
impl CatalogRepository for FakeCatalogRepo {
    async fn list_options(&self, kind: OptionKind) -> RepositoryResult<Vec<OptionItem>> {
        if self.fail_listing {
            return Err(RepositoryError::database("option listing failed"));
        }
        Ok(self
            .options
            .get(kind.collection())
            .cloned()
            .unwrap_or_default())
    }

    async fn find_product(&self, product_id: &str) -> RepositoryResult<serde_json::Value> {
        self.requested_product_ids
            .lock()
            .unwrap()
            .push(product_id.to_string());

        let matches: Vec<&serde_json::Value> = self
            .products
            .iter()
            .filter(|(id, _)| id == product_id)
            .map(|(_, row)| row)
            .collect();

        match matches.len() {
            0 => Err(RepositoryError::not_found(format!(
                "No product found for product_id {}",
                product_id
            ))),
            1 => Ok(matches[0].clone()),
            _ => Err(RepositoryError::database(format!(
                "Multiple product rows share product_id {}",
                product_id
            ))),
        }
    }

    async fn find_option_name(
        &self,
        kind: OptionKind,
        id: &str,
    ) -> RepositoryResult<Option<String>> {
        Ok(self
            .options
            .get(kind.collection())
            .and_then(|items| items.iter().find(|i| i.id == id))
            .map(|i| i.name.clone()))
    }
}

/// Mailer recording sent messages, or failing every send.
#[derive(Default)]
pub struct FakeMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: bool,
}

#[async_trait]
impl EmailSender for FakeMailer {
    async fn send_email(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.fail {
            return Err(EmailError::SmtpError("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub const TEST_SALE_EMAIL: &str = "sales@example.com";

pub fn quote_service(
    quote_repo: Arc<FakeQuoteRepo>,
    notification_repo: Arc<FakeNotificationRepo>,
    catalog_repo: Arc<FakeCatalogRepo>,
    mailer: Arc<FakeMailer>,
) -> Arc<QuoteServiceImpl> {
    Arc::new(QuoteServiceImpl {
        quote_repo,
        notification_repo,
        catalog_repo,
        mailer,
        sale_email: TEST_SALE_EMAIL.to_string(),
    })
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
