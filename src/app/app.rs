use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::app_conf::AppConfig;
use crate::config::email_conf::EmailConfig;
use crate::config::mongo_conf::MongoConfig;
use crate::repository::catalog_repo::{CatalogRepository, MongoCatalogRepository};
use crate::repository::notification_repo::{MongoNotificationRepository, NotificationRepository};
use crate::repository::quote_repo::{MongoQuoteRepository, QuoteRepository};
use crate::router::catalog_router::catalog_router;
use crate::router::quote_router::quote_router;
use crate::service::catalog_service::CatalogServiceImpl;
use crate::service::quote_service::QuoteServiceImpl;
use crate::util::email::{EmailSender, SmtpEmailService};

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();

        // Startup fails fast when database or mail configuration is absent.
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");
        let email_config = EmailConfig::from_env().expect("Email config error");

        let db = crate::repository::connect(&mongo_config)
            .await
            .expect("MongoDB connection error");

        let quote_repo: Arc<dyn QuoteRepository> = Arc::new(MongoQuoteRepository::new(&db));
        let notification_repo: Arc<dyn NotificationRepository> =
            Arc::new(MongoNotificationRepository::new(&db));
        let catalog_repo: Arc<dyn CatalogRepository> =
            Arc::new(MongoCatalogRepository::new(db.clone()));

        let mailer: Arc<dyn EmailSender> =
            Arc::new(SmtpEmailService::new(email_config.clone()).expect("Email service error"));

        let catalog_service = Arc::new(CatalogServiceImpl {
            catalog_repo: catalog_repo.clone(),
        });
        let quote_service = Arc::new(QuoteServiceImpl {
            quote_repo,
            notification_repo,
            catalog_repo,
            mailer,
            sale_email: email_config.sale_email.clone(),
        });

        let router = Self::create_router(catalog_service, quote_service);
        App { config, router }
    }

    fn create_router(
        catalog_service: Arc<CatalogServiceImpl>,
        quote_service: Arc<QuoteServiceImpl>,
    ) -> Router {
        Router::new()
            .merge(catalog_router(catalog_service))
            .merge(quote_router(quote_service))
            .route("/", get(|| async { "Backend server is running" }))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router).await.expect("Failed to start server");
    }
}
