use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::dto::quote_dto::SubmitQuoteRequest;
use crate::model::catalog::OptionKind;
use crate::model::quote::{Notification, Quote};
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::notification_repo::NotificationRepository;
use crate::repository::quote_repo::QuoteRepository;
use crate::util::email::{EmailMessage, EmailSender};
use crate::util::error::ServiceError;

/// Placeholder shown in the notification email when an option name cannot
/// be resolved.
pub const UNKNOWN_OPTION_NAME: &str = "Unknown";

const QUOTE_EMAIL_SUBJECT: &str = "New quote request";

/// Display names of the four selected options, resolved best-effort.
#[derive(Debug, Clone)]
pub struct OptionNames {
    pub aluminum: String,
    pub handle: String,
    pub glass: String,
    pub part: String,
}

/// The eight business fields of a quote after presence validation.
#[derive(Debug, Clone)]
pub struct ValidatedQuote {
    pub customer_name: String,
    pub customer_phone: String,
    pub product_id: String,
    pub actual_width: f64,
    pub actual_height: f64,
    pub actual_depth: f64,
    pub quantity: i64,
    pub total_price: f64,
}

#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn submit_quote(&self, request: SubmitQuoteRequest) -> Result<Quote, ServiceError>;
}

pub struct QuoteServiceImpl {
    pub quote_repo: Arc<dyn QuoteRepository>,
    pub notification_repo: Arc<dyn NotificationRepository>,
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub mailer: Arc<dyn EmailSender>,
    pub sale_email: String,
}

impl QuoteServiceImpl {
    /// Check the eight required fields of a quote payload.
    ///
    /// A field counts as missing when it is absent, an empty or whitespace
    /// string, or a numeric zero. The zero rule mirrors the frontend's
    /// contract: a zero-valued dimension, quantity or price is never a
    /// legitimate quote.
    pub fn validate(request: &SubmitQuoteRequest) -> Result<ValidatedQuote, Vec<&'static str>> {
        let mut missing = Vec::new();

        fn required_string(
            field: &Option<String>,
            name: &'static str,
            missing: &mut Vec<&'static str>,
        ) -> String {
            match field.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        }

        fn required_number(
            field: Option<f64>,
            name: &'static str,
            missing: &mut Vec<&'static str>,
        ) -> f64 {
            match field {
                Some(v) if v != 0.0 => v,
                _ => {
                    missing.push(name);
                    0.0
                }
            }
        }

        let customer_name = required_string(&request.customer_name, "customerName", &mut missing);
        let customer_phone =
            required_string(&request.customer_phone, "customerPhone", &mut missing);
        let product_id = required_string(&request.product_id, "productId", &mut missing);
        let actual_width = required_number(request.actual_width, "actualWidth", &mut missing);
        let actual_height = required_number(request.actual_height, "actualHeight", &mut missing);
        let actual_depth = required_number(request.actual_depth, "actualDepth", &mut missing);
        let quantity = match request.quantity {
            Some(q) if q != 0 => q,
            _ => {
                missing.push("quantity");
                0
            }
        };
        let total_price = required_number(request.total_price, "totalPrice", &mut missing);

        if missing.is_empty() {
            Ok(ValidatedQuote {
                customer_name,
                customer_phone,
                product_id,
                actual_width,
                actual_height,
                actual_depth,
                quantity,
                total_price,
            })
        } else {
            Err(missing)
        }
    }

    async fn resolve_option_name(&self, kind: OptionKind, id: Option<&str>) -> String {
        let id = match id.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return UNKNOWN_OPTION_NAME.to_string(),
        };
        match self.catalog_repo.find_option_name(kind, id).await {
            Ok(Some(name)) => name,
            Ok(None) => UNKNOWN_OPTION_NAME.to_string(),
            Err(e) => {
                warn!("Failed to resolve {} name for id {}: {}", kind.label(), id, e);
                UNKNOWN_OPTION_NAME.to_string()
            }
        }
    }

    /// Compose and send the sales notification email. Failures are logged
    /// and swallowed; the submission has already succeeded at this point.
    async fn send_notification_email(&self, quote: &Quote, request: &SubmitQuoteRequest) {
        let names = OptionNames {
            aluminum: self
                .resolve_option_name(OptionKind::Aluminum, request.aluminum_id.as_deref())
                .await,
            handle: self
                .resolve_option_name(OptionKind::Handle, request.handle_id.as_deref())
                .await,
            glass: self
                .resolve_option_name(OptionKind::Glass, request.glass_id.as_deref())
                .await,
            part: self
                .resolve_option_name(OptionKind::Part, request.part_id.as_deref())
                .await,
        };

        let sent_at = chrono::Local::now().format("%d/%m/%Y %H:%M:%S").to_string();
        let (text_body, html_body) = compose_quote_email(quote, &names, &sent_at);

        let message = EmailMessage::new(self.sale_email.clone(), QUOTE_EMAIL_SUBJECT.to_string())
            .with_text_body(text_body)
            .with_html_body(html_body);

        if let Err(e) = self.mailer.send_email(message).await {
            error!("Failed to send quote notification email: {}", e);
        }
    }
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
    #[instrument(skip(self, request))]
    async fn submit_quote(&self, request: SubmitQuoteRequest) -> Result<Quote, ServiceError> {
        info!("Submitting new quote request");

        let validated = Self::validate(&request).map_err(|missing| {
            ServiceError::InvalidInput(format!(
                "Missing required fields in quote data: {}",
                missing.join(", ")
            ))
        })?;

        let quote = Quote {
            id: None,
            customer_name: validated.customer_name,
            customer_phone: validated.customer_phone,
            product_id: validated.product_id,
            actual_width: validated.actual_width,
            actual_height: validated.actual_height,
            actual_depth: validated.actual_depth,
            quantity: validated.quantity,
            total_price: validated.total_price,
            created_at: None,
        };

        let saved = self.quote_repo.create(quote).await.map_err(|e| {
            error!("Failed to save quote: {}", e);
            ServiceError::InternalError("Failed to save quote".to_string())
        })?;
        let quote_id = saved
            .id
            .ok_or_else(|| ServiceError::InternalError("Failed to get inserted quote id".to_string()))?;

        // Notification insert is fatal: staff must never miss a stored quote.
        let notification = Notification {
            id: None,
            message: format!(
                "Customer {} ({}) has requested a quote for product {}.",
                saved.customer_name, saved.customer_phone, saved.product_id
            ),
            quote_id,
            created_at: None,
        };
        self.notification_repo
            .create(notification)
            .await
            .map_err(|e| {
                error!("Failed to create notification: {}", e);
                ServiceError::InternalError("Failed to create quote notification".to_string())
            })?;

        self.send_notification_email(&saved, &request).await;

        info!("Quote submitted successfully");
        Ok(saved)
    }
}

/// Build the notification email bodies (plain text, HTML).
pub fn compose_quote_email(quote: &Quote, names: &OptionNames, sent_at: &str) -> (String, String) {
    let text_body = format!(
        "New quote request\n\n\
         Sent: {sent_at}\n\
         Customer: {name}\n\
         Phone: {phone}\n\
         Product: {product}\n\n\
         - Aluminum type: {aluminum}\n\
         - Handle type: {handle}\n\
         - Glass type: {glass}\n\
         - Part type: {part}\n\
         - Dimensions: {width} x {height} x {depth}\n\
         - Quantity: {quantity}\n\
         - Total price: {price}\n",
        sent_at = sent_at,
        name = quote.customer_name,
        phone = quote.customer_phone,
        product = quote.product_id,
        aluminum = names.aluminum,
        handle = names.handle,
        glass = names.glass,
        part = names.part,
        width = quote.actual_width,
        height = quote.actual_height,
        depth = quote.actual_depth,
        quantity = quote.quantity,
        price = quote.total_price,
    );

    let html_body = format!(
        r#"<h2>📢 <b>New quote request</b></h2>
<p><b>Sent:</b> {sent_at}</p>
<p><b>👤 Customer:</b> {name}</p>
<p><b>📞 Phone:</b> {phone}</p>
<p><b>🛒 Product:</b> {product}</p>
<ul>
    <li><b>Aluminum type:</b> {aluminum}</li>
    <li><b>Handle type:</b> {handle}</li>
    <li><b>Glass type:</b> {glass}</li>
    <li><b>Part type:</b> {part}</li>
    <li><b>Dimensions:</b> {width} x {height} x {depth}</li>
    <li><b>Quantity:</b> {quantity}</li>
    <li><b>Total price:</b> {price}</li>
</ul>
<p><b>📩 Status:</b> Pending ✅</p>
"#,
        sent_at = html_escape::encode_text(sent_at),
        name = html_escape::encode_text(&quote.customer_name),
        phone = html_escape::encode_text(&quote.customer_phone),
        product = html_escape::encode_text(&quote.product_id),
        aluminum = html_escape::encode_text(&names.aluminum),
        handle = html_escape::encode_text(&names.handle),
        glass = html_escape::encode_text(&names.glass),
        part = html_escape::encode_text(&names.part),
        width = quote.actual_width,
        height = quote.actual_height,
        depth = quote.actual_depth,
        quantity = quote.quantity,
        price = quote.total_price,
    );

    (text_body, html_body)
}
