mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use aluquote_backend::router::quote_router::quote_router;

use common::{
    post_json, quote_service, FakeCatalogRepo, FakeMailer, FakeNotificationRepo, FakeQuoteRepo,
    TEST_SALE_EMAIL,
};

struct TestApp {
    app: Router,
    quote_repo: Arc<FakeQuoteRepo>,
    notification_repo: Arc<FakeNotificationRepo>,
    mailer: Arc<FakeMailer>,
}

fn setup() -> TestApp {
    setup_with(
        FakeQuoteRepo::default(),
        FakeNotificationRepo::default(),
        FakeMailer::default(),
    )
}

fn setup_with(
    quote_repo: FakeQuoteRepo,
    notification_repo: FakeNotificationRepo,
    mailer: FakeMailer,
) -> TestApp {
    let quote_repo = Arc::new(quote_repo);
    let notification_repo = Arc::new(notification_repo);
    let mailer = Arc::new(mailer);
    let catalog_repo = Arc::new(FakeCatalogRepo::seeded());

    let service = quote_service(
        quote_repo.clone(),
        notification_repo.clone(),
        catalog_repo,
        mailer.clone(),
    );

    TestApp {
        app: quote_router(service),
        quote_repo,
        notification_repo,
        mailer,
    }
}

fn valid_payload() -> Value {
    json!({
        "customerName": "Alice Nguyen",
        "customerPhone": "+84 90 000 0000",
        "productId": "A1H2G3P4",
        "actualWidth": 120.0,
        "actualHeight": 80.5,
        "actualDepth": 4.0,
        "quantity": 2,
        "totalPrice": 1500.0,
        "aluminum_id": "A1",
        "handle_id": "H2",
        "glass_id": "G3",
        "part_id": "P4"
    })
}

#[tokio::test]
async fn test_valid_submission_creates_quote_and_notification() {
    let ctx = setup();

    let resp = ctx
        .app
        .clone()
        .oneshot(post_json("/api/quotes", valid_payload()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Quote submitted successfully!");

    let quotes = ctx.quote_repo.created.lock().unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].customer_name, "Alice Nguyen");
    assert_eq!(quotes[0].product_id, "A1H2G3P4");
    assert_eq!(quotes[0].quantity, 2);

    let notifications = ctx.notification_repo.created.lock().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].quote_id, quotes[0].id.unwrap());
    assert!(notifications[0].message.contains("Alice Nguyen"));
    assert!(notifications[0].message.contains("+84 90 000 0000"));
    assert!(notifications[0].message.contains("A1H2G3P4"));
}

#[tokio::test]
async fn test_submission_sends_email_with_resolved_option_names() {
    let ctx = setup();

    let resp = ctx
        .app
        .clone()
        .oneshot(post_json("/api/quotes", valid_payload()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let sent = ctx.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, TEST_SALE_EMAIL);
    assert_eq!(sent[0].subject, "New quote request");

    let text = sent[0].text_body.as_deref().unwrap();
    assert!(text.contains("Silver anodized"));
    assert!(text.contains("Bar handle"));
    assert!(text.contains("Tempered 8mm"));
    assert!(text.contains("Sliding door"));
    assert!(text.contains("120 x 80.5 x 4"));

    let html = sent[0].html_body.as_deref().unwrap();
    assert!(html.contains("Alice Nguyen"));
    assert!(html.contains("Silver anodized"));
}

#[tokio::test]
async fn test_missing_any_required_field_is_rejected() {
    let required = [
        "customerName",
        "customerPhone",
        "productId",
        "actualWidth",
        "actualHeight",
        "actualDepth",
        "quantity",
        "totalPrice",
    ];

    for field in required {
        let ctx = setup();
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove(field);

        let resp = ctx
            .app
            .clone()
            .oneshot(post_json("/api/quotes", payload))
            .await
            .unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "payload without {} should be rejected",
            field
        );

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert!(
            body["message"].as_str().unwrap().contains(field),
            "error should name the missing field {}",
            field
        );

        assert!(ctx.quote_repo.created.lock().unwrap().is_empty());
        assert!(ctx.notification_repo.created.lock().unwrap().is_empty());
        assert!(ctx.mailer.sent.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_zero_values_are_rejected_as_missing() {
    for (field, zero) in [
        ("actualWidth", json!(0.0)),
        ("actualHeight", json!(0.0)),
        ("actualDepth", json!(0.0)),
        ("quantity", json!(0)),
        ("totalPrice", json!(0.0)),
    ] {
        let ctx = setup();
        let mut payload = valid_payload();
        payload[field] = zero;

        let resp = ctx
            .app
            .clone()
            .oneshot(post_json("/api/quotes", payload))
            .await
            .unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "zero-valued {} should be rejected",
            field
        );

        assert!(ctx.quote_repo.created.lock().unwrap().is_empty());
        assert!(ctx.notification_repo.created.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_empty_string_field_is_rejected() {
    let ctx = setup();
    let mut payload = valid_payload();
    payload["customerName"] = json!("");

    let resp = ctx
        .app
        .clone()
        .oneshot(post_json("/api/quotes", payload))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.quote_repo.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_email_failure_does_not_change_outcome() {
    let ctx = setup_with(
        FakeQuoteRepo::default(),
        FakeNotificationRepo::default(),
        FakeMailer {
            fail: true,
            ..FakeMailer::default()
        },
    );

    let resp = ctx
        .app
        .clone()
        .oneshot(post_json("/api/quotes", valid_payload()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    assert_eq!(ctx.quote_repo.created.lock().unwrap().len(), 1);
    assert_eq!(ctx.notification_repo.created.lock().unwrap().len(), 1);
    assert!(ctx.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_quote_insert_failure_is_fatal() {
    let ctx = setup_with(
        FakeQuoteRepo {
            fail: true,
            ..FakeQuoteRepo::default()
        },
        FakeNotificationRepo::default(),
        FakeMailer::default(),
    );

    let resp = ctx
        .app
        .clone()
        .oneshot(post_json("/api/quotes", valid_payload()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Failed to save quote");

    assert!(ctx.notification_repo.created.lock().unwrap().is_empty());
    assert!(ctx.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_notification_insert_failure_is_fatal() {
    let ctx = setup_with(
        FakeQuoteRepo::default(),
        FakeNotificationRepo {
            fail: true,
            ..FakeNotificationRepo::default()
        },
        FakeMailer::default(),
    );

    let resp = ctx
        .app
        .clone()
        .oneshot(post_json("/api/quotes", valid_payload()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The quote itself was stored, but no email goes out.
    assert_eq!(ctx.quote_repo.created.lock().unwrap().len(), 1);
    assert!(ctx.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_option_ids_fall_back_to_placeholder() {
    let ctx = setup();
    let mut payload = valid_payload();
    payload["aluminum_id"] = json!("ZZ");
    payload.as_object_mut().unwrap().remove("glass_id");

    let resp = ctx
        .app
        .clone()
        .oneshot(post_json("/api/quotes", payload))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let sent = ctx.mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let text = sent[0].text_body.as_deref().unwrap();
    assert!(text.contains("Aluminum type: Unknown"));
    assert!(text.contains("Glass type: Unknown"));
    // The known selections still resolve.
    assert!(text.contains("Handle type: Bar handle"));
    assert!(text.contains("Part type: Sliding door"));
}
