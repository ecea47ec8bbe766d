// Integration tests for inbound webhook authentication
//
// POST /webhooks must carry `Authorization: sha256_hex(username:password)`
// of the configured credential pair.

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use payrelay::config::NotifyMode;
use payrelay::gateways::services::compute_static_token;
use serde_json::{json, Value};
use wiremock::MockServer;

fn completed_event() -> Value {
    json!({
        "event": "checkout.order.completed",
        "payload": {
            "orderId": "OMO2403282020198641071317",
            "merchantId": MERCHANT_ID,
            "merchantOrderId": "ORDER-1717171717171-1a2b3c4d",
            "state": "COMPLETED",
            "amount": 10000,
            "paymentDetails": [
                { "paymentMode": "UPI_QR", "transactionId": "OM12334", "state": "COMPLETED" }
            ]
        }
    })
}

#[actix_web::test]
async fn test_valid_authorization_is_accepted() {
    let gateway = MockServer::start().await;
    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let mut resp = client
        .post("/webhooks")
        .insert_header(("Authorization", webhook_authorization()))
        .send_json(&completed_event())
        .await
        .unwrap();

    assert_ok(&resp);
    let body = resp.body().await.unwrap();
    assert_eq!(&body[..], b"Webhook received");
}

#[actix_web::test]
async fn test_failed_event_is_accepted() {
    let gateway = MockServer::start().await;
    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let resp = client
        .post("/webhooks")
        .insert_header(("Authorization", webhook_authorization()))
        .send_json(&json!({
            "event": "checkout.order.failed",
            "payload": { "merchantOrderId": "ORDER-1", "state": "FAILED" }
        }))
        .await
        .unwrap();

    assert_ok(&resp);
}

#[actix_web::test]
async fn test_missing_authorization_is_rejected() {
    let gateway = MockServer::start().await;
    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let mut resp = client
        .post("/webhooks")
        .send_json(&completed_event())
        .await
        .unwrap();

    assert_unauthorized(&resp);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], 401);
}

#[actix_web::test]
async fn test_wrong_credentials_are_rejected() {
    let gateway = MockServer::start().await;
    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    for header in [
        compute_static_token(WEBHOOK_USERNAME, "wrong-password"),
        compute_static_token("someone-else", WEBHOOK_PASSWORD),
        format!("{}:{}", WEBHOOK_USERNAME, WEBHOOK_PASSWORD),
        webhook_authorization().to_uppercase(),
    ] {
        let resp = client
            .post("/webhooks")
            .insert_header(("Authorization", header.as_str()))
            .send_json(&completed_event())
            .await
            .unwrap();

        assert_unauthorized(&resp);
    }
}

#[actix_web::test]
async fn test_authorization_is_checked_before_body() {
    let gateway = MockServer::start().await;
    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let resp = client
        .post("/webhooks")
        .insert_header(("Content-Type", "application/json"))
        .send_body("not json")
        .await
        .unwrap();

    assert_unauthorized(&resp);
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let gateway = MockServer::start().await;
    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let resp = client
        .post("/webhooks")
        .insert_header(("Authorization", webhook_authorization()))
        .insert_header(("Content-Type", "application/json"))
        .send_body("{\"payload\": ")
        .await
        .unwrap();

    assert_bad_request(&resp);
}
