// Integration tests for payment initiation (OAuth strategy)
//
// POST /pay -> token exchange -> bearer-authenticated checkout, with the
// gateway's response relayed unchanged.

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use payrelay::config::NotifyMode;
use payrelay::payments::INITIATE_FAILURE;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[actix_web::test]
async fn test_pay_relays_checkout_response_unchanged() {
    let gateway = MockServer::start().await;
    mount_token(&gateway, 1).await;

    let checkout = checkout_response("ORDER-1");
    Mock::given(method("POST"))
        .and(path(format!("{}/checkout/v2/pay", PG_PATH)))
        .and(body_partial_json(json!({
            "amount": 10000,
            "currency": "INR",
            "expireAfter": 1200,
            "paymentFlow": { "type": "PG_CHECKOUT" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(checkout.clone()))
        .expect(1)
        .mount(&gateway)
        .await;

    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let mut resp = client
        .post("/pay")
        .send_json(&json!({ "amount": 100 }))
        .await
        .unwrap();

    assert_ok(&resp);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, checkout);
}

#[actix_web::test]
async fn test_pay_sends_bearer_token_and_redirect_url() {
    let gateway = MockServer::start().await;
    mount_token(&gateway, 1).await;
    mount_checkout(&gateway, 200, checkout_response("ORDER-2"), 1).await;

    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let resp = client
        .post("/pay")
        .send_json(&json!({ "amount": "250.50" }))
        .await
        .unwrap();
    assert_ok(&resp);

    let requests = gateway.received_requests().await.unwrap();
    let checkout = requests
        .iter()
        .find(|r| r.url.path().ends_with("/checkout/v2/pay"))
        .expect("checkout request was sent");
    let body: Value = checkout.body_json().unwrap();

    assert_eq!(body["amount"], 25050);
    let merchant_order_id = body["merchantOrderId"].as_str().unwrap();
    assert!(merchant_order_id.starts_with("ORDER-"));
    assert_eq!(
        body["paymentFlow"]["merchantUrls"]["redirectUrl"],
        format!("{}/payment/status/{}", BACKEND_URL, merchant_order_id)
    );

    // Token exchange is a form post carrying the client credentials
    let token = requests
        .iter()
        .find(|r| r.url.path() == TOKEN_PATH)
        .expect("token request was sent");
    let form = String::from_utf8(token.body.clone()).unwrap();
    assert!(form.contains(&format!("client_secret={}", CLIENT_SECRET)));
    assert!(form.contains("client_version=1"));
}

#[actix_web::test]
async fn test_pay_accepts_form_body() {
    let gateway = MockServer::start().await;
    mount_token(&gateway, 1).await;
    mount_checkout(&gateway, 200, checkout_response("ORDER-3"), 1).await;

    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let resp = client
        .post("/pay")
        .send_form(&[("amount", "75")])
        .await
        .unwrap();

    assert_ok(&resp);
}

#[actix_web::test]
async fn test_invalid_amounts_never_reach_gateway() {
    let gateway = MockServer::start().await;
    // Zero-call expectations are verified when the mock server drops
    mount_token(&gateway, 0).await;
    mount_checkout(&gateway, 200, checkout_response("unused"), 0).await;

    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    for body in [
        json!({ "amount": 0 }),
        json!({ "amount": -5 }),
        json!({ "amount": "abc" }),
        json!({ "amount": null }),
        json!({}),
    ] {
        let mut resp = client.post("/pay").send_json(&body).await.unwrap();
        assert_bad_request(&resp);

        let error: Value = resp.json().await.unwrap();
        assert_error_message(&error, "Validation error: Invalid amount");
    }
}

#[actix_web::test]
async fn test_out_of_range_amounts_rejected_before_token_exchange() {
    let gateway = MockServer::start().await;
    mount_token(&gateway, 0).await;
    mount_checkout(&gateway, 200, checkout_response("unused"), 0).await;

    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    for amount in ["1000000000000000000000000000", "100000000000000000000"] {
        let mut resp = client
            .post("/pay")
            .send_json(&json!({ "amount": amount }))
            .await
            .unwrap();
        assert_bad_request(&resp);

        let error: Value = resp.json().await.unwrap();
        assert_error_message(&error, "Validation error: Invalid amount: out of range");
    }

    assert!(gateway.received_requests().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_token_failure_returns_500_with_details() {
    let gateway = MockServer::start().await;
    mount_token_failure(
        &gateway,
        401,
        json!({ "code": "UNAUTHORIZED", "message": "Client authentication failed" }),
    )
    .await;
    mount_checkout(&gateway, 200, checkout_response("unused"), 0).await;

    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let mut resp = client
        .post("/pay")
        .send_json(&json!({ "amount": 100 }))
        .await
        .unwrap();

    assert_server_error(&resp);
    let body: Value = resp.json().await.unwrap();
    assert_error_message(&body, INITIATE_FAILURE);
    assert_eq!(body["details"]["code"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_token_response_without_access_token_is_a_failure() {
    let gateway = MockServer::start().await;
    mount_token_failure(&gateway, 200, json!({ "token_type": "O-Bearer" })).await;
    mount_checkout(&gateway, 200, checkout_response("unused"), 0).await;

    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let mut resp = client
        .post("/pay")
        .send_json(&json!({ "amount": 100 }))
        .await
        .unwrap();

    assert_server_error(&resp);
    let body: Value = resp.json().await.unwrap();
    assert_error_message(&body, INITIATE_FAILURE);
    assert_eq!(body["details"]["token_type"], "O-Bearer");
}

#[actix_web::test]
async fn test_checkout_failure_returns_500_with_details() {
    let gateway = MockServer::start().await;
    mount_token(&gateway, 1).await;
    mount_checkout(
        &gateway,
        400,
        json!({ "code": "BAD_REQUEST", "message": "Please check the inputs you have provided." }),
        1,
    )
    .await;

    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let mut resp = client
        .post("/pay")
        .send_json(&json!({ "amount": 100 }))
        .await
        .unwrap();

    assert_server_error(&resp);
    let body: Value = resp.json().await.unwrap();
    assert_error_message(&body, INITIATE_FAILURE);
    assert_eq!(body["details"]["code"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_health_reports_gateway() {
    let gateway = MockServer::start().await;
    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let mut resp = client.get("/health").send().await.unwrap();
    assert_ok(&resp);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"]["gateway_strategy"], "oauth");
    assert_eq!(body["service"]["notifications_enabled"], false);

    let mut resp = client.get("/").send().await.unwrap();
    assert_ok(&resp);
    let banner = resp.body().await.unwrap();
    assert!(String::from_utf8_lossy(&banner).contains("Welcome"));
}

#[actix_web::test]
async fn test_request_id_header_is_echoed() {
    let gateway = MockServer::start().await;
    let srv = spawn_app(oauth_config(&gateway.uri(), None, NotifyMode::Inline));
    let client = client_for(&srv);

    let resp = client
        .get("/health")
        .insert_header(("X-Request-ID", "trace-abc"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-abc");
}
