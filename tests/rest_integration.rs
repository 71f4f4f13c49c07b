use std::sync::Arc;

use reqwest::StatusCode;
use rust_decimal::Decimal;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use itbit_api_client::auth::{
    Credentials, FixedClock, IncreasingNonce, SigningContext, StaticCredentials, sign_context,
};
use itbit_api_client::error::ItbitError;
use itbit_api_client::rest::ItbitClient;
use itbit_api_client::rest::trading::OrderRequest;
use itbit_api_client::types::{Currency, OrderSide, OrderStatus, Symbol};

const KEY: &str = "test_key";
const SECRET: &str = "test_secret";
const NOW_MS: u64 = 1_700_000_000_000;

fn build_client(server: &MockServer) -> ItbitClient {
    ItbitClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new(KEY, SECRET)))
        .clock(Arc::new(FixedClock(NOW_MS)))
        .user_id("u1")
        .build()
}

fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

/// Recompute the signature for a received request, signing `url` (the URL
/// the client was asked to call) and the bytes the server actually got.
fn assert_signed(request: &Request, url: &str) {
    assert_eq!(request.url.path(), reqwest::Url::parse(url).unwrap().path());
    assert_eq!(request.url.query(), reqwest::Url::parse(url).unwrap().query());

    let nonce: u64 = header(request, "x-auth-nonce").unwrap().parse().unwrap();
    let timestamp: u64 = header(request, "x-auth-timestamp").unwrap().parse().unwrap();
    assert_eq!(timestamp, NOW_MS);

    let context = SigningContext::new(
        request.method.as_str(),
        url,
        request.body.clone(),
        nonce,
        timestamp,
    );
    let expected = sign_context(&Credentials::new(KEY, SECRET), &context).unwrap();
    assert_eq!(header(request, "authorization"), Some(expected.authorization.as_str()));
    assert_eq!(header(request, "content-type"), Some("application/json"));
}

fn wallet_json(index: usize) -> serde_json::Value {
    serde_json::json!({
        "id": format!("w{index}"),
        "userId": "u1",
        "name": format!("Wallet {index}"),
        "balances": [
            {"currency": "XBT", "availableBalance": "0.5", "totalBalance": "1.0"}
        ]
    })
}

#[tokio::test]
async fn test_get_all_wallets_paginates_and_signs() {
    let server = MockServer::start().await;

    let first_page: Vec<_> = (0..50).map(wallet_json).collect();
    let second_page: Vec<_> = (50..53).map(wallet_json).collect();

    Mock::given(method("GET"))
        .and(path("/wallets"))
        .and(query_param("userId", "u1"))
        .and(query_param("page", "1"))
        .and(query_param("perPage", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first_page))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wallets"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(second_page))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let wallets = client.get_all_wallets().await.unwrap();

    assert_eq!(wallets.len(), 53);
    assert_eq!(wallets[52].id, "w52");
    assert_eq!(
        wallets[0].balance(&Currency::xbt()).unwrap().available,
        "0.5".parse::<Decimal>().unwrap()
    );

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(header(&requests[0], "x-auth-nonce"), Some("1"));
    assert_eq!(header(&requests[1], "x-auth-nonce"), Some("2"));

    let base = server.uri();
    assert_signed(&requests[0], &format!("{base}/wallets?userId=u1&page=1&perPage=50"));
    assert_signed(&requests[1], &format!("{base}/wallets?userId=u1&page=2&perPage=50"));
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_get_all_wallets_requires_user_id() {
    let server = MockServer::start().await;
    let client = ItbitClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new(KEY, SECRET)))
        .build();

    let err = client.get_all_wallets().await.unwrap_err();
    assert!(matches!(err, ItbitError::Config(_)));
    assert!(err.is_configuration());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_credentials_sends_nothing() {
    let server = MockServer::start().await;

    let unconfigured = ItbitClient::builder().base_url(server.uri()).build();
    let err = unconfigured.get_wallet("w1").await.unwrap_err();
    assert!(matches!(err, ItbitError::MissingCredentials));

    let nonce = Arc::new(IncreasingNonce::new());
    let empty_secret = ItbitClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new(KEY, "")))
        .nonce_provider(nonce.clone())
        .build();
    let err = empty_secret.get_wallet("w1").await.unwrap_err();
    assert!(matches!(err, ItbitError::MissingCredentials));
    assert_eq!(nonce.last(), 0);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unsendable_client_key_keeps_nonce() {
    let server = MockServer::start().await;

    let nonce = Arc::new(IncreasingNonce::new());
    let client = ItbitClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new("bad\nkey", SECRET)))
        .nonce_provider(nonce.clone())
        .build();

    let err = client.get_wallet("w1").await.unwrap_err();
    assert!(matches!(err, ItbitError::Config(_)));
    assert!(err.is_configuration());
    assert_eq!(nonce.last(), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_new_order_signs_exact_body() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "id": "o1",
        "walletId": "w1",
        "side": "buy",
        "instrument": "XBTUSD",
        "type": "limit",
        "currency": "XBT",
        "amount": "1.5",
        "displayAmount": "1.5",
        "price": "250.25",
        "volumeWeightedAveragePrice": "0",
        "amountFilled": "0",
        "createdTime": "2023-11-14T22:13:20Z",
        "status": "submitted",
        "metadata": {},
        "clientOrderIdentifier": "mine-1"
    });

    Mock::given(method("POST"))
        .and(path("/wallets/w1/orders"))
        .and(body_partial_json(serde_json::json!({
            "side": "buy",
            "type": "limit",
            "amount": "1.5",
            "price": "250.25",
            "instrument": "XBTUSD",
            "clientOrderIdentifier": "mine-1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let order = OrderRequest::limit(
        OrderSide::Buy,
        Symbol::xbt_usd(),
        Currency::xbt(),
        "1.5".parse().unwrap(),
        "250.25".parse().unwrap(),
    )
    .client_order_identifier("mine-1");

    let placed = client.new_order("w1", &order).await.unwrap();
    assert_eq!(placed.id, "o1");
    assert_eq!(placed.status, OrderStatus::Submitted);
    assert_eq!(placed.client_order_identifier.as_deref(), Some("mine-1"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, serde_json::to_vec(&order).unwrap());
    assert_signed(&requests[0], &format!("{}/wallets/w1/orders", server.uri()));
}

#[tokio::test]
async fn test_cancel_order_uses_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/wallets/w1/orders/o1"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    client.cancel_order("w1", "o1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_signed(&requests[0], &format!("{}/wallets/w1/orders/o1", server.uri()));
}

#[tokio::test]
async fn test_remote_rejection_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallets/w1/orders/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "code": 10003,
            "description": "Order not found",
            "requestId": "req-42"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_order("w1", "missing").await.unwrap_err();

    match err {
        ItbitError::Api { status, error } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(error.code, 10003);
            assert_eq!(error.description, "Order not found");
            assert_eq!(error.request_id, "req-42");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_undecodable_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallets/w1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_wallet("w1").await.unwrap_err();

    match err {
        ItbitError::InvalidResponse(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrent_requests_never_share_a_nonce() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wallets/w1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wallet_json(1)))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let mut handles = Vec::new();
    for _ in 0..16 {
        let client = client.clone();
        handles.push(tokio::spawn(async move { client.get_wallet("w1").await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let requests = server.received_requests().await.unwrap();
    let mut nonces: Vec<u64> = requests
        .iter()
        .map(|r| header(r, "x-auth-nonce").unwrap().parse().unwrap())
        .collect();
    nonces.sort_unstable();
    assert_eq!(nonces, (1..=16).collect::<Vec<u64>>());

    let url = format!("{}/wallets/w1", server.uri());
    for request in &requests {
        assert_signed(request, &url);
    }
}
