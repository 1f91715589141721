/// PayMongoClient 게이트웨이 연동 테스트(wiremock)
use rental_service::payment::{
    GatewayError, PayMongoClient, PaymentConfig, PaymentGateway, SourceStatus,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// "sk_test_123:"의 Basic 인증 헤더
const BASIC_AUTH: &str = "Basic c2tfdGVzdF8xMjM6";

/// 모의 게이트웨이 서버에 붙는 클라이언트 구성
async fn setup() -> (MockServer, PayMongoClient) {
    let server = MockServer::start().await;
    let client = PayMongoClient::new(PaymentConfig {
        api_base_url: server.uri(),
        secret_key: "sk_test_123".to_string(),
        callback_base_url: "http://localhost:3000".to_string(),
    });
    (server, client)
}

/// 소스 생성 테스트
#[tokio::test]
async fn test_create_source() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/sources"))
        .and(header("Authorization", BASIC_AUTH))
        .and(body_partial_json(json!({
            "data": {
                "attributes": {
                    "amount": 600_000,
                    "currency": "PHP",
                    "type": "gcash",
                    "redirect": {
                        "success": "http://localhost:3000/payments/success?reservation_id=7",
                        "failed": "http://localhost:3000/payments/failed?reservation_id=7"
                    }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "src_test_1",
                "attributes": {
                    "status": "pending",
                    "redirect": {
                        "checkout_url": "https://checkout.example.test/src_test_1"
                    }
                }
            }
        })))
        .mount(&server)
        .await;

    let source = client.create_source(600_000, 7).await.unwrap();

    assert_eq!(source.id, "src_test_1");
    assert_eq!(source.status, SourceStatus::Pending);
    assert_eq!(
        source.checkout_url.as_deref(),
        Some("https://checkout.example.test/src_test_1")
    );
}

/// 소스 식별자가 빠진 응답 처리 테스트
#[tokio::test]
async fn test_create_source_missing_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "attributes": {
                    "status": "pending",
                    "redirect": { "checkout_url": "https://checkout.example.test/x" }
                }
            }
        })))
        .mount(&server)
        .await;

    let result = client.create_source(600_000, 7).await;

    assert!(
        matches!(result, Err(GatewayError::MissingSourceId)),
        "expected MissingSourceId, got: {result:?}"
    );
}

/// 게이트웨이 비-2xx 응답 처리 테스트
#[tokio::test]
async fn test_create_source_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/sources"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let result = client.create_source(600_000, 7).await;

    assert!(
        matches!(result, Err(GatewayError::Api { status: 401, .. })),
        "expected Api error, got: {result:?}"
    );
}

/// 소스 상태 조회 테스트
#[tokio::test]
async fn test_retrieve_source() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/sources/src_test_9"))
        .and(header("Authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "src_test_9",
                "attributes": { "status": "chargeable" }
            }
        })))
        .mount(&server)
        .await;

    let source = client.retrieve_source("src_test_9").await.unwrap();

    assert_eq!(source.id, "src_test_9");
    assert_eq!(source.status, SourceStatus::Chargeable);
    assert_eq!(source.checkout_url, None);
}

/// 결제 생성 테스트
#[tokio::test]
async fn test_create_payment() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(header("Authorization", BASIC_AUTH))
        .and(body_partial_json(json!({
            "data": {
                "attributes": {
                    "amount": 600_000,
                    "currency": "PHP",
                    "description": "Reservation #7",
                    "source": { "id": "src_test_9", "type": "source" }
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "pay_test_1" }
        })))
        .mount(&server)
        .await;

    let payment_id = client
        .create_payment("src_test_9", 600_000, "Reservation #7")
        .await
        .unwrap();

    assert_eq!(payment_id, "pay_test_1");
}
