/// 결제 게이트웨이 연동(리다이렉트 소스 방식)
/// 1. 소스 생성 -> 사용자를 체크아웃 URL로 이동
/// 2. 콜백 복귀 후 소스 상태 재조회
/// 3. chargeable 소스에 대한 결제 생성
// region:    --- Imports
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
// endregion: --- Imports

// 결제 통화(고정)와 결제 수단 태그
pub const CURRENCY: &str = "PHP";
pub const SOURCE_TYPE: &str = "gcash";

// region:    --- Gateway Error

/// 게이트웨이 에러
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("source response is missing a source id")]
    MissingSourceId,

    #[error("source response is missing a checkout url")]
    MissingCheckoutUrl,

    #[error("reservation has no payment source on record")]
    NoSourceOnRecord,
}

// endregion: --- Gateway Error

// region:    --- Gateway Model

/// 결제 성공/실패 복귀 URL 쌍
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectPair {
    pub success: String,
    pub failed: String,
}

/// 소스 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    Pending,
    Chargeable,
    Cancelled,
    Expired,
    Unknown,
}

impl SourceStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => SourceStatus::Pending,
            "chargeable" => SourceStatus::Chargeable,
            "cancelled" => SourceStatus::Cancelled,
            "expired" => SourceStatus::Expired,
            _ => SourceStatus::Unknown,
        }
    }
}

/// 생성/조회된 결제 소스
#[derive(Debug, Clone)]
pub struct PaymentSource {
    pub id: String,
    pub status: SourceStatus,
    pub checkout_url: Option<String>,
}

// endregion: --- Gateway Model

// region:    --- Wire Format

#[derive(Serialize)]
struct SourceRequest {
    data: SourceRequestData,
}

#[derive(Serialize)]
struct SourceRequestData {
    attributes: SourceAttributes,
}

#[derive(Serialize)]
struct SourceAttributes {
    amount: i64,
    currency: &'static str,
    r#type: &'static str,
    redirect: RedirectPair,
}

#[derive(Deserialize)]
struct SourceEnvelope {
    data: SourceData,
}

#[derive(Deserialize)]
struct SourceData {
    #[serde(default)]
    id: String,
    attributes: SourceResponseAttributes,
}

#[derive(Deserialize)]
struct SourceResponseAttributes {
    #[serde(default)]
    status: String,
    #[serde(default)]
    redirect: Option<RedirectResponse>,
}

#[derive(Deserialize)]
struct RedirectResponse {
    #[serde(default)]
    checkout_url: Option<String>,
}

#[derive(Serialize)]
struct PaymentRequest {
    data: PaymentRequestData,
}

#[derive(Serialize)]
struct PaymentRequestData {
    attributes: PaymentAttributes,
}

#[derive(Serialize)]
struct PaymentAttributes {
    amount: i64,
    currency: &'static str,
    description: String,
    source: PaymentSourceRef,
}

#[derive(Serialize)]
struct PaymentSourceRef {
    id: String,
    r#type: &'static str,
}

#[derive(Deserialize)]
struct PaymentEnvelope {
    data: PaymentData,
}

#[derive(Deserialize)]
struct PaymentData {
    id: String,
}

// endregion: --- Wire Format

// region:    --- Payment Gateway Trait

/// 결제 게이트웨이 트레이트
#[async_trait]
pub trait PaymentGateway {
    /// 리다이렉트 소스 생성(금액은 최소 화폐 단위)
    async fn create_source(
        &self,
        amount: i64,
        reservation_id: i64,
    ) -> Result<PaymentSource, GatewayError>;

    /// 소스 상태 조회
    async fn retrieve_source(&self, source_id: &str) -> Result<PaymentSource, GatewayError>;

    /// 소스에 대한 결제 생성, 결제 식별자 반환
    async fn create_payment(
        &self,
        source_id: &str,
        amount: i64,
        description: &str,
    ) -> Result<String, GatewayError>;
}

// endregion: --- Payment Gateway Trait

// region:    --- PayMongo Client

/// 게이트웨이 설정
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub api_base_url: String,
    pub secret_key: String,
    pub callback_base_url: String,
}

impl PaymentConfig {
    /// 환경 변수에서 설정 읽기
    pub fn from_env() -> Self {
        PaymentConfig {
            api_base_url: std::env::var("PAYMONGO_API_URL")
                .unwrap_or_else(|_| "https://api.paymongo.com/v1".to_string()),
            secret_key: std::env::var("PAYMONGO_SECRET_KEY")
                .expect("PAYMONGO_SECRET_KEY must be set"),
            callback_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}

/// PayMongo 클라이언트 구현체
pub struct PayMongoClient {
    http: reqwest::Client,
    config: PaymentConfig,
}

impl PayMongoClient {
    pub fn new(config: PaymentConfig) -> Self {
        PayMongoClient {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// 예약 식별자가 붙은 복귀 URL 쌍 생성
    pub fn redirect_pair(&self, reservation_id: i64) -> RedirectPair {
        let base = self.config.callback_base_url.trim_end_matches('/');
        RedirectPair {
            success: format!("{base}/payments/success?reservation_id={reservation_id}"),
            failed: format!("{base}/payments/failed?reservation_id={reservation_id}"),
        }
    }

    /// 비-2xx 응답은 상태/바디를 담아 에러로 변환
    async fn read_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn read_source(response: reqwest::Response) -> Result<PaymentSource, GatewayError> {
        let envelope = Self::read_body::<SourceEnvelope>(response).await?;
        if envelope.data.id.is_empty() {
            return Err(GatewayError::MissingSourceId);
        }
        Ok(PaymentSource {
            id: envelope.data.id,
            status: SourceStatus::parse(&envelope.data.attributes.status),
            checkout_url: envelope
                .data
                .attributes
                .redirect
                .and_then(|redirect| redirect.checkout_url),
        })
    }
}

#[async_trait]
impl PaymentGateway for PayMongoClient {
    async fn create_source(
        &self,
        amount: i64,
        reservation_id: i64,
    ) -> Result<PaymentSource, GatewayError> {
        info!(
            "{:<12} --> 결제 소스 생성: 예약 id {}, 금액 {}",
            "Gateway", reservation_id, amount
        );
        let body = SourceRequest {
            data: SourceRequestData {
                attributes: SourceAttributes {
                    amount,
                    currency: CURRENCY,
                    r#type: SOURCE_TYPE,
                    redirect: self.redirect_pair(reservation_id),
                },
            },
        };

        let response = self
            .http
            .post(format!("{}/sources", self.config.api_base_url))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .json(&body)
            .send()
            .await?;

        Self::read_source(response).await
    }

    async fn retrieve_source(&self, source_id: &str) -> Result<PaymentSource, GatewayError> {
        info!("{:<12} --> 결제 소스 조회: {}", "Gateway", source_id);
        let response = self
            .http
            .get(format!("{}/sources/{}", self.config.api_base_url, source_id))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .send()
            .await?;

        Self::read_source(response).await
    }

    async fn create_payment(
        &self,
        source_id: &str,
        amount: i64,
        description: &str,
    ) -> Result<String, GatewayError> {
        info!(
            "{:<12} --> 결제 생성: 소스 {}, 금액 {}",
            "Gateway", source_id, amount
        );
        let body = PaymentRequest {
            data: PaymentRequestData {
                attributes: PaymentAttributes {
                    amount,
                    currency: CURRENCY,
                    description: description.to_string(),
                    source: PaymentSourceRef {
                        id: source_id.to_string(),
                        r#type: "source",
                    },
                },
            },
        };

        let response = self
            .http
            .post(format!("{}/payments", self.config.api_base_url))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .json(&body)
            .send()
            .await?;

        let envelope = Self::read_body::<PaymentEnvelope>(response).await?;
        Ok(envelope.data.id)
    }
}

// endregion: --- PayMongo Client

// region:    --- Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_status_parse() {
        assert_eq!(SourceStatus::parse("pending"), SourceStatus::Pending);
        assert_eq!(SourceStatus::parse("chargeable"), SourceStatus::Chargeable);
        assert_eq!(SourceStatus::parse("cancelled"), SourceStatus::Cancelled);
        assert_eq!(SourceStatus::parse("expired"), SourceStatus::Expired);
        assert_eq!(SourceStatus::parse("whatever"), SourceStatus::Unknown);
    }

    #[test]
    fn test_redirect_pair_carries_reservation_id() {
        let client = PayMongoClient::new(PaymentConfig {
            api_base_url: "https://api.example.test/v1".to_string(),
            secret_key: "sk_test_123".to_string(),
            callback_base_url: "http://localhost:3000/".to_string(),
        });

        let pair = client.redirect_pair(42);
        assert_eq!(
            pair.success,
            "http://localhost:3000/payments/success?reservation_id=42"
        );
        assert_eq!(
            pair.failed,
            "http://localhost:3000/payments/failed?reservation_id=42"
        );
    }
}

// endregion: --- Tests
