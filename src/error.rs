// region:    --- Imports
use crate::payment::GatewayError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
// endregion: --- Imports

// region:    --- Service Error

/// 서비스 공통 에러
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("authentication required")]
    Unauthorized,

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("payment gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl ServiceError {
    /// HTTP 상태 코드 매핑
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Gateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// 응답 바디에 싣는 에러 코드
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::Unauthorized => "UNAUTHORIZED",
            ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::Database(_) => "DATABASE_ERROR",
            ServiceError::Gateway(_) => "GATEWAY_ERROR",
        }
    }

    /// 단건 조회 에러 변환: 없는 행은 NotFound로
    pub fn from_sqlx(e: sqlx::Error, entity: &'static str, id: i64) -> Self {
        match e {
            sqlx::Error::RowNotFound => ServiceError::NotFound { entity, id },
            e => ServiceError::Database(e),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "code": self.error_code(),
        }));
        (status, body).into_response()
    }
}

// endregion: --- Service Error

// region:    --- Tests


// endregion: --- Tests
