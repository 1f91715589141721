/// 세션 컨텍스트
/// 자격 증명 검증은 업스트림 인증 서비스가 담당하고,
/// 검증된 사용자 식별자만 요청 헤더로 전달받는다
// region:    --- Imports
use crate::error::ServiceError;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
// endregion: --- Imports

// 업스트림이 채우는 사용자 식별 헤더
pub const SESSION_USER_HEADER: &str = "x-session-user";

// region:    --- Session Context

/// 요청 단위로 전달되는 행위자 식별 정보
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    /// 헤더가 없거나 비어 있으면 어떤 I/O도 하기 전에 401
    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(SESSION_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ServiceError::Unauthorized)?;

        Ok(SessionContext {
            user_id: user_id.to_string(),
        })
    }
}

// endregion: --- Session Context

// region:    --- Tests


// endregion: --- Tests
