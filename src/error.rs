//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! ## 에러 분류
//! | variant | HTTP |
//! |---------|------|
//! | `NotFound` | 404 — 존재하지 않는 id 참조 |
//! | `Unauthorized` | 401 — 세션 없음/만료 |
//! | `Forbidden` | 403 — 로그인했지만 권한 없음 (예: 남의 질문의 답변 채택) |
//! | `BadRequest` | 400 — 입력값 검증 실패 |
//! | `Conflict` | 409 — 제약 조건 위반 |
//! | `Upstream` | 502 — OAuth 제공자(GitHub) 호출 실패 |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류
    /// #[from]: sqlx 함수의 에러에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    /// 제약 조건 위반은 응답 시 409/404로, 나머지는 500으로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 권한 없음 (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 리소스 충돌 (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 외부 서비스(GitHub) 호출 실패 (HTTP 502)
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl AppError {
    /// 이 에러가 응답될 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(e) => match e.as_database_error() {
                Some(db) if db.is_unique_violation() => StatusCode::CONFLICT,
                Some(db) if db.is_foreign_key_violation() => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal, Upstream)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message) = match self {
            AppError::NotFound => ("not_found", self.to_string()),
            AppError::BadRequest(ref msg) => ("bad_request", msg.clone()),
            AppError::Unauthorized(ref msg) => ("unauthorized", msg.clone()),
            AppError::Forbidden(ref msg) => ("forbidden", msg.clone()),
            AppError::Conflict(ref msg) => ("conflict", msg.clone()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                ("internal_error", "An internal error occurred".to_string())
            }
            AppError::Upstream(ref msg) => {
                tracing::error!("Upstream error: {}", msg);
                ("upstream_error", "Identity provider request failed".to_string())
            }
            AppError::Database(ref e) => match status {
                StatusCode::CONFLICT => ("conflict", "Constraint violation".to_string()),
                StatusCode::NOT_FOUND => (
                    "not_found",
                    "Referenced resource does not exist".to_string(),
                ),
                _ => {
                    tracing::error!("Database error: {}", e);
                    ("database_error", "A database error occurred".to_string())
                }
            },
        };

        // 결과: { "error": { "code": "not_found", "message": "Resource not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
