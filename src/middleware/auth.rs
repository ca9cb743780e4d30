use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

use crate::routes::AppState;

/// 세션 토큰을 담는 쿠키 이름
pub const SESSION_COOKIE: &str = "session";

/// 로그인한 사용자. 핸들러 인자로 받으면 세션 쿠키 검사가 자동으로 수행됩니다.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    /// 로그아웃 시 세션을 지우기 위한 토큰 원문
    pub token: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingSession)?;

        let user_id = state
            .sessions
            .resolve_session(&token)
            .await
            .ok_or(AuthError::InvalidSession)?;

        Ok(AuthUser { user_id, token })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingSession,
    InvalidSession,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AuthError::MissingSession => ("missing_session", "Login is required"),
            AuthError::InvalidSession => ("invalid_session", "Session is invalid or expired"),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// 로그인 성공 시 내려보낼 세션 쿠키
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// 로그아웃 시 쿠키 삭제용. path가 발급 때와 같아야 브라우저가 지웁니다.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
