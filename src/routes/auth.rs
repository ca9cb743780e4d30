//! # 인증 라우트 핸들러
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /api/v1/auth/github?target_path=home | GitHub 인가 페이지로 302 |
//! | GET | /api/v1/auth/github/callback?code=...&target_path=home | 로그인 처리 후 302 |
//! | POST | /api/v1/auth/logout | 세션 삭제 |
//!
//! 콜백의 이동 위치:
//! - GitHub가 `error`를 돌려줌 → `/home`
//! - 처음 로그인했거나 아직 표시 이름이 없음 → `/signUp`
//! - 그 외 → `/{target_path}` (기본값 `home`)

use crate::{
    db,
    error::AppError,
    middleware::auth::{removal_cookie, session_cookie, AuthUser},
    routes::{found, AppState},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

const HOME: &str = "/home";
const SIGN_UP: &str = "/signUp";

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub target_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
    pub target_path: Option<String>,
}

/// 로그인 후 돌아갈 위치를 만듭니다.
///
/// 같은 사이트 안의 경로만 허용합니다. `//evil.com`, `https://...`처럼
/// 다른 호스트로 빠져나갈 수 있는 값은 `/home`으로 바꿉니다.
///
/// 공백/제어 문자/비ASCII 문자도 거절합니다. 브라우저는 URL에서 탭과 줄바꿈을 지우므로
/// `/\t/evil.com`은 `//evil.com`이 되고, 줄바꿈은 `Location` 헤더 값으로 쓸 수 없습니다.
pub fn target_location(target_path: Option<&str>) -> String {
    let path = target_path.unwrap_or("").trim().trim_start_matches('/');
    if path.is_empty()
        || !path.chars().all(|c| c.is_ascii_graphic())
        || path.contains("//")
        || path.contains(':')
        || path.contains('\\')
    {
        return HOME.to_string();
    }
    format!("/{}", path)
}

/// `GET /auth/github` — GitHub 인가 페이지로 보냅니다.
pub async fn github_login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Response, AppError> {
    let target = query.target_path.unwrap_or_else(|| "home".to_string());
    let url = state.oauth.authorize_url(&target)?;
    Ok(found(&url))
}

/// `GET /auth/github/callback` — 인가 코드를 검증하고 세션을 발급합니다.
pub async fn github_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(CookieJar, Response), AppError> {
    if let Some(error) = query.error {
        tracing::warn!("OAuth callback returned error: {}", error);
        return Ok((jar, found(HOME)));
    }

    let code = query
        .code
        .filter(|code| !code.is_empty())
        .ok_or(AppError::BadRequest("Missing authorization code".to_string()))?;

    let profile = state.oauth.exchange_code(&code).await?;
    let (user, created) =
        db::find_or_create_github_user(&state.pool, &profile.login, profile.avatar_url.as_deref())
            .await?;

    let token = state.sessions.create_session(user.user_id).await;
    tracing::info!(user_id = user.user_id, created, "user logged in");

    let location = if created || user.needs_sign_up() {
        SIGN_UP.to_string()
    } else {
        target_location(query.target_path.as_deref())
    };

    Ok((jar.add(session_cookie(token)), found(&location)))
}

/// `POST /auth/logout` — 세션을 지우고 쿠키를 만료시킵니다.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth_user: AuthUser,
) -> (CookieJar, StatusCode) {
    state.sessions.remove_session(&auth_user.token).await;
    tracing::info!(user_id = auth_user.user_id, "user logged out");
    (jar.remove(removal_cookie()), StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_location_stays_on_site() {
        assert_eq!(target_location(Some("home")), "/home");
        assert_eq!(target_location(Some("/question?id=2")), "/question?id=2");
        assert_eq!(target_location(None), "/home");
        assert_eq!(target_location(Some("")), "/home");
        assert_eq!(target_location(Some("//evil.com")), "/home");
        assert_eq!(target_location(Some("https://evil.com")), "/home");
        assert_eq!(target_location(Some("/\t/evil.com")), "/home");
        assert_eq!(target_location(Some("a\nb")), "/home");
        assert_eq!(target_location(Some("a b")), "/home");
        assert_eq!(target_location(Some("/\u{7f}/evil.com")), "/home");
    }
}
