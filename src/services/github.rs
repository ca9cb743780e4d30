//! # GitHub OAuth 연동
//!
//! ## 로그인 흐름
//! ```text
//! 1. GET /auth/github          → GitHub 인가 페이지로 302 (authorize_url)
//! 2. 사용자가 GitHub에서 승인  → /auth/github/callback?code=...
//! 3. exchange_code(code)       → access_token 교환 → /user 프로필 조회
//! 4. 로컬 사용자 조회/생성, 세션 발급 (routes::auth)
//! ```
//!
//! 라우트는 `IdentityProvider` 트레이트에만 의존하므로
//! 테스트에서는 가짜 구현으로 바꿔 끼울 수 있습니다.

use async_trait::async_trait;
use reqwest::{header, Url};
use serde::Deserialize;

use crate::error::AppError;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const ACCESS_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_API_URL: &str = "https://api.github.com/user";
const USER_AGENT: &str = "heapoverflow";

/// 로컬 사용자를 만들거나 찾는 데 필요한 GitHub 프로필
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubProfile {
    pub login: String,
    pub avatar_url: Option<String>,
}

/// 외부 신원 제공자(OAuth)
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 사용자를 보낼 인가 URL. 로그인 후 돌아갈 경로(`target_path`)를 콜백에 실어 보냅니다.
    fn authorize_url(&self, target_path: &str) -> Result<String, AppError>;

    /// 인가 코드를 프로필로 교환합니다.
    async fn exchange_code(&self, code: &str) -> Result<GitHubProfile, AppError>;
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// GitHub OAuth 앱 클라이언트
pub struct GitHubOAuth {
    client_id: String,
    client_secret: String,
    redirect_url: String,
    http: reqwest::Client,
}

impl GitHubOAuth {
    pub fn new(client_id: String, client_secret: String, redirect_url: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for GitHubOAuth {
    fn authorize_url(&self, target_path: &str) -> Result<String, AppError> {
        let redirect = Url::parse_with_params(&self.redirect_url, &[("target_path", target_path)])
            .map_err(|e| AppError::Internal(format!("Invalid redirect url: {}", e)))?;

        let url = Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", redirect.as_str()),
            ],
        )
        .map_err(|e| AppError::Internal(format!("Invalid authorize url: {}", e)))?;

        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str) -> Result<GitHubProfile, AppError> {
        let token: AccessTokenResponse = self
            .http
            .post(ACCESS_TOKEN_URL)
            .header(header::ACCEPT, "application/json")
            .query(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // 잘못되었거나 이미 사용된 code면 GitHub는 200과 함께 error 필드를 돌려줍니다
        let access_token = token.access_token.ok_or_else(|| {
            let reason = token
                .error_description
                .or(token.error)
                .unwrap_or_else(|| "no access token".to_string());
            tracing::warn!("GitHub code exchange rejected: {}", reason);
            AppError::Unauthorized("GitHub authorization failed".to_string())
        })?;

        let profile: GitHubProfile = self
            .http
            .get(USER_API_URL)
            .bearer_auth(access_token)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(profile)
    }
}
