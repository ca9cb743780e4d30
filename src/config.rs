//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로
//! - `GITHUB_CLIENT_ID` / `GITHUB_CLIENT_SECRET`: GitHub OAuth 앱 자격 증명
//! - `GITHUB_REDIRECT_URL`: OAuth 콜백 주소
//! - `SESSION_TTL_HOURS`: 로그인 세션 유효 시간
//! - `PUBLIC_PATH`: 정적 파일 디렉토리
//! - `HOST`, `PORT`: 서버 바인딩 주소

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/heapoverflow.db")
    pub database_url: String,
    /// GitHub OAuth 앱의 client id
    pub github_client_id: String,
    /// GitHub OAuth 앱의 client secret
    pub github_client_secret: String,
    /// GitHub가 인증 후 돌려보낼 콜백 URL
    pub github_redirect_url: String,
    /// 세션 유효 시간(시간 단위, 기본값: 168 = 7일)
    pub session_ttl_hours: i64,
    /// 정적 파일(HTML/CSS/JS)이 있는 디렉토리
    pub public_path: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`, `GITHUB_CLIENT_ID`, `GITHUB_CLIENT_SECRET`은 필수이며,
    /// 없으면 에러가 발생합니다. 나머지는 기본값이 있습니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            github_client_id: env::var("GITHUB_CLIENT_ID")?,
            github_client_secret: env::var("GITHUB_CLIENT_SECRET")?,

            github_redirect_url: env::var("GITHUB_REDIRECT_URL").unwrap_or_else(|_| {
                "http://localhost:3000/api/v1/auth/github/callback".to_string()
            }),
            // 숫자가 아니거나 0 이하이면 기본값(7일)을 사용합니다
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|hours| *hours > 0)
                .unwrap_or(168),
            public_path: env::var("PUBLIC_PATH").unwrap_or_else(|_| "public".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }
}
