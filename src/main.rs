//! # heapOverflow 웹 서버 진입점
//!
//! 이 파일은 질문/답변 포럼 백엔드의 **시작점(entry point)**입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 세션 저장소와 GitHub OAuth 클라이언트 생성
//! 6. API 라우터 + 정적 파일 설정
//! 7. HTTP 서버 시작, Ctrl+C 시 정상 종료

// ── 모듈 선언 ──
// Rust에서는 파일 시스템 구조가 곧 모듈 구조입니다.
mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;

use std::{path::Path, sync::Arc};

use anyhow::Result; // main에서는 어떤 에러든 담을 수 있는 anyhow::Result를 사용
use axum::{routing::get, Router};
use config::Config;
use routes::{api_router, found, AppState};
use services::{GitHubOAuth, SessionStore};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG 환경변수가 없으면 heapoverflow, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heapoverflow=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    // 필수 환경변수(DATABASE_URL, GITHUB_CLIENT_ID, GITHUB_CLIENT_SECRET)가 없으면 여기서 종료됩니다.
    let config = Config::from_env()?;
    tracing::info!("Starting heapOverflow server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    // sqlx의 SQLite 연결은 기본적으로 foreign_keys가 켜져 있습니다.
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 6단계: 애플리케이션 상태(State) 생성 ──
    // 세션 저장소는 여기서 만들어 주입하고, 종료할 때 비웁니다.
    let sessions = Arc::new(SessionStore::new(chrono::Duration::hours(
        config.session_ttl_hours,
    )));
    let oauth = Arc::new(GitHubOAuth::new(
        config.github_client_id.clone(),
        config.github_client_secret.clone(),
        config.github_redirect_url.clone(),
    ));

    let state = AppState {
        pool,
        sessions: sessions.clone(),
        oauth,
    };

    // ── 7단계: CORS 미들웨어 설정 ──
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 8단계: 라우터 구성 ──
    // `/`는 홈 화면으로 보내고, API는 /api/v1 아래에 둡니다.
    let router = Router::new()
        .route("/", get(|| async { found("/home") }))
        .nest("/api/v1", api_router(state));

    // 정적 파일 디렉토리가 있으면 API에 매칭되지 않는 요청을 그쪽으로 넘깁니다.
    let public_path = Path::new(&config.public_path);
    let router = if public_path.exists() {
        tracing::info!("Serving static files from {}", config.public_path);
        router.fallback_service(ServeDir::new(public_path))
    } else {
        tracing::warn!("Public directory {} not found, serving API only", config.public_path);
        router
    };

    let app = router.layer(cors).layer(TraceLayer::new_for_http());

    // ── 9단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 서버가 멈춘 뒤 남아 있는 세션을 모두 버립니다.
    let dropped = sessions.clear().await;
    tracing::info!(sessions = dropped, "Server stopped, session store cleared");

    Ok(())
}

/// Ctrl+C 신호를 기다립니다.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
