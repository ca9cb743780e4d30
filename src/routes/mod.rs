//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `answers`: 답변 조회, 채택/채택 취소
//! - `auth`: GitHub OAuth 로그인, 로그아웃
//! - `comments`: 질문/답변 댓글
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `questions`: 질문 목록/작성/상세, 질문의 답변
//! - `search`: 질문 검색
//! - `tags`: 태그 목록
//! - `users`: 내 정보, 프로필 저장, 사용자별 질문/답변
//! - `votes`: 투표 토글, 내 투표 조회

pub mod answers;
pub mod auth;
pub mod comments;
pub mod health;
pub mod questions;
pub mod search;
pub mod tags;
pub mod users;
pub mod votes;


use std::sync::Arc;

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

use crate::services::{IdentityProvider, SessionStore};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 필드가 모두 내부적으로 Arc이므로 clone해도 같은 자원을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// 로그인 세션 저장소 (main에서 생성해 주입, 종료 시 비움)
    pub sessions: Arc<SessionStore>,
    /// OAuth 제공자 (운영: GitHub, 테스트: 가짜 구현)
    pub oauth: Arc<dyn IdentityProvider>,
}

/// `/api/v1` 아래에 붙는 API 라우터
pub fn api_router(state: AppState) -> Router {
    Router::new()
        // 인증
        .route("/auth/github", get(auth::github_login))
        .route("/auth/github/callback", get(auth::github_callback))
        .route("/auth/logout", post(auth::logout))
        // 사용자
        .route("/users/me", get(users::me).put(users::update_me))
        .route("/users/{id}", get(users::get_user))
        .route("/users/{id}/questions", get(users::user_questions))
        .route("/users/{id}/answers", get(users::user_answers))
        // 질문
        .route("/questions", get(questions::list_questions).post(questions::create_question))
        .route("/questions/{id}", get(questions::get_question))
        .route(
            "/questions/{id}/answers",
            get(questions::list_answers).post(questions::create_answer),
        )
        .route(
            "/questions/{id}/comments",
            get(comments::list_question_comments).post(comments::create_question_comment),
        )
        .route(
            "/questions/{id}/vote",
            get(votes::my_question_vote).post(votes::vote_question),
        )
        // 답변
        .route("/answers/{id}", get(answers::get_answer))
        .route(
            "/answers/{id}/accept",
            post(answers::accept_answer).delete(answers::reject_answer),
        )
        .route(
            "/answers/{id}/comments",
            get(comments::list_answer_comments).post(comments::create_answer_comment),
        )
        .route(
            "/answers/{id}/vote",
            get(votes::my_answer_vote).post(votes::vote_answer),
        )
        // 태그, 검색, 헬스체크
        .route("/tags", get(tags::list_tags))
        .route("/search", get(search::search))
        .route("/health", get(health::health_check))
        .with_state(state)
}

/// `302 Found` 리다이렉트 응답
///
/// axum의 `Redirect::to`는 303을 쓰므로, 브라우저 로그인 흐름에 맞춰 302를 직접 만듭니다.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}
