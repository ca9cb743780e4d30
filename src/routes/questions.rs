//! # 질문 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/questions | `list_questions` | 최신 질문 목록 |
//! | POST | /api/v1/questions | `create_question` | 질문 작성 (로그인 필요) |
//! | GET | /api/v1/questions/{id} | `get_question` | 질문 상세 + 태그 |
//! | GET | /api/v1/questions/{id}/answers | `list_answers` | 답변 목록 (채택 답변 먼저) |
//! | POST | /api/v1/questions/{id}/answers | `create_answer` | 답변 작성 (로그인 필요) |
//!
//! `Path(id): Path<i64>`는 숫자가 아닌 id를 Axum이 자동으로 400 처리합니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

/// `GET /questions` → `{ "questions": [...] }`
pub async fn list_questions(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let questions = db::list_latest_questions(&state.pool).await?;
    Ok(Json(json!({ "questions": questions })))
}

/// `POST /questions` + `{ "title", "body", "body_text", "tags": [...] }` → `201 Created`
pub async fn create_question(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionDetails>), AppError> {
    let new = req.validate()?;
    let question = db::create_question(&state.pool, auth_user.user_id, &new).await?;
    let tags = db::get_question_tags(&state.pool, question.id).await?;

    Ok((StatusCode::CREATED, Json(QuestionDetails { question, tags })))
}

/// `GET /questions/{id}` — 없는 id면 404
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<QuestionDetails>, AppError> {
    let question = db::get_question(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let tags = db::get_question_tags(&state.pool, id).await?;

    Ok(Json(QuestionDetails { question, tags }))
}

/// `GET /questions/{id}/answers` → `{ "answers": [...] }`
pub async fn list_answers(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if !db::question_exists(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    let answers = db::list_answers_for_question(&state.pool, id).await?;
    Ok(Json(json!({ "answers": answers })))
}

/// `POST /questions/{id}/answers` + `{ "body", "body_text" }` → `201 Created`
pub async fn create_answer(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CreateAnswerRequest>,
) -> Result<(StatusCode, Json<Answer>), AppError> {
    if !db::question_exists(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    let (body, body_text) = req.validate()?;
    let answer = db::create_answer(&state.pool, id, auth_user.user_id, &body, &body_text).await?;

    Ok((StatusCode::CREATED, Json(answer)))
}
