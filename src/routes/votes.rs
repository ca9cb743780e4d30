//! # 투표 라우트 핸들러
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /api/v1/questions/{id}/vote | 내 투표 조회 |
//! | POST | /api/v1/questions/{id}/vote | 투표 토글 `{ "vote_type": "up" \| "down" }` |
//! | GET | /api/v1/answers/{id}/vote | 내 투표 조회 |
//! | POST | /api/v1/answers/{id}/vote | 투표 토글 |
//!
//! 응답: `{ "outcome": "recorded" | "removed" | null, "vote_count": 3, "my_vote": "up" | null }`

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};

async fn cast(
    state: &AppState,
    subject: VoteSubject,
    id: i64,
    user_id: i64,
    vote_type: VoteType,
) -> Result<Json<VoteResponse>, AppError> {
    let outcome = db::toggle_vote(&state.pool, subject, id, user_id, vote_type).await?;
    let vote_count = db::vote_count(&state.pool, subject, id).await?;
    let my_vote = match outcome {
        VoteOutcome::Recorded => Some(vote_type),
        VoteOutcome::Removed => None,
    };

    Ok(Json(VoteResponse {
        outcome: Some(outcome),
        vote_count,
        my_vote,
    }))
}

async fn current(
    state: &AppState,
    subject: VoteSubject,
    id: i64,
    user_id: i64,
) -> Result<Json<VoteResponse>, AppError> {
    if !db::subject_exists(&state.pool, subject, id).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(VoteResponse {
        outcome: None,
        vote_count: db::vote_count(&state.pool, subject, id).await?,
        my_vote: db::user_vote(&state.pool, subject, id, user_id).await?,
    }))
}

pub async fn vote_question(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    cast(&state, VoteSubject::Question, id, auth_user.user_id, req.vote_type).await
}

pub async fn vote_answer(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    cast(&state, VoteSubject::Answer, id, auth_user.user_id, req.vote_type).await
}

pub async fn my_question_vote(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<VoteResponse>, AppError> {
    current(&state, VoteSubject::Question, id, auth_user.user_id).await
}

pub async fn my_answer_vote(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<VoteResponse>, AppError> {
    current(&state, VoteSubject::Answer, id, auth_user.user_id).await
}
