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
use serde_json::{json, Value};

/// `GET /users/me` — 로그인한 사용자 정보
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = db::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user))
}

/// `PUT /users/me` — 가입 절차/프로필 수정에서 표시 이름 등을 저장합니다.
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    req.validate()?;

    let user = db::update_profile(&state.pool, auth_user.user_id, &req)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, AppError> {
    let user = db::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(user))
}

pub async fn user_questions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if !db::user_exists(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    let questions = db::list_questions_by_owner(&state.pool, id).await?;
    Ok(Json(json!({ "questions": questions })))
}

pub async fn user_answers(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if !db::user_exists(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    let answers = db::list_answers_by_owner(&state.pool, id).await?;
    Ok(Json(json!({ "answers": answers })))
}
