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

async fn list(state: &AppState, parent: CommentParent, id: i64) -> Result<Json<Value>, AppError> {
    if !db::comment_parent_exists(&state.pool, parent, id).await? {
        return Err(AppError::NotFound);
    }
    let comments = db::list_comments(&state.pool, parent, id).await?;
    Ok(Json(json!({ "comments": comments })))
}

async fn create(
    state: &AppState,
    parent: CommentParent,
    id: i64,
    owner: i64,
    req: CreateCommentRequest,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let body = req.body.trim();
    if body.is_empty() {
        return Err(AppError::BadRequest("Comment cannot be empty".to_string()));
    }
    if !db::comment_parent_exists(&state.pool, parent, id).await? {
        return Err(AppError::NotFound);
    }

    let comment = db::create_comment(&state.pool, parent, id, owner, body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// `GET /questions/{id}/comments`
pub async fn list_question_comments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    list(&state, CommentParent::Question, id).await
}

/// `POST /questions/{id}/comments` + `{ "body": "..." }`
pub async fn create_question_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    create(&state, CommentParent::Question, id, auth_user.user_id, req).await
}

/// `GET /answers/{id}/comments`
pub async fn list_answer_comments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    list(&state, CommentParent::Answer, id).await
}

/// `POST /answers/{id}/comments` + `{ "body": "..." }`
pub async fn create_answer_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    create(&state, CommentParent::Answer, id, auth_user.user_id, req).await
}
