//! # 답변 라우트 핸들러
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /api/v1/answers/{id} | 답변 하나 |
//! | POST | /api/v1/answers/{id}/accept | 채택 (질문 작성자만) |
//! | DELETE | /api/v1/answers/{id}/accept | 채택 취소 (질문 작성자만) |

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

pub async fn get_answer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Answer>, AppError> {
    let answer = db::get_answer(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(answer))
}

/// 답변이 속한 질문의 작성자인지 확인합니다.
async fn ensure_question_owner(
    state: &AppState,
    answer_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    let owner = db::find_question_owner_of_answer(&state.pool, answer_id)
        .await?
        .ok_or(AppError::NotFound)?;

    if owner != user_id {
        return Err(AppError::Forbidden(
            "Only the question owner can change the accepted answer".to_string(),
        ));
    }
    Ok(())
}

/// `POST /answers/{id}/accept` — 채택 후 갱신된 답변을 돌려줍니다.
pub async fn accept_answer(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Answer>, AppError> {
    ensure_question_owner(&state, id, auth_user.user_id).await?;

    // 확인과 갱신 사이에 답변이 삭제되었으면 갱신된 행이 0개 → 404
    if !db::accept_answer(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    let answer = db::get_answer(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(answer))
}

/// `DELETE /answers/{id}/accept`
pub async fn reject_answer(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Answer>, AppError> {
    ensure_question_owner(&state, id, auth_user.user_id).await?;

    if !db::reject_answer(&state.pool, id).await? {
        return Err(AppError::NotFound);
    }

    let answer = db::get_answer(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(answer))
}
