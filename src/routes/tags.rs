use crate::{db, error::AppError, routes::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /api/v1/tags` → `{ "tags": [...] }` (이름순)
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let tags = db::list_tags(&state.pool).await?;
    Ok(Json(json!({ "tags": tags })))
}
