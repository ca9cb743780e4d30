//! # 질문 검색 API 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /api/v1/search?q=키워드&by=text | 제목/본문 검색 (기본값) |
//! | GET | /api/v1/search?q=이름&by=user | 작성자 표시 이름 검색 |
//! | GET | /api/v1/search?q=태그&by=tag | 태그 검색 |

use crate::{
    db::{self, SearchBy},
    error::AppError,
    routes::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// `?q=...&by=...` 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// 검색어 (와일드카드 문자도 글자 그대로 검색됨)
    pub q: String,
    /// 검색 기준 — 생략하면 `text`
    #[serde(default)]
    pub by: SearchBy,
}

/// 질문 검색을 수행합니다.
///
/// `GET /api/v1/search?q=키워드` → `{ "questions": [...] }`
///
/// - 빈 검색어: 400 Bad Request
/// - 알 수 없는 `by` 값: Axum `Query` 추출 단계에서 400
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let term = query.q.trim();
    if term.is_empty() {
        return Err(AppError::BadRequest(
            "Search query cannot be empty".to_string(),
        ));
    }

    let questions = db::search_questions(&state.pool, query.by, term).await?;
    Ok(Json(json!({ "questions": questions })))
}
