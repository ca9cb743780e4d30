use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// 답변 조회 결과 — 작성자 정보, 질문 제목, 투표 합계가 포함됩니다.
///
/// 한 질문에서 `is_accepted = true`인 답변은 최대 하나입니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Answer {
    pub id: i64,
    pub body: String,
    pub body_text: String,
    pub owner: i64,
    pub question_id: i64,
    pub is_accepted: bool,
    pub created: String,
    pub last_modified: String,
    pub owner_name: Option<String>,
    pub owner_avatar: Option<String>,
    pub question_title: Option<String>,
    pub vote_count: i64,
}

/// `POST /api/v1/questions/{id}/answers` 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateAnswerRequest {
    pub body: String,
    pub body_text: Option<String>,
}

impl CreateAnswerRequest {
    /// `(body, body_text)`를 돌려줍니다. 평문이 없으면 본문을 그대로 씁니다.
    pub fn validate(self) -> Result<(String, String), AppError> {
        if self.body.trim().is_empty() {
            return Err(AppError::BadRequest("Answer cannot be empty".to_string()));
        }
        let body_text = self
            .body_text
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| self.body.clone());
        Ok((self.body, body_text))
    }
}
