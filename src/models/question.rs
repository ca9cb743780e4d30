//! # 질문 모델 정의
//!
//! `Question`은 `questions` 테이블 한 행에 작성자 정보와 집계값
//! (답변 수, 채택 여부, 투표 합계)을 덧붙인 조회용 구조체입니다.
//! 집계값은 저장하지 않고 조회할 때마다 SQL로 계산합니다.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::normalize_tags;

/// 질문 조회 결과 — 작성자/집계 컬럼이 포함된 비정규화 행
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub title: String,
    /// 원본 본문 (마크다운/HTML 등 클라이언트 에디터 형식)
    pub body: String,
    /// 검색용 평문 본문
    pub body_text: String,
    pub owner: i64,
    pub created: String,
    pub last_modified: String,
    pub owner_name: Option<String>,
    pub owner_avatar: Option<String>,
    pub answer_count: i64,
    pub has_accepted_answer: bool,
    /// up = +1, down = -1의 합계
    pub vote_count: i64,
}

/// `GET /api/v1/questions/{id}` 응답: 질문 + 태그 이름 목록
#[derive(Debug, Serialize)]
pub struct QuestionDetails {
    #[serde(flatten)]
    pub question: Question,
    pub tags: Vec<String>,
}

/// `POST /api/v1/questions` 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub title: String,
    pub body: String,
    /// 없으면 `body`를 그대로 사용합니다
    pub body_text: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// 검증을 통과한 질문 작성 데이터
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub title: String,
    pub body: String,
    pub body_text: String,
    pub tags: Vec<String>,
}

impl CreateQuestionRequest {
    /// 제목/본문이 비어 있으면 400, 통과하면 정리된 `NewQuestion`을 돌려줍니다.
    pub fn validate(self) -> Result<NewQuestion, AppError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::BadRequest("Title cannot be empty".to_string()));
        }
        if self.body.trim().is_empty() {
            return Err(AppError::BadRequest("Body cannot be empty".to_string()));
        }

        let body_text = self
            .body_text
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| self.body.clone());

        Ok(NewQuestion {
            title,
            tags: normalize_tags(&self.tags),
            body: self.body,
            body_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_title() {
        let req = CreateQuestionRequest {
            title: "   ".to_string(),
            body: "body".to_string(),
            body_text: None,
            tags: vec![],
        };
        assert!(matches!(req.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn falls_back_to_body_for_plain_text() {
        let req = CreateQuestionRequest {
            title: " How do lifetimes work? ".to_string(),
            body: "<p>body</p>".to_string(),
            body_text: Some("".to_string()),
            tags: vec!["Rust".to_string()],
        };
        let new = req.validate().unwrap();
        assert_eq!(new.title, "How do lifetimes work?");
        assert_eq!(new.body_text, "<p>body</p>");
        assert_eq!(new.tags, vec!["rust"]);
    }
}
