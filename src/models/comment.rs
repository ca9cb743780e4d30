use serde::{Deserialize, Serialize};

/// 댓글이 달리는 대상 종류
///
/// 질문 댓글과 답변 댓글은 테이블이 나뉘어 있으므로
/// 대상에 따라 테이블/컬럼 이름이 달라집니다.
/// (고정된 식별자만 반환하며, 사용자 입력은 절대 SQL 텍스트에 들어가지 않습니다)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentParent {
    Question,
    Answer,
}

impl CommentParent {
    pub fn table(self) -> &'static str {
        match self {
            CommentParent::Question => "question_comments",
            CommentParent::Answer => "answer_comments",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            CommentParent::Question => "question",
            CommentParent::Answer => "answer",
        }
    }

    /// 부모 행이 들어 있는 테이블
    pub fn parent_table(self) -> &'static str {
        match self {
            CommentParent::Question => "questions",
            CommentParent::Answer => "answers",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub owner: i64,
    /// 질문 id 또는 답변 id (`CommentParent`에 따라 다름)
    pub parent_id: i64,
    pub created: String,
    pub owner_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}
