//! # 태그 모델 정의
//!
//! 태그는 질문을 분류하는 라벨이며, `questions_tags` 중간 테이블로
//! 질문과 다대다(N:M) 관계를 맺습니다.

use serde::{Deserialize, Serialize};

/// 태그 엔티티 — DB의 `tags` 테이블 한 행(row)에 대응합니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub tag_name: String,
}

/// 사용자가 입력한 태그 이름들을 정리합니다.
///
/// - 앞뒤 공백 제거, 소문자로 통일
/// - 빈 문자열 제거
/// - 중복 제거 (처음 등장한 순서 유지)
pub fn normalize_tags(raw: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
