//! # 질문 검색 모듈
//!
//! 세 가지 기준으로 질문을 검색합니다.
//! - 제목/본문(평문) 부분 일치
//! - 작성자 표시 이름 부분 일치
//! - 태그 이름 부분 일치 (`questions_tags` 중간 테이블 경유)
//!
//! ## LIKE 패턴 처리
//! 검색어는 `like_pattern()`으로 와일드카드(`%`, `_`)와 이스케이프 문자(`\`)를
//! 이스케이프한 뒤 `%...%`로 감싸고, **항상 바인딩 파라미터로** 전달합니다.
//! 쿼리 쪽에는 `ESCAPE '\'`를 붙여 이스케이프 문자를 지정합니다.
//! SQLite의 LIKE는 ASCII 범위에서 대소문자를 구분하지 않습니다.

use crate::db::questions::QUESTION_SELECT;
use crate::error::AppError;
use crate::models::Question;
use serde::Deserialize;
use sqlx::SqlitePool;

/// 검색 기준
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBy {
    /// 제목 또는 본문
    #[default]
    Text,
    /// 작성자 표시 이름
    User,
    /// 태그 이름
    Tag,
}

/// 사용자 입력을 "포함" 검색용 LIKE 패턴으로 바꿉니다.
///
/// 예: `50%_off` → `%50\%\_off%`
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// 질문을 검색하여 최신순으로 반환합니다.
pub async fn search_questions(
    pool: &SqlitePool,
    by: SearchBy,
    term: &str,
) -> Result<Vec<Question>, AppError> {
    let pattern = like_pattern(term);

    let questions = match by {
        SearchBy::Text => {
            let sql = format!(
                r#"{QUESTION_SELECT}
                WHERE q.title LIKE ?1 ESCAPE '\' OR q.body_text LIKE ?1 ESCAPE '\'
                ORDER BY q.created DESC, q.id DESC"#
            );
            sqlx::query_as::<_, Question>(&sql)
                .bind(&pattern)
                .fetch_all(pool)
                .await?
        }
        SearchBy::User => {
            let sql = format!(
                r#"{QUESTION_SELECT}
                WHERE u.display_name LIKE ? ESCAPE '\'
                ORDER BY q.created DESC, q.id DESC"#
            );
            sqlx::query_as::<_, Question>(&sql)
                .bind(&pattern)
                .fetch_all(pool)
                .await?
        }
        SearchBy::Tag => {
            let sql = format!(
                r#"{QUESTION_SELECT}
                WHERE q.id IN (
                    SELECT qt.question_id
                    FROM questions_tags qt
                    JOIN tags t ON t.id = qt.tag_id
                    WHERE t.tag_name LIKE ? ESCAPE '\'
                )
                ORDER BY q.created DESC, q.id DESC"#
            );
            sqlx::query_as::<_, Question>(&sql)
                .bind(&pattern)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_question, create_user, test_pool, update_profile};
    use crate::models::{NewQuestion, UpdateProfileRequest};

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }

    async fn seeded() -> SqlitePool {
        let pool = test_pool().await;
        let user = create_user(&pool, "ghuser", None).await.unwrap();
        update_profile(
            &pool,
            user.user_id,
            &UpdateProfileRequest {
                display_name: "Sakura".to_string(),
                email: None,
                location: None,
                bio: None,
            },
        )
        .await
        .unwrap();

        let questions = [
            ("Borrow checker woes", "why does my &mut alias", vec!["rust"]),
            ("Discount 100% off", "pricing question", vec!["business"]),
            ("Plain question", "nothing special", vec!["rust-async"]),
        ];
        for (title, text, tags) in questions {
            create_question(
                &pool,
                user.user_id,
                &NewQuestion {
                    title: title.to_string(),
                    body: text.to_string(),
                    body_text: text.to_string(),
                    tags: tags.into_iter().map(str::to_string).collect(),
                },
            )
            .await
            .unwrap();
        }
        pool
    }

    #[tokio::test]
    async fn searches_title_and_body() {
        let pool = seeded().await;

        let by_title = search_questions(&pool, SearchBy::Text, "borrow").await.unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Borrow checker woes");

        let by_body = search_questions(&pool, SearchBy::Text, "pricing").await.unwrap();
        assert_eq!(by_body.len(), 1);
    }

    #[tokio::test]
    async fn wildcards_in_input_match_literally() {
        let pool = seeded().await;

        let percent = search_questions(&pool, SearchBy::Text, "100%").await.unwrap();
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].title, "Discount 100% off");

        // 이스케이프하지 않았다면 모든 질문에 일치했을 입력
        assert!(search_questions(&pool, SearchBy::Text, "%").await.unwrap().len() == 1);
        assert!(search_questions(&pool, SearchBy::Text, "_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn injection_attempt_is_just_text() {
        let pool = seeded().await;
        let hits = search_questions(&pool, SearchBy::Text, "' OR 1=1 --").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn searches_by_owner_name_and_tag() {
        let pool = seeded().await;

        let by_user = search_questions(&pool, SearchBy::User, "saku").await.unwrap();
        assert_eq!(by_user.len(), 3);

        let by_tag = search_questions(&pool, SearchBy::Tag, "rust").await.unwrap();
        assert_eq!(by_tag.len(), 2);

        let none = search_questions(&pool, SearchBy::Tag, "python").await.unwrap();
        assert!(none.is_empty());
    }
}
