//! # 태그 데이터베이스 쿼리 모듈
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티 (id, tag_name)
//! - `questions_tags`: 질문과 태그의 다대다(N:M) 관계 테이블

use crate::error::AppError;
use crate::models::Tag;
use sqlx::{SqliteConnection, SqlitePool};

/// 질문에 태그를 연결합니다. 태그가 없으면 먼저 만듭니다.
///
/// 질문 생성 트랜잭션 안에서 호출되므로 풀 대신 연결(`&mut SqliteConnection`)을 받습니다.
/// 호출하는 쪽에서는 `&mut *tx`로 트랜잭션의 연결을 넘깁니다.
pub async fn attach_tag(
    conn: &mut SqliteConnection,
    question_id: i64,
    tag_name: &str,
) -> Result<(), AppError> {
    // 이미 있는 태그면 무시 (tag_name UNIQUE)
    sqlx::query("INSERT OR IGNORE INTO tags (tag_name) VALUES (?)")
        .bind(tag_name)
        .execute(&mut *conn)
        .await?;

    let tag_id: i64 = sqlx::query_scalar("SELECT id FROM tags WHERE tag_name = ?")
        .bind(tag_name)
        .fetch_one(&mut *conn)
        .await?;

    sqlx::query("INSERT OR IGNORE INTO questions_tags (question_id, tag_id) VALUES (?, ?)")
        .bind(question_id)
        .bind(tag_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// 질문에 연결된 태그 이름들을 이름순으로 조회합니다.
///
/// ```text
/// tags ←── questions_tags ──→ questions
/// ```
pub async fn get_question_tags(pool: &SqlitePool, question_id: i64) -> Result<Vec<String>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.tag_name
        FROM tags t
        JOIN questions_tags qt ON qt.tag_id = t.id
        WHERE qt.question_id = ?
        ORDER BY t.tag_name
        "#,
    )
    .bind(question_id)
    .fetch_all(pool)
    .await?;

    Ok(tags.into_iter().map(|tag| tag.tag_name).collect())
}

/// 전체 태그 목록
pub async fn list_tags(pool: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>("SELECT id, tag_name FROM tags ORDER BY tag_name")
        .fetch_all(pool)
        .await?;

    Ok(tags)
}
