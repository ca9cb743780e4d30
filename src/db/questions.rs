//! # 질문 데이터베이스 쿼리 모듈
//!
//! 질문 조회는 모두 같은 SELECT 절(`QUESTION_SELECT`)에 WHERE/ORDER BY만 덧붙여 만듭니다.
//! 답변 수, 채택 여부, 투표 합계는 저장하지 않고 매번 서브쿼리로 계산하므로
//! 집계값이 실제 데이터와 어긋날 일이 없습니다.

use crate::db::tags::attach_tag;
use crate::error::AppError;
use crate::models::{NewQuestion, Question};
use sqlx::SqlitePool;

/// 질문 한 행 + 작성자 정보 + 집계값
///
/// 투표 합계: `vote_type` 1(up)은 +1, 0(down)은 -1로 더하고, 투표가 없으면 0
pub(crate) const QUESTION_SELECT: &str = r#"
    SELECT q.id, q.title, q.body, q.body_text, q.owner, q.created, q.last_modified,
           u.display_name AS owner_name,
           u.avatar AS owner_avatar,
           (SELECT COUNT(*) FROM answers a WHERE a.question = q.id) AS answer_count,
           EXISTS (SELECT 1 FROM answers a
                   WHERE a.question = q.id AND a.is_accepted = 1) AS has_accepted_answer,
           (SELECT COALESCE(SUM(CASE v.vote_type WHEN 1 THEN 1 ELSE -1 END), 0)
              FROM question_votes v
             WHERE v.question_id = q.id) AS vote_count
    FROM questions q
    LEFT JOIN users u ON u.user_id = q.owner
"#;

/// 최근 질문부터 전체 질문을 조회합니다.
pub async fn list_latest_questions(pool: &SqlitePool) -> Result<Vec<Question>, AppError> {
    let sql = format!("{QUESTION_SELECT} ORDER BY q.created DESC, q.id DESC");
    let questions = sqlx::query_as::<_, Question>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(questions)
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> Result<Option<Question>, AppError> {
    let sql = format!("{QUESTION_SELECT} WHERE q.id = ?");
    let question = sqlx::query_as::<_, Question>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(question)
}

/// 질문이 있는지만 확인합니다 (집계 JOIN 없이)
pub async fn question_exists(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let row: Option<i64> = sqlx::query_scalar("SELECT id FROM questions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// 특정 사용자가 작성한 질문들
pub async fn list_questions_by_owner(
    pool: &SqlitePool,
    owner: i64,
) -> Result<Vec<Question>, AppError> {
    let sql = format!("{QUESTION_SELECT} WHERE q.owner = ? ORDER BY q.created DESC, q.id DESC");
    let questions = sqlx::query_as::<_, Question>(&sql)
        .bind(owner)
        .fetch_all(pool)
        .await?;

    Ok(questions)
}

/// 질문을 저장하고 태그를 연결합니다.
///
/// 질문 INSERT와 태그 연결을 하나의 트랜잭션으로 묶어,
/// 태그 저장에 실패하면 질문도 남지 않습니다.
/// 트랜잭션은 `commit()` 없이 drop되면 자동으로 롤백됩니다.
pub async fn create_question(
    pool: &SqlitePool,
    owner: i64,
    new: &NewQuestion,
) -> Result<Question, AppError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO questions (title, body, body_text, owner)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&new.title)
    .bind(&new.body)
    .bind(&new.body_text)
    .bind(owner)
    .execute(&mut *tx)
    .await?;
    let id = result.last_insert_rowid();

    for tag in &new.tags {
        attach_tag(&mut *tx, id, tag).await?;
    }

    tx.commit().await?;
    tracing::debug!(question_id = id, owner, tags = new.tags.len(), "question created");

    get_question(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created question".to_string()))
}
