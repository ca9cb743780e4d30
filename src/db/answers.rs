//! # 답변 데이터베이스 쿼리 모듈
//!
//! 답변 조회/작성과 채택(accept) 상태 전이를 담당합니다.
//!
//! ## 채택 불변식
//! 한 질문에서 `is_accepted = 1`인 답변은 최대 하나입니다.
//! 채택은 같은 질문의 모든 답변을 `CASE` 식 하나로 갱신하는 **단일 UPDATE**로 처리하므로,
//! "기존 채택 해제 → 새 답변 채택" 사이에 채택 답변이 0개나 2개가 되는 순간이 없습니다.

use crate::error::AppError;
use crate::models::Answer;
use sqlx::SqlitePool;

/// 답변 한 행 + 작성자 정보 + 질문 제목 + 투표 합계
pub(crate) const ANSWER_SELECT: &str = r#"
    SELECT a.id, a.body, a.body_text, a.owner,
           a.question AS question_id,
           a.is_accepted, a.created, a.last_modified,
           u.display_name AS owner_name,
           u.avatar AS owner_avatar,
           (SELECT title FROM questions q WHERE q.id = a.question) AS question_title,
           (SELECT COALESCE(SUM(CASE v.vote_type WHEN 1 THEN 1 ELSE -1 END), 0)
              FROM answer_votes v
             WHERE v.answer_id = a.id) AS vote_count
    FROM answers a
    LEFT JOIN users u ON u.user_id = a.owner
"#;

pub async fn get_answer(pool: &SqlitePool, id: i64) -> Result<Option<Answer>, AppError> {
    let sql = format!("{ANSWER_SELECT} WHERE a.id = ?");
    let answer = sqlx::query_as::<_, Answer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(answer)
}

/// 질문의 답변 목록. 채택된 답변이 맨 앞에 옵니다.
pub async fn list_answers_for_question(
    pool: &SqlitePool,
    question_id: i64,
) -> Result<Vec<Answer>, AppError> {
    let sql = format!("{ANSWER_SELECT} WHERE a.question = ? ORDER BY a.is_accepted DESC, a.id ASC");
    let answers = sqlx::query_as::<_, Answer>(&sql)
        .bind(question_id)
        .fetch_all(pool)
        .await?;

    Ok(answers)
}

pub async fn list_answers_by_owner(pool: &SqlitePool, owner: i64) -> Result<Vec<Answer>, AppError> {
    let sql = format!("{ANSWER_SELECT} WHERE a.owner = ? ORDER BY a.created DESC, a.id DESC");
    let answers = sqlx::query_as::<_, Answer>(&sql)
        .bind(owner)
        .fetch_all(pool)
        .await?;

    Ok(answers)
}

pub async fn create_answer(
    pool: &SqlitePool,
    question_id: i64,
    owner: i64,
    body: &str,
    body_text: &str,
) -> Result<Answer, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO answers (body, body_text, question, owner)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(body)
    .bind(body_text)
    .bind(question_id)
    .bind(owner)
    .execute(pool)
    .await?;

    get_answer(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created answer".to_string()))
}

/// 답변이 속한 질문의 작성자 id를 조회합니다.
///
/// 채택 권한(질문 작성자만 채택 가능)을 확인할 때 사용합니다.
pub async fn find_question_owner_of_answer(
    pool: &SqlitePool,
    answer_id: i64,
) -> Result<Option<i64>, AppError> {
    let row: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT q.owner
        FROM answers a
        JOIN questions q ON q.id = a.question
        WHERE a.id = ?
        "#,
    )
    .bind(answer_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// 답변을 채택하고, 같은 질문의 다른 답변은 모두 채택 해제합니다.
///
/// ```sql
/// UPDATE answers
/// SET is_accepted = CASE id WHEN :answer THEN 1 ELSE 0 END
/// WHERE question = (SELECT question FROM answers WHERE id = :answer)
/// ```
///
/// ## 반환값
/// - `true`: 채택 완료
/// - `false`: 해당 id의 답변이 없음 (갱신된 행 0개) — 라우트에서 404로 처리
pub async fn accept_answer(pool: &SqlitePool, answer_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE answers
        SET is_accepted = CASE id WHEN ?1 THEN 1 ELSE 0 END
        WHERE question = (SELECT question FROM answers WHERE id = ?1)
        "#,
    )
    .bind(answer_id)
    .execute(pool)
    .await?;

    tracing::debug!(answer_id, rows = result.rows_affected(), "accept answer");
    Ok(result.rows_affected() > 0)
}

/// 답변 하나의 채택을 취소합니다.
///
/// 채택 답변이 0개가 되는 것은 불변식(최대 하나)을 깨지 않습니다.
pub async fn reject_answer(pool: &SqlitePool, answer_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE answers SET is_accepted = 0 WHERE id = ?")
        .bind(answer_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_question, create_user, get_question, test_pool};
    use crate::models::NewQuestion;

    async fn accepted_ids(pool: &SqlitePool, question_id: i64) -> Vec<i64> {
        list_answers_for_question(pool, question_id)
            .await
            .unwrap()
            .into_iter()
            .filter(|a| a.is_accepted)
            .map(|a| a.id)
            .collect()
    }

    /// 질문 하나와 답변 세 개를 만들고 `(질문 id, [답변 id])`를 돌려줍니다.
    async fn question_with_answers(pool: &SqlitePool) -> (i64, Vec<i64>) {
        let asker = create_user(pool, "asker", None).await.unwrap();
        let helper = create_user(pool, "helper", None).await.unwrap();
        let question = create_question(
            pool,
            asker.user_id,
            &NewQuestion {
                title: "title".to_string(),
                body: "body".to_string(),
                body_text: "body".to_string(),
                tags: vec![],
            },
        )
        .await
        .unwrap();

        let mut ids = Vec::new();
        for body in ["first", "second", "third"] {
            let answer = create_answer(pool, question.id, helper.user_id, body, body)
                .await
                .unwrap();
            ids.push(answer.id);
        }
        (question.id, ids)
    }

    #[tokio::test]
    async fn accept_marks_only_the_chosen_answer() {
        let pool = test_pool().await;
        let (question_id, ids) = question_with_answers(&pool).await;

        assert!(accept_answer(&pool, ids[0]).await.unwrap());
        assert_eq!(accepted_ids(&pool, question_id).await, vec![ids[0]]);

        let question = get_question(&pool, question_id).await.unwrap().unwrap();
        assert!(question.has_accepted_answer);
        assert_eq!(question.answer_count, 3);
    }

    #[tokio::test]
    async fn accept_answer_five_of_question_nine() {
        let pool = test_pool().await;
        let asker = create_user(&pool, "asker", None).await.unwrap();

        sqlx::query("INSERT INTO questions (id, title, body, body_text, owner) VALUES (9, 't', 'b', 'b', ?)")
            .bind(asker.user_id)
            .execute(&pool)
            .await
            .unwrap();
        for id in [5_i64, 6, 7] {
            sqlx::query("INSERT INTO answers (id, body, body_text, question, owner, is_accepted) VALUES (?, 'a', 'a', 9, ?, ?)")
                .bind(id)
                .bind(asker.user_id)
                .bind(id == 7)
                .execute(&pool)
                .await
                .unwrap();
        }

        assert!(accept_answer(&pool, 5).await.unwrap());
        assert_eq!(accepted_ids(&pool, 9).await, vec![5]);
    }

    #[tokio::test]
    async fn at_most_one_accepted_after_any_sequence() {
        let pool = test_pool().await;
        let (question_id, ids) = question_with_answers(&pool).await;

        for &id in [ids[1], ids[0], ids[2], ids[2], ids[1]].iter() {
            assert!(accept_answer(&pool, id).await.unwrap());
            assert_eq!(accepted_ids(&pool, question_id).await, vec![id]);
        }

        // 채택된 답변이 목록 맨 앞
        let answers = list_answers_for_question(&pool, question_id).await.unwrap();
        assert_eq!(answers[0].id, ids[1]);
    }

    #[tokio::test]
    async fn accepting_missing_answer_changes_nothing() {
        let pool = test_pool().await;
        let (question_id, ids) = question_with_answers(&pool).await;
        accept_answer(&pool, ids[2]).await.unwrap();

        assert!(!accept_answer(&pool, 9_999).await.unwrap());
        assert_eq!(accepted_ids(&pool, question_id).await, vec![ids[2]]);
    }

    #[tokio::test]
    async fn accept_does_not_touch_other_questions() {
        let pool = test_pool().await;
        let (first_question, first_ids) = question_with_answers(&pool).await;

        let other = create_user(&pool, "other", None).await.unwrap();
        let second = create_question(
            &pool,
            other.user_id,
            &NewQuestion {
                title: "another".to_string(),
                body: "body".to_string(),
                body_text: "body".to_string(),
                tags: vec![],
            },
        )
        .await
        .unwrap();
        let answer = create_answer(&pool, second.id, other.user_id, "a", "a")
            .await
            .unwrap();

        accept_answer(&pool, first_ids[0]).await.unwrap();
        accept_answer(&pool, answer.id).await.unwrap();

        assert_eq!(accepted_ids(&pool, first_question).await, vec![first_ids[0]]);
        assert_eq!(accepted_ids(&pool, second.id).await, vec![answer.id]);
    }

    #[tokio::test]
    async fn reject_clears_acceptance() {
        let pool = test_pool().await;
        let (question_id, ids) = question_with_answers(&pool).await;
        accept_answer(&pool, ids[1]).await.unwrap();

        assert!(reject_answer(&pool, ids[1]).await.unwrap());
        assert!(accepted_ids(&pool, question_id).await.is_empty());
        assert!(!reject_answer(&pool, 9_999).await.unwrap());
    }

    #[tokio::test]
    async fn finds_question_owner_for_answer() {
        let pool = test_pool().await;
        let (_, ids) = question_with_answers(&pool).await;
        let asker = crate::db::find_by_github_username(&pool, "asker")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            find_question_owner_of_answer(&pool, ids[0]).await.unwrap(),
            Some(asker.user_id)
        );
        assert_eq!(find_question_owner_of_answer(&pool, 9_999).await.unwrap(), None);
    }
}
