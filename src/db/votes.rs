//! # 투표 데이터베이스 쿼리 모듈
//!
//! ## 토글 규칙
//! | 기존 투표 | 요청 | 결과 |
//! |-----------|------|------|
//! | 없음 | up/down | 새 행 INSERT (`Recorded`) |
//! | 반대 방향 | up/down | 같은 행의 vote_type 변경 (`Recorded`) |
//! | 같은 방향 | up/down | 행 DELETE (`Removed`) |
//!
//! (대상, 사용자) 복합 기본키가 있으므로 행이 두 개 생길 수 없고,
//! "같은 방향이면 삭제, 아니면 UPSERT" 두 문장은 하나의 트랜잭션으로 실행됩니다.
//!
//! 트랜잭션은 `BEGIN IMMEDIATE`로 시작해 처음부터 쓰기 잠금을 잡습니다.
//! 기본(DEFERRED) 트랜잭션은 읽기 잠금을 쓰기 잠금으로 올리는 순간
//! 다른 연결이 쓰고 있으면 busy timeout 없이 바로 `database is locked`로 실패합니다.
//!
//! 투표 합계는 저장하지 않고 조회할 때 `SUM`으로 계산합니다.

use crate::error::AppError;
use crate::models::{VoteOutcome, VoteSubject, VoteType};
use sqlx::SqlitePool;

/// 투표를 토글합니다.
///
/// 대상(질문/답변)이 없으면 `AppError::NotFound`를 반환하며 아무것도 바뀌지 않습니다.
///
/// SQL의 테이블/컬럼 이름은 `VoteSubject`가 돌려주는 고정 문자열이고,
/// id와 투표 값은 모두 `.bind()`로 전달합니다.
pub async fn toggle_vote(
    pool: &SqlitePool,
    subject: VoteSubject,
    subject_id: i64,
    user_id: i64,
    vote_type: VoteType,
) -> Result<VoteOutcome, AppError> {
    let table = subject.table();
    let column = subject.column();

    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let exists_sql = format!("SELECT id FROM {} WHERE id = ?", subject.subject_table());
    let exists: Option<i64> = sqlx::query_scalar(&exists_sql)
        .bind(subject_id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(AppError::NotFound);
    }

    // 1단계: 같은 방향의 투표가 있으면 지웁니다 (토글 해제)
    let delete_sql = format!("DELETE FROM {table} WHERE {column} = ? AND user = ? AND vote_type = ?");
    let removed = sqlx::query(&delete_sql)
        .bind(subject_id)
        .bind(user_id)
        .bind(vote_type.as_db())
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    // 2단계: 지운 게 없으면 INSERT, 반대 방향 행이 있으면 그 자리에서 변경
    let outcome = if removed {
        VoteOutcome::Removed
    } else {
        let upsert_sql = format!(
            "INSERT INTO {table} ({column}, user, vote_type) VALUES (?, ?, ?) \
             ON CONFLICT ({column}, user) DO UPDATE SET vote_type = excluded.vote_type"
        );
        sqlx::query(&upsert_sql)
            .bind(subject_id)
            .bind(user_id)
            .bind(vote_type.as_db())
            .execute(&mut *tx)
            .await?;
        VoteOutcome::Recorded
    };

    tx.commit().await?;

    tracing::debug!(?subject, subject_id, user_id, ?vote_type, ?outcome, "vote toggled");
    Ok(outcome)
}

/// 투표 대상(질문/답변)이 있는지 확인합니다.
pub async fn subject_exists(
    pool: &SqlitePool,
    subject: VoteSubject,
    subject_id: i64,
) -> Result<bool, AppError> {
    let sql = format!("SELECT id FROM {} WHERE id = ?", subject.subject_table());
    let row: Option<i64> = sqlx::query_scalar(&sql)
        .bind(subject_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// 대상의 투표 합계 (up = +1, down = -1)
pub async fn vote_count(
    pool: &SqlitePool,
    subject: VoteSubject,
    subject_id: i64,
) -> Result<i64, AppError> {
    let sql = format!(
        "SELECT COALESCE(SUM(CASE vote_type WHEN 1 THEN 1 ELSE -1 END), 0) FROM {} WHERE {} = ?",
        subject.table(),
        subject.column()
    );
    let count: i64 = sqlx::query_scalar(&sql)
        .bind(subject_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// 사용자가 대상에 남긴 투표. 없으면 `None`
pub async fn user_vote(
    pool: &SqlitePool,
    subject: VoteSubject,
    subject_id: i64,
    user_id: i64,
) -> Result<Option<VoteType>, AppError> {
    let sql = format!(
        "SELECT vote_type FROM {} WHERE {} = ? AND user = ?",
        subject.table(),
        subject.column()
    );
    let vote: Option<i64> = sqlx::query_scalar(&sql)
        .bind(subject_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(vote.and_then(VoteType::from_db))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_answer, create_question, create_user, get_question, test_pool};
    use crate::models::NewQuestion;

    struct Fixture {
        pool: SqlitePool,
        users: Vec<i64>,
        question: i64,
        answer: i64,
    }

    async fn fixture() -> Fixture {
        let pool = test_pool().await;
        let mut users = Vec::new();
        for name in ["u1", "u2", "u3"] {
            users.push(create_user(&pool, name, None).await.unwrap().user_id);
        }
        let question = create_question(
            &pool,
            users[0],
            &NewQuestion {
                title: "t".to_string(),
                body: "b".to_string(),
                body_text: "b".to_string(),
                tags: vec![],
            },
        )
        .await
        .unwrap()
        .id;
        let answer = create_answer(&pool, question, users[1], "a", "a")
            .await
            .unwrap()
            .id;
        Fixture { pool, users, question, answer }
    }

    async fn rows(pool: &SqlitePool, subject: VoteSubject, id: i64, user: i64) -> i64 {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ? AND user = ?",
            subject.table(),
            subject.column()
        );
        sqlx::query_scalar(&sql)
            .bind(id)
            .bind(user)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_vote_is_recorded() {
        let f = fixture().await;
        let outcome = toggle_vote(&f.pool, VoteSubject::Question, f.question, f.users[1], VoteType::Up)
            .await
            .unwrap();

        assert_eq!(outcome, VoteOutcome::Recorded);
        assert_eq!(vote_count(&f.pool, VoteSubject::Question, f.question).await.unwrap(), 1);
        assert_eq!(
            user_vote(&f.pool, VoteSubject::Question, f.question, f.users[1]).await.unwrap(),
            Some(VoteType::Up)
        );
    }

    #[tokio::test]
    async fn same_vote_twice_removes_the_row() {
        let f = fixture().await;
        for _ in 0..2 {
            toggle_vote(&f.pool, VoteSubject::Answer, f.answer, f.users[0], VoteType::Down)
                .await
                .unwrap();
        }

        assert_eq!(rows(&f.pool, VoteSubject::Answer, f.answer, f.users[0]).await, 0);
        assert_eq!(vote_count(&f.pool, VoteSubject::Answer, f.answer).await.unwrap(), 0);
        assert_eq!(
            user_vote(&f.pool, VoteSubject::Answer, f.answer, f.users[0]).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn opposite_vote_switches_in_place() {
        let f = fixture().await;
        toggle_vote(&f.pool, VoteSubject::Question, f.question, f.users[2], VoteType::Up)
            .await
            .unwrap();
        let outcome = toggle_vote(&f.pool, VoteSubject::Question, f.question, f.users[2], VoteType::Down)
            .await
            .unwrap();

        assert_eq!(outcome, VoteOutcome::Recorded);
        assert_eq!(rows(&f.pool, VoteSubject::Question, f.question, f.users[2]).await, 1);
        assert_eq!(vote_count(&f.pool, VoteSubject::Question, f.question).await.unwrap(), -1);
    }

    #[tokio::test]
    async fn at_most_one_row_per_user_after_any_sequence() {
        let f = fixture().await;
        let sequence = [
            VoteType::Up,
            VoteType::Up,
            VoteType::Down,
            VoteType::Up,
            VoteType::Down,
            VoteType::Down,
            VoteType::Up,
        ];

        for (step, vote_type) in sequence.iter().enumerate() {
            for &user in &f.users {
                toggle_vote(&f.pool, VoteSubject::Question, f.question, user, *vote_type)
                    .await
                    .unwrap();
                assert!(
                    rows(&f.pool, VoteSubject::Question, f.question, user).await <= 1,
                    "duplicate vote row after step {step}"
                );
            }
        }
    }

    #[tokio::test]
    async fn vote_count_is_signed_sum() {
        let f = fixture().await;
        toggle_vote(&f.pool, VoteSubject::Question, f.question, f.users[0], VoteType::Up)
            .await
            .unwrap();
        toggle_vote(&f.pool, VoteSubject::Question, f.question, f.users[1], VoteType::Up)
            .await
            .unwrap();
        toggle_vote(&f.pool, VoteSubject::Question, f.question, f.users[2], VoteType::Down)
            .await
            .unwrap();

        assert_eq!(vote_count(&f.pool, VoteSubject::Question, f.question).await.unwrap(), 1);
        let question = get_question(&f.pool, f.question).await.unwrap().unwrap();
        assert_eq!(question.vote_count, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_votes_are_all_recorded() {
        use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

        // 인메모리 DB는 연결이 하나뿐이므로 파일 DB에 여러 연결을 엽니다
        let dir = tempfile::tempdir().unwrap();
        let options = SqliteConnectOptions::new()
            .filename(dir.path().join("votes.db"))
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        let mut users = Vec::new();
        for i in 0..40 {
            users.push(create_user(&pool, &format!("voter{i}"), None).await.unwrap().user_id);
        }
        let question = create_question(
            &pool,
            users[0],
            &NewQuestion {
                title: "t".to_string(),
                body: "b".to_string(),
                body_text: "b".to_string(),
                tags: vec![],
            },
        )
        .await
        .unwrap()
        .id;

        let handles: Vec<_> = users
            .iter()
            .map(|&user| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    toggle_vote(&pool, VoteSubject::Question, question, user, VoteType::Up).await
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), VoteOutcome::Recorded);
        }
        assert_eq!(vote_count(&pool, VoteSubject::Question, question).await.unwrap(), 40);

        pool.close().await;
    }

    #[tokio::test]
    async fn voting_on_missing_subject_is_not_found() {
        let f = fixture().await;
        let err = toggle_vote(&f.pool, VoteSubject::Answer, 404, f.users[0], VoteType::Up)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(rows(&f.pool, VoteSubject::Answer, 404, f.users[0]).await, 0);
    }
}
