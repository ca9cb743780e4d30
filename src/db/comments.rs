use crate::error::AppError;
use crate::models::{Comment, CommentParent};
use sqlx::SqlitePool;

/// 질문 또는 답변에 달린 댓글을 작성순으로 조회합니다.
pub async fn list_comments(
    pool: &SqlitePool,
    parent: CommentParent,
    parent_id: i64,
) -> Result<Vec<Comment>, AppError> {
    let sql = format!(
        r#"
        SELECT c.id, c.body, c.owner, c.{column} AS parent_id, c.created,
               u.display_name AS owner_name
        FROM {table} c
        LEFT JOIN users u ON u.user_id = c.owner
        WHERE c.{column} = ?
        ORDER BY c.created, c.id
        "#,
        table = parent.table(),
        column = parent.column(),
    );
    let comments = sqlx::query_as::<_, Comment>(&sql)
        .bind(parent_id)
        .fetch_all(pool)
        .await?;

    Ok(comments)
}

pub async fn get_comment(
    pool: &SqlitePool,
    parent: CommentParent,
    id: i64,
) -> Result<Option<Comment>, AppError> {
    let sql = format!(
        r#"
        SELECT c.id, c.body, c.owner, c.{column} AS parent_id, c.created,
               u.display_name AS owner_name
        FROM {table} c
        LEFT JOIN users u ON u.user_id = c.owner
        WHERE c.id = ?
        "#,
        table = parent.table(),
        column = parent.column(),
    );
    let comment = sqlx::query_as::<_, Comment>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(comment)
}

/// 부모(질문/답변)가 존재하는지 확인합니다.
pub async fn comment_parent_exists(
    pool: &SqlitePool,
    parent: CommentParent,
    parent_id: i64,
) -> Result<bool, AppError> {
    let sql = format!("SELECT id FROM {} WHERE id = ?", parent.parent_table());
    let row: Option<i64> = sqlx::query_scalar(&sql)
        .bind(parent_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn create_comment(
    pool: &SqlitePool,
    parent: CommentParent,
    parent_id: i64,
    owner: i64,
    body: &str,
) -> Result<Comment, AppError> {
    let sql = format!(
        "INSERT INTO {} (body, owner, {}) VALUES (?, ?, ?)",
        parent.table(),
        parent.column()
    );
    let result = sqlx::query(&sql)
        .bind(body)
        .bind(owner)
        .bind(parent_id)
        .execute(pool)
        .await?;

    get_comment(pool, parent, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created comment".to_string()))
}
