use crate::error::AppError;
use crate::models::user::{UpdateProfileRequest, User};
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, github_username, display_name, email, location, bio, avatar
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn user_exists(pool: &SqlitePool, user_id: i64) -> Result<bool, AppError> {
    let row: Option<i64> = sqlx::query_scalar("SELECT user_id FROM users WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn find_by_github_username(
    pool: &SqlitePool,
    github_username: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, github_username, display_name, email, location, bio, avatar
        FROM users
        WHERE github_username = ?
        "#,
    )
    .bind(github_username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// 새 사용자를 만듭니다. 같은 GitHub 로그인 이름이 이미 있으면 `AppError::Conflict`
pub async fn create_user(
    pool: &SqlitePool,
    github_username: &str,
    avatar: Option<&str>,
) -> Result<User, AppError> {
    let result = sqlx::query("INSERT INTO users (github_username, avatar) VALUES (?, ?)")
        .bind(github_username)
        .bind(avatar)
        .execute(pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if duplicate {
                AppError::Conflict("GitHub username already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

/// GitHub 로그인 이름으로 사용자를 찾고, 없으면 만듭니다.
///
/// 두 번째 값은 이번 호출에서 새로 만들어졌는지 여부입니다.
/// `INSERT OR IGNORE`를 쓰므로 같은 로그인으로 동시에 들어와도 행은 하나만 생깁니다.
pub async fn find_or_create_github_user(
    pool: &SqlitePool,
    github_username: &str,
    avatar: Option<&str>,
) -> Result<(User, bool), AppError> {
    let result = sqlx::query("INSERT OR IGNORE INTO users (github_username, avatar) VALUES (?, ?)")
        .bind(github_username)
        .bind(avatar)
        .execute(pool)
        .await?;
    let created = result.rows_affected() > 0;

    let user = find_by_github_username(pool, github_username)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve github user".to_string()))?;

    Ok((user, created))
}

pub async fn update_profile(
    pool: &SqlitePool,
    user_id: i64,
    req: &UpdateProfileRequest,
) -> Result<Option<User>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET display_name = ?, email = ?, location = ?, bio = ?
        WHERE user_id = ?
        "#,
    )
    .bind(req.display_name.trim())
    .bind(&req.email)
    .bind(&req.location)
    .bind(&req.bio)
    .bind(user_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_by_id(pool, user_id).await
}
