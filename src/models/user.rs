use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    pub github_username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl User {
    /// OAuth로 처음 로그인한 사용자는 표시 이름이 없으므로 가입 절차를 거쳐야 합니다.
    pub fn needs_sign_up(&self) -> bool {
        self.display_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty())
    }
}

/// `PUT /api/v1/users/me` 요청 본문
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
    pub email: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.display_name.trim().is_empty() {
            return Err(AppError::BadRequest("Display name is required".to_string()));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !email.contains('@') {
                return Err(AppError::BadRequest("Invalid email address".to_string()));
            }
        }
        Ok(())
    }
}
