use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 사용자 모델
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub joined_at: DateTime<Utc>,
}

/// 저장용 신규 사용자 (비밀번호는 해시 완료 상태)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// 회원 가입 명령
#[derive(Debug, Deserialize)]
pub struct RegisterCommand {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

impl RegisterCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::Validation("Username must not be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(AppError::Validation("Password must not be empty".to_string()));
        }
        if self.password != self.confirmation {
            return Err(AppError::Validation("Passwords must match.".to_string()));
        }
        Ok(())
    }
}

/// 로그인 명령
#[derive(Debug, Deserialize)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}
