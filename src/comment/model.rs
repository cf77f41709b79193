use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 댓글 최대 길이
pub const COMMENT_MAX_CHARS: usize = 400;

// 댓글 모델 (작성 후 변경 불가)
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub listing_id: i64,
    pub author_id: i64,
    pub text: String,
    pub added_at: DateTime<Utc>,
}

/// 댓글 작성 명령
#[derive(Debug, Clone, Deserialize)]
pub struct CommentCommand {
    pub list_id: i64,
    pub content: String,
}

impl CommentCommand {
    /// 공백 제거 후 1~400자인지 검증
    pub fn validated_text(&self) -> AppResult<String> {
        let text = self.content.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Comment must not be empty".to_string()));
        }
        if text.chars().count() > COMMENT_MAX_CHARS {
            return Err(AppError::Validation(format!(
                "Comment must be at most {} characters",
                COMMENT_MAX_CHARS
            )));
        }
        Ok(text.to_string())
    }
}
