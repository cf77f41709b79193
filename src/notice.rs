use serde::Serialize;

/// 사용자 알림 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Warning,
}

/// 사용자에게 돌려주는 알림 메시지 (성공 / 경고)
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            code: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            code: None,
        }
    }

    /// 성공 여부에 따라 수준 선택
    pub fn from_outcome(success: bool, message: impl Into<String>) -> Self {
        if success {
            Self::success(message)
        } else {
            Self::warning(message)
        }
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}
