//! 业务编码值对象

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 业务编码最大长度
const MAX_LENGTH: usize = 20;

/// 业务编码错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("code must not be empty")]
    Empty,
    #[error("code must not exceed {MAX_LENGTH} characters")]
    TooLong,
    #[error("code contains invalid character: {0}")]
    InvalidCharacter(char),
}

/// 业务编码（仓库编码、物料编码）
///
/// 业务规则:
/// - 不能为空
/// - 最大长度 20 字符
/// - 只允许字母、数字、连字符和下划线，统一转为大写
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessCode(String);

impl BusinessCode {
    pub fn new(code: impl Into<String>) -> Result<Self, CodeError> {
        let code = code.into().trim().to_uppercase();

        if code.is_empty() {
            return Err(CodeError::Empty);
        }

        if code.chars().count() > MAX_LENGTH {
            return Err(CodeError::TooLong);
        }

        if let Some(c) = code
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(CodeError::InvalidCharacter(c));
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for BusinessCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for BusinessCode {
    type Error = CodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
