//! 统一响应信封

use chrono::{DateTime, Utc};
use mferp_errors::{AppError, AppResult, ProblemDetails};
use serde::Serialize;
use tracing::{error, warn};

/// 服务操作的统一返回结构
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProblemDetails>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(err: AppError) -> Self {
        if err.is_server_error() {
            error!(error_code = err.error_code(), error = %err, "Request failed");
        } else {
            warn!(error_code = err.error_code(), error = %err, "Request rejected");
        }

        Self {
            success: false,
            message: err.to_string(),
            data: None,
            error: Some(err.to_problem_details().with_instance(err.error_code())),
            timestamp: Utc::now(),
        }
    }

    /// 失败时的稳定错误码
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.instance.as_deref())
    }

    pub fn into_result(self) -> Result<T, ProblemDetails> {
        match (self.data, self.error) {
            (Some(data), _) if self.success => Ok(data),
            (_, Some(problem)) => Err(problem),
            _ => Err(AppError::internal("empty response").to_problem_details()),
        }
    }
}

/// 把 `AppResult<T>` 包装成信封
pub trait IntoEnvelope<T> {
    fn into_envelope(self, message: &str) -> ApiResponse<T>;
}

impl<T> IntoEnvelope<T> for AppResult<T> {
    fn into_envelope(self, message: &str) -> ApiResponse<T> {
        match self {
            Ok(data) => ApiResponse::ok(data, message),
            Err(err) => ApiResponse::failure(err),
        }
    }
}
