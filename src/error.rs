use std::error::Error as StdError;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// 中继服务错误类型
#[derive(Debug, Clone)]
pub enum RelayError {
    /// 请求体或内层 payload 解析失败
    Parse(String),
    /// 不支持的协议（只允许 http / xmpp）
    UnsupportedProtocol,
    /// 请求体超过大小上限
    PayloadTooLarge,
    /// 请求体读取失败（传输中断等）
    BadRequest(String),
    /// Provider 调用失败
    Provider(String),
    /// 配置错误
    Configuration(String),
    /// 内部错误
    Internal(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Parse(msg) => write!(f, "{}", msg),
            RelayError::UnsupportedProtocol => {
                write!(f, "protocol should be HTTP or XMPP only.")
            }
            RelayError::PayloadTooLarge => write!(f, "request body exceeds 1 MiB limit"),
            RelayError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            RelayError::Provider(msg) => write!(f, "{}", msg),
            RelayError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            RelayError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for RelayError {}

/// 错误响应体，所有失败路径统一输出 `{"error": "..."}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &RelayError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        // 406 沿用上游契约：解析失败历史上就返回 NOT_ACCEPTABLE，客户端依赖它
        let status_code = match &self {
            RelayError::Parse(_) => StatusCode::NOT_ACCEPTABLE,
            RelayError::UnsupportedProtocol => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_response = ErrorResponse::new(&self);
        (status_code, Json(error_response)).into_response()
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Provider(err.to_string())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, RelayError>;
