use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 机器可读错误代码
///
/// `INVALID_TOKEN` 与 `UPSTREAM_UNAVAILABLE` 对前端有明确的补救语义：
/// 前者引导用户重新授权绑定，后者提示稍后重试。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    InvalidToken,
    UpstreamUnavailable,
    Unauthorized,
    AuthFailed,
    ValidationFailed,
    UsernameAlreadyExists,
    EmailAlreadyExists,
    RateLimitExceeded,
    NotFound,
    BadRequest,
    InternalServerError,
}

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: Some(code),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            code: None,
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            code: Some(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_omits_error_fields() {
        let resp = ApiResponse::success(42i32);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
        assert!(json.get("code").is_none());
    }

    #[test]
    fn test_error_code_wire_format() {
        let resp = ApiResponse::<()>::error_empty(ErrorCode::InvalidToken, "link your account");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "INVALID_TOKEN");
        assert_eq!(json["error"], "link your account");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_upstream_unavailable_code() {
        let json =
            serde_json::to_value(ErrorCode::UpstreamUnavailable).unwrap();
        assert_eq!(json, "UPSTREAM_UNAVAILABLE");
    }
}
