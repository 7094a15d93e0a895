use serde::Deserialize;
use ts_rs::TS;

// OAuth 回调（SPA POST 形式）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/oauth.ts")]
pub struct OAuthCallbackRequest {
    pub code: String,
}

// OAuth 回调（浏览器重定向 GET 形式）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/oauth.ts")]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}
