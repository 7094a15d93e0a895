use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/oauth.ts")]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

// SPA 回调成功后返回本地会话令牌与用户信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/oauth.ts")]
pub struct OAuthLoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/oauth.ts")]
pub struct GoogleLinkStatusResponse {
    pub linked: bool,
    pub google_id: Option<String>,
    pub token_expiry: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/oauth.ts")]
pub struct TokenRefreshedResponse {
    pub refreshed: bool,
    pub token_expiry: Option<chrono::DateTime<chrono::Utc>>,
}
