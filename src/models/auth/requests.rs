use serde::Deserialize;
use ts_rs::TS;

// 登录请求体
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 用户名或邮箱均可
    pub username: String,
    pub password: String,
    /// 记住我：延长 refresh token 有效期
    #[serde(default)]
    pub remember_me: bool,
}
