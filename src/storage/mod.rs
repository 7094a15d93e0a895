use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::users::{
    entities::{GoogleLink, User},
    requests::CreateUserRequest,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量（用于首次启动的管理员初始化）
    async fn count_users(&self) -> Result<u64>;

    /// Google 账号绑定方法
    // 通过 Google ID 找回已绑定用户（OAuth 回调用）
    async fn get_user_by_google_id(&self, google_id: &str) -> Result<Option<User>>;
    // 读取用户的绑定记录（含令牌），未绑定时为 None
    async fn get_google_link(&self, user_id: i64) -> Result<Option<GoogleLink>>;
    // 写入/覆盖绑定记录
    async fn link_google_account(&self, user_id: i64, link: GoogleLink) -> Result<bool>;
    // 刷新后更新令牌（单次原子写，由 OAuth 提供方独占调用）
    async fn update_google_tokens(
        &self,
        user_id: i64,
        access_token: &str,
        refresh_token: Option<String>,
        expiry: Option<DateTime<Utc>>,
    ) -> Result<bool>;
    // 解除绑定，清空全部 Google 列
    async fn unlink_google_account(&self, user_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
