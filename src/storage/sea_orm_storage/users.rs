use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{ClassHubError, Result};
use crate::models::users::{
    entities::{GoogleLink, User, UserStatus},
    requests::CreateUserRequest,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }

    /// 通过 Google ID 获取已绑定用户
    pub async fn get_user_by_google_id_impl(&self, google_id: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::GoogleId.eq(google_id))
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询绑定用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 读取用户的 Google 绑定记录
    pub async fn get_google_link_impl(&self, user_id: i64) -> Result<Option<GoogleLink>> {
        let result = Users::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询绑定记录失败: {e}")))?;

        Ok(result.and_then(|m| m.into_google_link()))
    }

    /// 写入/覆盖 Google 绑定记录
    pub async fn link_google_account_impl(&self, user_id: i64, link: GoogleLink) -> Result<bool> {
        let model = ActiveModel {
            id: Set(user_id),
            google_id: Set(Some(link.google_id)),
            google_access_token: Set(Some(link.access_token)),
            google_refresh_token: Set(link.refresh_token),
            google_token_expiry: Set(link.token_expiry.map(|t| t.timestamp())),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("写入绑定记录失败: {e}")))?;

        Ok(true)
    }

    /// 刷新后更新令牌列
    pub async fn update_google_tokens_impl(
        &self,
        user_id: i64,
        access_token: &str,
        refresh_token: Option<String>,
        expiry: Option<DateTime<Utc>>,
    ) -> Result<bool> {
        let mut model = ActiveModel {
            id: Set(user_id),
            google_access_token: Set(Some(access_token.to_string())),
            google_token_expiry: Set(expiry.map(|t| t.timestamp())),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        // 上游未轮换 refresh token 时保持原值不动
        if let Some(refresh) = refresh_token {
            model.google_refresh_token = Set(Some(refresh));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新令牌失败: {e}")))?;

        Ok(true)
    }

    /// 解除 Google 绑定
    pub async fn unlink_google_account_impl(&self, user_id: i64) -> Result<bool> {
        let model = ActiveModel {
            id: Set(user_id),
            google_id: Set(None),
            google_access_token: Set(None),
            google_refresh_token: Set(None),
            google_token_expiry: Set(None),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("解除绑定失败: {e}")))?;

        Ok(true)
    }
}
