//! OAuth 回调处理
//!
//! 两种回调形态共用同一套绑定逻辑：用授权码换令牌，拉取 Google 资料，
//! 按 google_id / 邮箱找回已有用户（找不到就创建新用户），落库绑定记录，
//! 最后签发本地 JWT 会话。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::{ClassHubError, Result};
use crate::models::oauth::requests::{OAuthCallbackQuery, OAuthCallbackRequest};
use crate::models::oauth::responses::OAuthLoginResponse;
use crate::models::users::entities::{GoogleLink, User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::{generate_random_password, hash_password};

use super::OAuthService;

pub async fn handle_callback(
    service: &OAuthService,
    body: OAuthCallbackRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    match complete_login(service, request, &body.code).await {
        Ok((user, access_token, refresh_token)) => {
            let refresh_cookie = JwtUtils::create_refresh_token_cookie(&refresh_token);
            let response = OAuthLoginResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
                user,
            };
            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response)))
        }
        Err(e) => {
            tracing::warn!("OAuth 回调处理失败: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                format!("Google authentication failed: {e}"),
            )))
        }
    }
}

/// 浏览器重定向形态：成功与失败都跳回前端页面，令牌走查询参数
pub async fn handle_callback_redirect(
    service: &OAuthService,
    query: OAuthCallbackQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let frontend = config.app.frontend_url.trim_end_matches('/');

    // 用户在授权页拒绝时 Google 只回 error 参数
    let code = match (query.code, query.error) {
        (Some(code), _) => code,
        (None, error) => {
            let reason = error.unwrap_or_else(|| "missing authorization code".to_string());
            tracing::warn!("OAuth 重定向回调失败: {}", reason);
            return Ok(HttpResponse::Found()
                .insert_header(("Location", format!("{frontend}/oauth/callback?error={reason}")))
                .finish());
        }
    };

    match complete_login(service, request, &code).await {
        Ok((_, access_token, refresh_token)) => {
            let refresh_cookie = JwtUtils::create_refresh_token_cookie(&refresh_token);
            Ok(HttpResponse::Found()
                .cookie(refresh_cookie)
                .insert_header((
                    "Location",
                    format!("{frontend}/oauth/callback?token={access_token}"),
                ))
                .finish())
        }
        Err(e) => {
            tracing::warn!("OAuth 重定向回调失败: {}", e);
            Ok(HttpResponse::Found()
                .insert_header((
                    "Location",
                    format!("{frontend}/oauth/callback?error=authentication_failed"),
                ))
                .finish())
        }
    }
}

/// 授权码 -> (用户, 本地 access token, 本地 refresh token)
async fn complete_login(
    service: &OAuthService,
    request: &HttpRequest,
    code: &str,
) -> Result<(User, String, String)> {
    let storage = service.get_storage(request);
    let provider = service.get_provider(request);
    let classroom = service.get_classroom(request);

    // 1. 授权码换令牌
    let tokens = provider.exchange_code(code).await?;

    // 2. 拉取 Google 资料；邮箱是账号匹配的依据，缺了没法继续
    let profile = classroom.get_user_profile(&tokens.access_token).await?;
    let email = profile
        .email
        .clone()
        .ok_or_else(|| ClassHubError::exchange_failed("Google 资料未返回邮箱"))?;

    // 3. 找回已绑定用户，其次按邮箱匹配本地账号，否则新建
    let user = match storage.get_user_by_google_id(&profile.id).await? {
        Some(user) => user,
        None => match storage.get_user_by_email(&email).await? {
            Some(user) => user,
            None => {
                let username = derive_username(&email, &profile.id);
                // OAuth 用户没有本地口令，占位一个随机强密码
                let password = hash_password(&generate_random_password(32))?;
                let created = storage
                    .create_user(CreateUserRequest {
                        username,
                        email: email.clone(),
                        password,
                        role: UserRole::User,
                        display_name: profile.name.clone(),
                    })
                    .await?;
                tracing::info!("通过 Google 登录创建新用户 (ID: {})", created.id);
                created
            }
        },
    };

    // 4. 落库绑定记录（覆盖旧令牌）
    storage
        .link_google_account(
            user.id,
            GoogleLink {
                google_id: profile.id.clone(),
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                token_expiry: tokens.expiry,
            },
        )
        .await?;
    let _ = storage.update_last_login(user.id).await;

    // 5. 签发本地会话
    let user = storage
        .get_user_by_id(user.id)
        .await?
        .ok_or_else(|| ClassHubError::not_found("用户在绑定后消失"))?;
    let token_pair = JwtUtils::generate_token_pair(user.id, &user.role.to_string(), None)
        .map_err(|e| ClassHubError::authentication(format!("签发会话令牌失败: {e}")))?;

    Ok((user, token_pair.access_token, token_pair.refresh_token))
}

/// 从邮箱前缀推导用户名，带 google_id 尾缀避免撞名
fn derive_username(email: &str, google_id: &str) -> String {
    let prefix: String = email
        .split('@')
        .next()
        .unwrap_or("student")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(10)
        .collect();
    let prefix = if prefix.len() < 3 {
        format!("user{prefix}")
    } else {
        prefix
    };
    let suffix: String = google_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .rev()
        .take(5)
        .collect();
    format!("{prefix}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::derive_username;

    #[test]
    fn test_derive_username_from_email_prefix() {
        let name = derive_username("jane.doe@example.edu", "108177312345678901234");
        assert!(name.starts_with("janedoe_"));
        assert!(name.len() <= 16);
    }

    #[test]
    fn test_derive_username_short_prefix_padded() {
        let name = derive_username("j@example.edu", "10817731");
        assert!(name.starts_with("userj_"));
    }
}
