//! Google OAuth2 令牌提供方
//!
//! 持有授权端点配置，负责授权链接、授权码换取与令牌刷新。
//! 持久化的令牌记录只在这里更新（单次原子写），聚合管线拿到的
//! 永远是一个已经可用的不可变 access token。

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{AppConfig, OAuthConfig};
use crate::errors::{ClassHubError, Result};
use crate::models::users::entities::GoogleLink;
use crate::storage::Storage;

/// 一次授权码交换 / 刷新得到的令牌集合
#[derive(Debug, Clone)]
pub struct OAuthTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

/// 上游令牌端点的响应体
#[derive(Debug, Deserialize)]
struct TokenEndpointPayload {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenEndpointPayload {
    fn into_tokens(self) -> OAuthTokens {
        OAuthTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expiry: self
                .expires_in
                .map(|secs| Utc::now() + chrono::Duration::seconds(secs)),
        }
    }
}

pub struct GoogleOAuthProvider {
    http: reqwest::Client,
    oauth: OAuthConfig,
}

impl GoogleOAuthProvider {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        Self::with_settings(
            config.classroom.oauth.clone(),
            Duration::from_secs(config.classroom.request_timeout),
        )
    }

    /// 配置显式传入的构造方式，测试可注入假端点
    pub fn with_settings(oauth: OAuthConfig, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| {
                ClassHubError::upstream_unavailable(format!("构建 HTTP 客户端失败: {e}"))
            })?;
        Ok(Self { http, oauth })
    }

    /// 生成授权跳转链接
    ///
    /// `access_type=offline` + `prompt=consent` 确保拿到 refresh token。
    pub fn authorization_url(&self) -> Result<String> {
        let url = reqwest::Url::parse_with_params(
            &self.oauth.auth_url,
            &[
                ("client_id", self.oauth.client_id.as_str()),
                ("redirect_uri", self.oauth.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", &self.oauth.scopes.join(" ")),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| ClassHubError::validation(format!("授权端点 URL 非法: {e}")))?;

        Ok(url.to_string())
    }

    /// 用授权码换取令牌
    pub async fn exchange_code(&self, code: &str) -> Result<OAuthTokens> {
        let payload = self
            .token_request(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", &self.oauth.client_id),
                ("client_secret", &self.oauth.client_secret),
                ("redirect_uri", &self.oauth.redirect_uri),
            ])
            .await
            .map_err(|e| ClassHubError::exchange_failed(format!("授权码交换被拒绝: {e}")))?;

        debug!("授权码交换成功");
        Ok(payload.into_tokens())
    }

    /// 刷新 access token
    pub async fn refresh(&self, refresh_token: &str) -> Result<OAuthTokens> {
        let payload = self
            .token_request(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", &self.oauth.client_id),
                ("client_secret", &self.oauth.client_secret),
            ])
            .await
            .map_err(|e| ClassHubError::refresh_failed(format!("令牌刷新被拒绝: {e}")))?;

        debug!("access token 刷新成功");
        Ok(payload.into_tokens())
    }

    /// 取出当前可用的 access token；需要时先刷新并落库
    ///
    /// 未绑定、绑定已失效且无法刷新时返回 `InvalidToken`，
    /// 上层据此引导用户重新授权，而不是提示稍后重试。
    pub async fn get_valid_token(
        &self,
        storage: &Arc<dyn Storage>,
        user_id: i64,
    ) -> Result<String> {
        let link = storage
            .get_google_link(user_id)
            .await?
            .ok_or_else(|| ClassHubError::invalid_token("用户尚未绑定 Google 账号"))?;

        if link.is_access_token_valid() {
            return Ok(link.access_token);
        }

        let refresh_token = link
            .refresh_token
            .ok_or_else(|| ClassHubError::invalid_token("绑定已过期且没有 refresh token"))?;

        let tokens = self.refresh(&refresh_token).await.map_err(|e| {
            // 刷新被上游拒绝说明绑定已经作废，补救手段同样是重新授权
            ClassHubError::invalid_token(format!("刷新失败，需要重新绑定: {e}"))
        })?;

        // 上游可能轮换 refresh token；没给新值时保留旧的
        let next_refresh = tokens.refresh_token.clone().or(Some(refresh_token));
        storage
            .update_google_tokens(user_id, &tokens.access_token, next_refresh, tokens.expiry)
            .await?;

        info!("用户 {} 的 Google access token 已刷新", user_id);
        Ok(tokens.access_token)
    }

    /// 主动刷新并落库（供 `/oauth/google/refresh` 端点使用）
    pub async fn refresh_for_user(
        &self,
        storage: &Arc<dyn Storage>,
        user_id: i64,
    ) -> Result<GoogleLink> {
        let link = storage
            .get_google_link(user_id)
            .await?
            .ok_or_else(|| ClassHubError::invalid_token("用户尚未绑定 Google 账号"))?;

        let refresh_token = link
            .refresh_token
            .clone()
            .ok_or_else(|| ClassHubError::refresh_failed("没有可用的 refresh token"))?;

        let tokens = self.refresh(&refresh_token).await?;
        let next_refresh = tokens.refresh_token.clone().or(Some(refresh_token));
        storage
            .update_google_tokens(user_id, &tokens.access_token, next_refresh.clone(), tokens.expiry)
            .await?;

        Ok(GoogleLink {
            google_id: link.google_id,
            access_token: tokens.access_token,
            refresh_token: next_refresh,
            token_expiry: tokens.expiry,
        })
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenEndpointPayload> {
        let response = self
            .http
            .post(&self.oauth.token_url)
            .form(form)
            .send()
            .await
            .map_err(|e| ClassHubError::upstream_unavailable(format!("请求令牌端点失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassHubError::upstream_unavailable(format!(
                "令牌端点返回 {status}: {body}"
            )));
        }

        response.json::<TokenEndpointPayload>().await.map_err(|e| {
            ClassHubError::upstream_unavailable(format!("解析令牌端点响应失败: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_oauth_config() -> OAuthConfig {
        OAuthConfig {
            client_id: "client-1".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://localhost:3000/callback".to_string(),
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            scopes: vec![
                "https://www.googleapis.com/auth/classroom.courses.readonly".to_string(),
                "https://www.googleapis.com/auth/userinfo.email".to_string(),
            ],
        }
    }

    #[test]
    fn test_authorization_url_carries_expected_params() {
        let provider =
            GoogleOAuthProvider::with_settings(test_oauth_config(), Duration::from_secs(5))
                .unwrap();
        let url = provider.authorization_url().unwrap();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-1"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        // scope 以空格拼接后整体编码
        assert!(url.contains("classroom.courses.readonly"));
    }

    #[test]
    fn test_token_payload_expiry_derived_from_expires_in() {
        let payload = TokenEndpointPayload {
            access_token: "at".to_string(),
            refresh_token: Some("rt".to_string()),
            expires_in: Some(3600),
        };
        let before = Utc::now();
        let tokens = payload.into_tokens();
        let expiry = tokens.expiry.unwrap();

        assert!(expiry > before + chrono::Duration::seconds(3500));
        assert!(expiry < before + chrono::Duration::seconds(3700));
        assert_eq!(tokens.refresh_token.as_deref(), Some("rt"));
    }

    #[test]
    fn test_token_payload_without_expiry() {
        let payload = TokenEndpointPayload {
            access_token: "at".to_string(),
            refresh_token: None,
            expires_in: None,
        };
        let tokens = payload.into_tokens();
        assert!(tokens.expiry.is_none());
        assert!(tokens.refresh_token.is_none());
    }
}
