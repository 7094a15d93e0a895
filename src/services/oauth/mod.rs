pub mod callback;
pub mod refresh;
pub mod status;
pub mod unlink;
pub mod url;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::classroom::ClassroomApi;
use crate::classroom::oauth::GoogleOAuthProvider;
use crate::config::AppConfig;
use crate::models::oauth::requests::{OAuthCallbackQuery, OAuthCallbackRequest};
use crate::storage::Storage;

pub struct OAuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl OAuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_provider(&self, request: &HttpRequest) -> Arc<GoogleOAuthProvider> {
        request
            .app_data::<actix_web::web::Data<Arc<GoogleOAuthProvider>>>()
            .expect("OAuth provider not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_classroom(&self, request: &HttpRequest) -> Arc<dyn ClassroomApi> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ClassroomApi>>>()
            .expect("Classroom client not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 生成授权跳转链接
    pub async fn authorize_url(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        url::handle_authorize_url(self, request).await
    }

    // SPA 回调：前端拿到授权码后 POST 过来
    pub async fn callback(
        &self,
        body: OAuthCallbackRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        callback::handle_callback(self, body, request).await
    }

    // 浏览器重定向回调：Google 直接跳回后端
    pub async fn callback_redirect(
        &self,
        query: OAuthCallbackQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        callback::handle_callback_redirect(self, query, request).await
    }

    // 主动刷新已绑定账号的 access token
    pub async fn refresh(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        refresh::handle_refresh(self, request).await
    }

    // 查询绑定状态
    pub async fn status(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        status::handle_status(self, request).await
    }

    // 解除绑定
    pub async fn unlink(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        unlink::handle_unlink(self, request).await
    }
}
