use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::oauth::requests::{OAuthCallbackQuery, OAuthCallbackRequest};
use crate::services::OAuthService;

// 懒加载的全局 OAuthService 实例
static OAUTH_SERVICE: Lazy<OAuthService> = Lazy::new(OAuthService::new_lazy);

// 生成授权跳转链接
pub async fn authorize_url(req: HttpRequest) -> ActixResult<HttpResponse> {
    OAUTH_SERVICE.authorize_url(&req).await
}

// 浏览器重定向回调（Google 直接跳回）
pub async fn callback_redirect(
    req: HttpRequest,
    query: web::Query<OAuthCallbackQuery>,
) -> ActixResult<HttpResponse> {
    OAUTH_SERVICE
        .callback_redirect(query.into_inner(), &req)
        .await
}

// SPA 回调（前端拿到授权码后 POST）
pub async fn callback(
    req: HttpRequest,
    body: web::Json<OAuthCallbackRequest>,
) -> ActixResult<HttpResponse> {
    OAUTH_SERVICE.callback(body.into_inner(), &req).await
}

// 主动刷新 access token
pub async fn refresh(req: HttpRequest) -> ActixResult<HttpResponse> {
    OAUTH_SERVICE.refresh(&req).await
}

// 查询绑定状态
pub async fn status(req: HttpRequest) -> ActixResult<HttpResponse> {
    OAUTH_SERVICE.status(&req).await
}

// 解除绑定
pub async fn unlink(req: HttpRequest) -> ActixResult<HttpResponse> {
    OAUTH_SERVICE.unlink(&req).await
}

// 配置路由
pub fn configure_oauth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/oauth/google")
            .route("/url", web::get().to(authorize_url))
            .service(
                web::resource("/callback")
                    // GET 给浏览器重定向，POST 给 SPA
                    .route(web::get().to(callback_redirect))
                    .route(web::post().to(callback))
                    .wrap(RateLimit::oauth_callback()),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/refresh", web::post().to(refresh))
                    .route("/status", web::get().to(status))
                    .route("", web::delete().to(unlink)),
            ),
    );
}
