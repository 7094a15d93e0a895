use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::ClassHubError;
use crate::middlewares::RequireJWT;
use crate::models::oauth::responses::TokenRefreshedResponse;
use crate::models::{ApiResponse, ErrorCode};

use super::OAuthService;

pub async fn handle_refresh(
    service: &OAuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let provider = service.get_provider(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    match provider.refresh_for_user(&storage, user_id).await {
        Ok(link) => Ok(HttpResponse::Ok().json(ApiResponse::success(TokenRefreshedResponse {
            refreshed: true,
            token_expiry: link.token_expiry,
        }))),
        // 未绑定或刷新被拒：都需要重新授权，统一回 INVALID_TOKEN
        Err(e @ (ClassHubError::InvalidToken(_) | ClassHubError::RefreshFailed(_))) => {
            tracing::info!("用户 {} 刷新 Google 令牌失败: {}", user_id, e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::InvalidToken,
                "Google authorization expired, please re-link your account",
            )))
        }
        Err(e) => {
            tracing::error!("用户 {} 刷新 Google 令牌出错: {}", user_id, e);
            Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::UpstreamUnavailable,
                "Upstream service unavailable, please try again later",
            )))
        }
    }
}
