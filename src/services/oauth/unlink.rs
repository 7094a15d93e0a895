use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

use super::OAuthService;

pub async fn handle_unlink(
    service: &OAuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    match storage.unlink_google_account(user_id).await {
        Ok(_) => {
            tracing::info!("用户 {} 解除了 Google 绑定", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty()))
        }
        Err(e) => {
            tracing::error!("解除绑定失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to unlink Google account",
                )),
            )
        }
    }
}
