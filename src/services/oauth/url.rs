use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::oauth::responses::AuthUrlResponse;
use crate::models::{ApiResponse, ErrorCode};

use super::OAuthService;

pub async fn handle_authorize_url(
    service: &OAuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let provider = service.get_provider(request);

    match provider.authorization_url() {
        Ok(auth_url) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(AuthUrlResponse { auth_url })))
        }
        Err(e) => {
            tracing::error!("生成授权链接失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to generate authorization URL",
                )),
            )
        }
    }
}
