use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::oauth::responses::GoogleLinkStatusResponse;
use crate::models::{ApiResponse, ErrorCode};

use super::OAuthService;

pub async fn handle_status(
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

    match storage.get_google_link(user_id).await {
        Ok(Some(link)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(GoogleLinkStatusResponse {
                linked: true,
                google_id: Some(link.google_id),
                token_expiry: link.token_expiry,
            })))
        }
        Ok(None) => Ok(HttpResponse::Ok().json(ApiResponse::success(GoogleLinkStatusResponse {
            linked: false,
            google_id: None,
            token_expiry: None,
        }))),
        Err(e) => {
            tracing::error!("查询绑定状态失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to query link status",
                )),
            )
        }
    }
}
