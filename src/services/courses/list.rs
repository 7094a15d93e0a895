use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::ClassHubError;
use crate::middlewares::RequireJWT;
use crate::models::courses::responses::CourseListResponse;
use crate::models::{ApiResponse, ErrorCode};

use super::CourseService;

pub async fn handle_list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let provider = service.get_provider(request);
    let classroom = service.get_classroom(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let token = match provider.get_valid_token(&storage, user.id).await {
        Ok(token) => token,
        Err(e @ (ClassHubError::InvalidToken(_) | ClassHubError::RefreshFailed(_))) => {
            tracing::info!("用户 {} 无可用 Google 令牌: {}", user.id, e);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::InvalidToken,
                "Google account not linked or authorization expired, please link your account",
            )));
        }
        Err(e) => {
            tracing::error!("读取用户 {} 的令牌失败: {}", user.id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load Google credentials",
                )),
            );
        }
    };

    match classroom.list_courses(&token).await {
        Ok(courses) => {
            let response = CourseListResponse {
                total_count: courses.len() as i64,
                courses,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
        }
        Err(ClassHubError::InvalidToken(msg)) => {
            tracing::info!("用户 {} 的令牌被上游拒绝: {}", user.id, msg);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::InvalidToken,
                "Google authorization expired, please re-link your account",
            )))
        }
        Err(e) => {
            tracing::error!("课程列表拉取失败: {}", e);
            Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::UpstreamUnavailable,
                "Upstream service unavailable, please try again later",
            )))
        }
    }
}
