//! 作业聚合端点
//!
//! 错误分两类回给前端：INVALID_TOKEN（引导重新绑定 Google 账号）
//! 与 UPSTREAM_UNAVAILABLE（提示稍后重试）。单门课程的失败不会出现
//! 在响应里，只体现为条目变少。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::classroom::aggregator::{self, AggregationLimits};
use crate::errors::ClassHubError;
use crate::middlewares::RequireJWT;
use crate::models::assignments::responses::AssignmentListResponse;
use crate::models::{ApiResponse, ErrorCode};

use super::AssignmentService;

pub async fn handle_list_assignments(
    service: &AssignmentService,
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

    // 1. 备好上游令牌；没有可用令牌时整个聚合短路，不发任何课程请求
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

    // 2. 跑聚合管线
    let limits = AggregationLimits::from_config();
    match aggregator::aggregate_assignments(classroom.as_ref(), &token, &limits).await {
        Ok(assignments) => {
            let response = AssignmentListResponse {
                total_count: assignments.len() as i64,
                assignments,
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
            tracing::error!("作业聚合失败: {}", e);
            Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                ErrorCode::UpstreamUnavailable,
                "Upstream service unavailable, please try again later",
            )))
        }
    }
}
