//! Google Classroom 上游访问层
//!
//! 聚合管线只通过 `ClassroomApi` trait 访问上游，HTTP 细节（reqwest、分页参数、
//! 状态码映射）全部收在 `http` 模块内，测试用 mock 实现替换。
//! 令牌以不可变 `&str` 显式传入每次调用，调用之间不共享可变凭据。

pub mod aggregator;
pub mod due_date;
pub mod http;
pub mod oauth;
pub mod status;
pub mod wire;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::courses::entities::Course;
use wire::{CourseWork, StudentSubmission, UserProfile};

/// 上游课堂服务能力集合
///
/// 错误约定：
/// - 令牌被上游拒绝（401） -> `ClassHubError::InvalidToken`
/// - 课程不存在（404）     -> `ClassHubError::CourseNotFound`
/// - 其余传输/远端故障     -> `ClassHubError::UpstreamUnavailable`
#[async_trait::async_trait]
pub trait ClassroomApi: Send + Sync {
    /// 列出当前主体的活跃课程，保持上游返回顺序
    async fn list_courses(&self, token: &str) -> Result<Vec<Course>>;

    /// 列出一门课程的作业条目（含 PUBLISHED 与 DRAFT 两种状态）
    async fn list_coursework(&self, token: &str, course_id: &str) -> Result<Vec<CourseWork>>;

    /// 列出某作业下指定用户的提交记录
    async fn list_submissions(
        &self,
        token: &str,
        course_id: &str,
        coursework_id: &str,
        user_id: &str,
    ) -> Result<Vec<StudentSubmission>>;

    /// 查询当前授权用户的资料（用于确定外部用户 ID）
    async fn get_user_profile(&self, token: &str) -> Result<UserProfile>;
}

/// 创建生产环境的上游客户端
pub fn create_classroom_client() -> Result<Arc<dyn ClassroomApi>> {
    let client = http::GoogleClassroomClient::new()?;
    Ok(Arc::new(client))
}
