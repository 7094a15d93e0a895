//! Google Classroom REST 客户端（reqwest）
//!
//! 每次调用都携带显式的 Bearer 令牌，客户端自身不保存任何凭据。
//! 状态码映射见 `ClassroomApi` trait 的错误约定。

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::classroom::ClassroomApi;
use crate::classroom::wire::{
    CourseListPayload, CourseWork, CourseWorkListPayload, StudentSubmission,
    SubmissionListPayload, UserProfile,
};
use crate::config::AppConfig;
use crate::errors::{ClassHubError, Result};
use crate::models::courses::entities::Course;

pub struct GoogleClassroomClient {
    http: reqwest::Client,
    api_base_url: String,
    userinfo_url: String,
    page_size: u32,
}

impl GoogleClassroomClient {
    pub fn new() -> Result<Self> {
        let config = AppConfig::get();
        Self::with_endpoints(
            &config.classroom.api_base_url,
            &config.classroom.userinfo_url,
            config.classroom.page_size,
            Duration::from_secs(config.classroom.request_timeout),
        )
    }

    /// 端点显式传入的构造方式，便于在测试里指向本地假服务器
    pub fn with_endpoints(
        api_base_url: &str,
        userinfo_url: &str,
        page_size: u32,
        request_timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| {
                ClassHubError::upstream_unavailable(format!("构建 HTTP 客户端失败: {e}"))
            })?;

        Ok(Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            userinfo_url: userinfo_url.to_string(),
            page_size,
        })
    }

    /// 发起一次带令牌的 GET 并按约定映射错误
    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| ClassHubError::upstream_unavailable(format!("请求上游失败: {e}")))?;

        match response.status() {
            status if status.is_success() => response.json::<T>().await.map_err(|e| {
                ClassHubError::upstream_unavailable(format!("解析上游响应失败: {e}"))
            }),
            StatusCode::UNAUTHORIZED => Err(ClassHubError::invalid_token(
                "上游拒绝了访问令牌 (401)",
            )),
            StatusCode::NOT_FOUND => Err(ClassHubError::not_found(format!(
                "上游资源不存在: {url}"
            ))),
            status => Err(ClassHubError::upstream_unavailable(format!(
                "上游返回异常状态码 {status}: {url}"
            ))),
        }
    }
}

#[async_trait::async_trait]
impl ClassroomApi for GoogleClassroomClient {
    async fn list_courses(&self, token: &str) -> Result<Vec<Course>> {
        let url = format!("{}/courses", self.api_base_url);
        // 只要活跃课程，顺序保持上游返回顺序
        let payload: CourseListPayload = self
            .get_json(
                token,
                &url,
                &[
                    ("courseStates", "ACTIVE".to_string()),
                    ("pageSize", self.page_size.to_string()),
                ],
            )
            .await?;

        debug!("上游返回 {} 门活跃课程", payload.courses.len());
        Ok(payload
            .courses
            .into_iter()
            .map(|c| c.into_course())
            .collect())
    }

    async fn list_coursework(&self, token: &str, course_id: &str) -> Result<Vec<CourseWork>> {
        let url = format!("{}/courses/{}/courseWork", self.api_base_url, course_id);
        // DRAFT 状态也要：草稿作业对聚合方同样可见
        let payload: CourseWorkListPayload = self
            .get_json(
                token,
                &url,
                &[
                    ("courseWorkStates", "PUBLISHED".to_string()),
                    ("courseWorkStates", "DRAFT".to_string()),
                    ("pageSize", self.page_size.to_string()),
                ],
            )
            .await
            .map_err(|e| match e {
                // 课程级 404 转成明确的课程缺失错误
                ClassHubError::NotFound(_) => {
                    ClassHubError::course_not_found(format!("课程不存在: {course_id}"))
                }
                other => other,
            })?;

        debug!(
            "课程 {} 返回 {} 条作业",
            course_id,
            payload.course_work.len()
        );
        Ok(payload.course_work)
    }

    async fn list_submissions(
        &self,
        token: &str,
        course_id: &str,
        coursework_id: &str,
        user_id: &str,
    ) -> Result<Vec<StudentSubmission>> {
        let url = format!(
            "{}/courses/{}/courseWork/{}/studentSubmissions",
            self.api_base_url, course_id, coursework_id
        );
        let payload: SubmissionListPayload = self
            .get_json(token, &url, &[("userId", user_id.to_string())])
            .await?;

        Ok(payload.student_submissions)
    }

    async fn get_user_profile(&self, token: &str) -> Result<UserProfile> {
        self.get_json(token, &self.userinfo_url, &[]).await
    }
}
