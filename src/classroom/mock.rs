//! 测试用的内存版 `ClassroomApi` 实现
//!
//! 按 (course_id, coursework_id) 预置返回值或故障，并支持给单门课程
//! 注入人工延迟，用来验证并发完成顺序不影响输出顺序。

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::classroom::ClassroomApi;
use crate::classroom::wire::{CourseWork, StudentSubmission, UserProfile};
use crate::errors::{ClassHubError, Result};
use crate::models::courses::entities::Course;

#[derive(Default)]
pub struct MockClassroomApi {
    courses: Vec<Course>,
    courses_fail: bool,
    coursework: HashMap<String, Vec<CourseWork>>,
    coursework_failures: HashSet<String>,
    coursework_delays: HashMap<String, Duration>,
    submissions: HashMap<(String, String), Vec<StudentSubmission>>,
    submission_failures: HashSet<(String, String)>,
    profile: Option<UserProfile>,
}

impl MockClassroomApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self
    }

    pub fn with_courses_failure(mut self) -> Self {
        self.courses_fail = true;
        self
    }

    pub fn with_coursework(mut self, course_id: &str, items: Vec<CourseWork>) -> Self {
        self.coursework.insert(course_id.to_string(), items);
        self
    }

    pub fn with_coursework_failure(mut self, course_id: &str) -> Self {
        self.coursework_failures.insert(course_id.to_string());
        self
    }

    pub fn with_coursework_delay(mut self, course_id: &str, delay: Duration) -> Self {
        self.coursework_delays.insert(course_id.to_string(), delay);
        self
    }

    pub fn with_submissions(
        mut self,
        course_id: &str,
        coursework_id: &str,
        submissions: Vec<StudentSubmission>,
    ) -> Self {
        self.submissions
            .insert((course_id.to_string(), coursework_id.to_string()), submissions);
        self
    }

    pub fn with_submission_failure(mut self, course_id: &str, coursework_id: &str) -> Self {
        self.submission_failures
            .insert((course_id.to_string(), coursework_id.to_string()));
        self
    }

    pub fn with_profile(mut self, id: &str) -> Self {
        self.profile = Some(UserProfile {
            id: id.to_string(),
            email: None,
            name: None,
        });
        self
    }
}

#[async_trait::async_trait]
impl ClassroomApi for MockClassroomApi {
    async fn list_courses(&self, _token: &str) -> Result<Vec<Course>> {
        if self.courses_fail {
            return Err(ClassHubError::upstream_unavailable("课程列表不可用"));
        }
        Ok(self.courses.clone())
    }

    async fn list_coursework(&self, _token: &str, course_id: &str) -> Result<Vec<CourseWork>> {
        if let Some(delay) = self.coursework_delays.get(course_id) {
            tokio::time::sleep(*delay).await;
        }
        if self.coursework_failures.contains(course_id) {
            return Err(ClassHubError::upstream_unavailable(format!(
                "课程 {course_id} 作业列表不可用"
            )));
        }
        Ok(self.coursework.get(course_id).cloned().unwrap_or_default())
    }

    async fn list_submissions(
        &self,
        _token: &str,
        course_id: &str,
        coursework_id: &str,
        _user_id: &str,
    ) -> Result<Vec<StudentSubmission>> {
        let key = (course_id.to_string(), coursework_id.to_string());
        if self.submission_failures.contains(&key) {
            return Err(ClassHubError::upstream_unavailable("提交记录不可用"));
        }
        Ok(self.submissions.get(&key).cloned().unwrap_or_default())
    }

    async fn get_user_profile(&self, _token: &str) -> Result<UserProfile> {
        self.profile
            .clone()
            .ok_or_else(|| ClassHubError::upstream_unavailable("用户资料不可用"))
    }
}
