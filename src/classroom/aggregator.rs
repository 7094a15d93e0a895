//! 作业聚合编排
//!
//! 流程：令牌已由 OAuth 提供方备好 -> 列课程 -> 逐课程拉作业并逐条
//! 解析提交状态 -> 按课程顺序拼接。课程内部的任何失败都被封死在
//! 课程边界：该课程贡献空集、记一条警告，其余课程照常返回。
//!
//! 并发只用于降低延迟：课程与条目两级都走有界的顺序流
//! （`stream::buffered` 按输入顺序产出，与完成先后无关），
//! 因此输出顺序始终等于上游课程顺序 + 课程内条目顺序。

use futures_util::{StreamExt, stream};
use std::time::Duration;
use tracing::{info, warn};

use crate::classroom::{ClassroomApi, status};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::assignments::entities::AggregatedAssignment;
use crate::models::courses::entities::Course;

/// 未能确定外部用户 ID 时的哨兵值，上游将其解释为"当前授权用户"
const SELF_USER_ID: &str = "me";

/// 聚合过程的资源上限
#[derive(Debug, Clone)]
pub struct AggregationLimits {
    /// 同时在途的上游调用数（课程级与条目级共用此上限）
    pub max_concurrency: usize,
    /// 单门课程的整体处理超时；挂死的课程按失败课程处理
    pub course_timeout: Duration,
}

impl AggregationLimits {
    pub fn from_config() -> Self {
        let config = AppConfig::get();
        Self {
            max_concurrency: config.classroom.max_concurrency.max(1),
            course_timeout: Duration::from_secs(config.classroom.course_timeout),
        }
    }
}

/// 聚合当前用户的全部作业
///
/// 致命错误只有两类：课程列表本身拉不下来（`UpstreamUnavailable`），
/// 或令牌被上游拒绝（`InvalidToken`）。其余失败都被课程边界吸收。
pub async fn aggregate_assignments(
    api: &dyn ClassroomApi,
    token: &str,
    limits: &AggregationLimits,
) -> Result<Vec<AggregatedAssignment>> {
    // 1-2. 课程列表失败是全局失败：没有"部分课程列表"这种概念
    let courses = api.list_courses(token).await?;
    info!("聚合开始：{} 门活跃课程", courses.len());

    // 3. 外部用户 ID 只解析一次；资料查询失败不阻塞聚合，退回哨兵值
    let user_id = match api.get_user_profile(token).await {
        Ok(profile) => profile.id,
        Err(e) => {
            warn!("获取用户资料失败: {e}，使用 \"{SELF_USER_ID}\" 作为用户标识");
            SELF_USER_ID.to_string()
        }
    };

    // 4. 逐课程独立处理；buffered 保证产出顺序 == courses 顺序
    let user_id = user_id.as_str();
    let per_course: Vec<Vec<AggregatedAssignment>> = stream::iter(courses.iter().map(|course| {
        async move {
            let outcome = tokio::time::timeout(
                limits.course_timeout,
                process_course(api, token, user_id, course, limits.max_concurrency),
            )
            .await;

            match outcome {
                Ok(Ok(assignments)) => assignments,
                Ok(Err(e)) => {
                    warn!("跳过课程 {} ({}): {e}", course.name, course.id);
                    Vec::new()
                }
                Err(_) => {
                    warn!(
                        "课程 {} ({}) 处理超时（>{:?}），跳过",
                        course.name, course.id, limits.course_timeout
                    );
                    Vec::new()
                }
            }
        }
    }))
    .buffered(limits.max_concurrency)
    .collect()
    .await;

    // 5. 按课程顺序拼接
    let assignments: Vec<AggregatedAssignment> = per_course.into_iter().flatten().collect();

    let solved = assignments.iter().filter(|a| a.is_solved).count();
    info!(
        "聚合完成：共 {} 条作业，已完成 {}，未完成 {}",
        assignments.len(),
        solved,
        assignments.len() - solved
    );

    Ok(assignments)
}

/// 处理单门课程：拉作业列表，逐条解析提交状态并归一化截止时间
///
/// 返回 Err 只会发生在作业列表本身拉取失败；单条状态解析的失败
/// 已在 `status::resolve_status` 内部降级，不会到达这里。
async fn process_course(
    api: &dyn ClassroomApi,
    token: &str,
    user_id: &str,
    course: &Course,
    max_concurrency: usize,
) -> Result<Vec<AggregatedAssignment>> {
    let coursework = api.list_coursework(token, &course.id).await?;

    let assignments = stream::iter(coursework.into_iter().map(|work| {
        async move {
            let status =
                status::resolve_status(api, token, &course.id, &work.id, user_id).await;
            AggregatedAssignment::from_parts(&course.name, work.into_item(&course.id), status)
        }
    }))
    .buffered(max_concurrency)
    .collect()
    .await;

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classroom::mock::MockClassroomApi;
    use crate::classroom::wire::{CourseWork, StudentSubmission};
    use crate::errors::ClassHubError;
    use crate::models::assignments::entities::SubmissionState;

    fn course(id: &str, name: &str) -> Course {
        Course {
            id: id.to_string(),
            name: name.to_string(),
            state: "ACTIVE".to_string(),
        }
    }

    fn work(id: &str, title: &str) -> CourseWork {
        CourseWork {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            due_date: None,
            due_time: None,
            creation_time: None,
            update_time: None,
            max_points: None,
            work_type: None,
            state: None,
            alternate_link: None,
            materials: Vec::new(),
        }
    }

    fn turned_in(id: &str) -> StudentSubmission {
        StudentSubmission {
            id: id.to_string(),
            state: Some("TURNED_IN".to_string()),
            update_time: None,
        }
    }

    fn limits(concurrency: usize) -> AggregationLimits {
        AggregationLimits {
            max_concurrency: concurrency,
            course_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_course_listing_failure_is_fatal() {
        let api = MockClassroomApi::new().with_courses_failure();

        let err = aggregate_assignments(&api, "token", &limits(4))
            .await
            .unwrap_err();
        assert!(matches!(err, ClassHubError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_single_course_failure_is_isolated() {
        let api = MockClassroomApi::new()
            .with_profile("user-9")
            .with_courses(vec![
                course("a", "Course A"),
                course("b", "Course B"),
                course("c", "Course C"),
            ])
            .with_coursework("a", vec![work("a1", "A first")])
            .with_coursework_failure("b")
            .with_coursework("c", vec![work("c1", "C first")]);

        let assignments = aggregate_assignments(&api, "token", &limits(4))
            .await
            .unwrap();

        let ids: Vec<&str> = assignments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "c1"]);
    }

    #[tokio::test]
    async fn test_output_order_is_independent_of_completion_order() {
        // 第一门课故意最慢：若按完成顺序产出，它的条目会排到最后
        let api = MockClassroomApi::new()
            .with_profile("user-9")
            .with_courses(vec![
                course("slow", "Slow"),
                course("mid", "Mid"),
                course("fast", "Fast"),
            ])
            .with_coursework_delay("slow", Duration::from_millis(150))
            .with_coursework_delay("mid", Duration::from_millis(50))
            .with_coursework("slow", vec![work("s1", "one"), work("s2", "two")])
            .with_coursework("mid", vec![work("m1", "one")])
            .with_coursework("fast", vec![work("f1", "one")]);

        let assignments = aggregate_assignments(&api, "token", &limits(4))
            .await
            .unwrap();

        let ids: Vec<&str> = assignments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "m1", "f1"]);
    }

    #[tokio::test]
    async fn test_hung_course_times_out_and_is_skipped() {
        let api = MockClassroomApi::new()
            .with_profile("user-9")
            .with_courses(vec![course("hung", "Hung"), course("ok", "Ok")])
            .with_coursework_delay("hung", Duration::from_millis(500))
            .with_coursework("hung", vec![work("h1", "never")])
            .with_coursework("ok", vec![work("o1", "fine")]);

        let tight = AggregationLimits {
            max_concurrency: 4,
            course_timeout: Duration::from_millis(100),
        };
        let assignments = aggregate_assignments(&api, "token", &tight).await.unwrap();

        let ids: Vec<&str> = assignments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["o1"]);
    }

    #[tokio::test]
    async fn test_profile_failure_falls_back_to_self_sentinel() {
        // 不配置 profile：资料查询失败，但聚合必须照常完成
        let api = MockClassroomApi::new()
            .with_courses(vec![course("a", "Course A")])
            .with_coursework("a", vec![work("a1", "First")])
            .with_submissions("a", "a1", vec![turned_in("sub-1")]);

        let assignments = aggregate_assignments(&api, "token", &limits(2))
            .await
            .unwrap();

        assert_eq!(assignments.len(), 1);
        assert!(assignments[0].is_solved);
    }

    #[tokio::test]
    async fn test_end_to_end_partial_failure_shape() {
        // 课程 A 有一条已提交作业，课程 B 的作业列表失败：
        // 结果应当只含 A 的条目，且标记为已完成
        let api = MockClassroomApi::new()
            .with_profile("user-1")
            .with_courses(vec![course("a", "Course A"), course("b", "Course B")])
            .with_coursework("a", vec![work("a1", "Essay")])
            .with_submissions("a", "a1", vec![turned_in("sub-1")])
            .with_coursework_failure("b");

        let assignments = aggregate_assignments(&api, "token", &limits(4))
            .await
            .unwrap();

        assert_eq!(assignments.len(), 1);
        let only = &assignments[0];
        assert_eq!(only.id, "a1");
        assert_eq!(only.course_name, "Course A");
        assert!(only.is_solved);
        assert_eq!(only.submission_state, SubmissionState::TurnedIn);
    }

    #[tokio::test]
    async fn test_statuses_are_attached_per_item() {
        let api = MockClassroomApi::new()
            .with_profile("user-1")
            .with_courses(vec![course("a", "Course A")])
            .with_coursework("a", vec![work("a1", "One"), work("a2", "Two")])
            .with_submissions("a", "a1", vec![turned_in("sub-1")])
            .with_submissions("a", "a2", vec![]);

        let assignments = aggregate_assignments(&api, "token", &limits(1))
            .await
            .unwrap();

        assert_eq!(assignments.len(), 2);
        assert!(assignments[0].is_solved);
        assert!(!assignments[1].is_solved);
        assert_eq!(assignments[1].submission_state, SubmissionState::New);
    }
}
