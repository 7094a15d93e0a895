//! 提交状态解析
//!
//! 对单个 (课程, 作业, 用户) 查询上游提交记录并折算成 `SubmissionStatus`。
//! 任何查询失败都在这里就地消化成 UNKNOWN/未完成，绝不向聚合层抛错。

use tracing::warn;

use crate::classroom::ClassroomApi;
use crate::models::assignments::entities::{SubmissionState, SubmissionStatus};

/// 解析提交状态（全路径无错误返回）
///
/// - 无提交记录 -> NEW / 未完成（尚未开始不是错误）
/// - 有记录 -> 取上游返回的第一条；上游对该列表没有排序承诺，
///   取首条是约定俗成的近似，不做按时间挑选
/// - 查询失败 -> UNKNOWN / 未完成，只记日志
pub async fn resolve_status(
    api: &dyn ClassroomApi,
    token: &str,
    course_id: &str,
    coursework_id: &str,
    user_id: &str,
) -> SubmissionStatus {
    match api
        .list_submissions(token, course_id, coursework_id, user_id)
        .await
    {
        Ok(submissions) => match submissions.into_iter().next() {
            Some(submission) => {
                let state = submission
                    .state
                    .as_deref()
                    .map(SubmissionState::from)
                    .unwrap_or(SubmissionState::Unknown);
                SubmissionStatus::from_state(state, submission.id, submission.update_time)
            }
            None => SubmissionStatus::not_started(),
        },
        Err(e) => {
            warn!(
                "查询提交状态失败 (course={course_id}, coursework={coursework_id}): {e}，按未完成处理"
            );
            SubmissionStatus::unknown()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classroom::mock::MockClassroomApi;
    use crate::classroom::wire::StudentSubmission;

    fn submission(id: &str, state: Option<&str>) -> StudentSubmission {
        StudentSubmission {
            id: id.to_string(),
            state: state.map(|s| s.to_string()),
            update_time: Some("2024-03-01T10:00:00Z".to_string()),
        }
    }

    #[tokio::test]
    async fn test_turned_in_resolves_solved() {
        let api = MockClassroomApi::new()
            .with_submissions("c1", "cw1", vec![submission("s1", Some("TURNED_IN"))]);

        let status = resolve_status(&api, "token", "c1", "cw1", "me").await;
        assert!(status.is_solved);
        assert_eq!(status.state, SubmissionState::TurnedIn);
        assert_eq!(status.submission_id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn test_returned_resolves_solved() {
        let api = MockClassroomApi::new()
            .with_submissions("c1", "cw1", vec![submission("s1", Some("RETURNED"))]);

        let status = resolve_status(&api, "token", "c1", "cw1", "me").await;
        assert!(status.is_solved);
        assert_eq!(status.state, SubmissionState::Returned);
    }

    #[tokio::test]
    async fn test_no_submission_is_not_started() {
        let api = MockClassroomApi::new().with_submissions("c1", "cw1", vec![]);

        let status = resolve_status(&api, "token", "c1", "cw1", "me").await;
        assert!(!status.is_solved);
        assert_eq!(status.state, SubmissionState::New);
        assert!(status.submission_id.is_none());
    }

    #[tokio::test]
    async fn test_first_submission_wins() {
        let api = MockClassroomApi::new().with_submissions(
            "c1",
            "cw1",
            vec![
                submission("s1", Some("CREATED")),
                submission("s2", Some("TURNED_IN")),
            ],
        );

        let status = resolve_status(&api, "token", "c1", "cw1", "me").await;
        // 取首条而不是"最完成"的那条
        assert!(!status.is_solved);
        assert_eq!(status.state, SubmissionState::Created);
        assert_eq!(status.submission_id.as_deref(), Some("s1"));
    }

    #[tokio::test]
    async fn test_unmapped_state_degrades_to_unknown() {
        let api = MockClassroomApi::new()
            .with_submissions("c1", "cw1", vec![submission("s1", Some("SOMETHING_NEW"))]);

        let status = resolve_status(&api, "token", "c1", "cw1", "me").await;
        assert!(!status.is_solved);
        assert_eq!(status.state, SubmissionState::Unknown);
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades_to_unknown() {
        let api = MockClassroomApi::new().with_submission_failure("c1", "cw1");

        let status = resolve_status(&api, "token", "c1", "cw1", "me").await;
        assert!(!status.is_solved);
        assert_eq!(status.state, SubmissionState::Unknown);
        assert!(status.submission_id.is_none());
    }
}
