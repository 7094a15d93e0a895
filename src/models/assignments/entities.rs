use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 上游提交记录状态
//
// 上游未定义的状态字符串一律映射为 Unknown，绝不报错。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum SubmissionState {
    New,
    Created,
    TurnedIn,
    Returned,
    ReclaimedByStudent,
    Unknown,
}

impl SubmissionState {
    /// 作业是否视为已完成：仅 TURNED_IN / RETURNED 两种状态算完成
    pub fn is_solved(self) -> bool {
        matches!(self, SubmissionState::TurnedIn | SubmissionState::Returned)
    }
}

impl From<&str> for SubmissionState {
    fn from(s: &str) -> Self {
        match s {
            "NEW" => SubmissionState::New,
            "CREATED" => SubmissionState::Created,
            "TURNED_IN" => SubmissionState::TurnedIn,
            "RETURNED" => SubmissionState::Returned,
            "RECLAIMED_BY_STUDENT" => SubmissionState::ReclaimedByStudent,
            _ => SubmissionState::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for SubmissionState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SubmissionState::from(s.as_str()))
    }
}

// 针对单个 (课程, 作业, 用户) 解析出的提交状态
//
// 每次聚合请求重新计算，不持久化。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmissionStatus {
    pub is_solved: bool,
    pub state: SubmissionState,
    pub submission_id: Option<String>,
    pub update_time: Option<String>,
}

impl SubmissionStatus {
    /// 无提交记录：视为尚未开始，而不是错误
    pub fn not_started() -> Self {
        Self {
            is_solved: false,
            state: SubmissionState::New,
            submission_id: None,
            update_time: None,
        }
    }

    /// 状态查询失败时的兜底值：宁可显示未完成，也不让整次聚合失败
    pub fn unknown() -> Self {
        Self {
            is_solved: false,
            state: SubmissionState::Unknown,
            submission_id: None,
            update_time: None,
        }
    }

    pub fn from_state(state: SubmissionState, submission_id: String, update_time: Option<String>) -> Self {
        Self {
            is_solved: state.is_solved(),
            state,
            submission_id: Some(submission_id),
            update_time,
        }
    }
}

// 单条作业条目（归一化后的上游 courseWork）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CourseworkItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub course_id: String,
    /// 归一化后的截止时间 `YYYY-MM-DDTHH:MM:SS`，上游未设置时为 None
    pub due_date: Option<String>,
    pub creation_time: Option<String>,
    pub update_time: Option<String>,
    pub max_points: Option<f64>,
    pub work_type: String,
    pub state: String,
    pub alternate_link: Option<String>,
    #[ts(type = "unknown[]")]
    pub materials: Vec<serde_json::Value>,
}

// 聚合结果的最小单元：作业条目 + 提交状态 + 所属课程名
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AggregatedAssignment {
    pub id: String,
    pub title: String,
    pub description: String,
    pub course_name: String,
    pub course_id: String,
    pub due_date: Option<String>,
    pub creation_time: Option<String>,
    pub update_time: Option<String>,
    pub max_points: Option<f64>,
    pub work_type: String,
    pub state: String,
    pub alternate_link: Option<String>,
    #[ts(type = "unknown[]")]
    pub materials: Vec<serde_json::Value>,
    pub is_solved: bool,
    pub submission_state: SubmissionState,
    pub submission_id: Option<String>,
    pub submission_update_time: Option<String>,
}

impl AggregatedAssignment {
    pub fn from_parts(course_name: &str, item: CourseworkItem, status: SubmissionStatus) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            course_name: course_name.to_string(),
            course_id: item.course_id,
            due_date: item.due_date,
            creation_time: item.creation_time,
            update_time: item.update_time,
            max_points: item.max_points,
            work_type: item.work_type,
            state: item.state,
            alternate_link: item.alternate_link,
            materials: item.materials,
            is_solved: status.is_solved,
            submission_state: status.state,
            submission_id: status.submission_id,
            submission_update_time: status.update_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_iff_turned_in_or_returned() {
        assert!(SubmissionState::TurnedIn.is_solved());
        assert!(SubmissionState::Returned.is_solved());
        assert!(!SubmissionState::New.is_solved());
        assert!(!SubmissionState::Created.is_solved());
        assert!(!SubmissionState::ReclaimedByStudent.is_solved());
        assert!(!SubmissionState::Unknown.is_solved());
    }

    #[test]
    fn test_unmapped_state_string_is_unknown() {
        assert_eq!(SubmissionState::from("DRAFT_GRADE"), SubmissionState::Unknown);
        assert_eq!(SubmissionState::from(""), SubmissionState::Unknown);
        assert_eq!(
            SubmissionState::from("RECLAIMED_BY_STUDENT"),
            SubmissionState::ReclaimedByStudent
        );
    }

    #[test]
    fn test_status_constructors_are_never_solved() {
        assert!(!SubmissionStatus::not_started().is_solved);
        assert_eq!(SubmissionStatus::not_started().state, SubmissionState::New);
        assert!(!SubmissionStatus::unknown().is_solved);
        assert_eq!(SubmissionStatus::unknown().state, SubmissionState::Unknown);
    }

    #[test]
    fn test_from_state_derives_is_solved() {
        let status =
            SubmissionStatus::from_state(SubmissionState::TurnedIn, "sub-1".into(), None);
        assert!(status.is_solved);
        assert_eq!(status.submission_id.as_deref(), Some("sub-1"));

        let status = SubmissionStatus::from_state(SubmissionState::Created, "sub-2".into(), None);
        assert!(!status.is_solved);
    }

    #[test]
    fn test_submission_state_wire_format() {
        let json = serde_json::to_value(SubmissionState::TurnedIn).unwrap();
        assert_eq!(json, "TURNED_IN");
        let parsed: SubmissionState = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, SubmissionState::TurnedIn);
    }
}
