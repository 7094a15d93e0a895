//! 上游 REST 载荷结构
//!
//! 字段名与 Google Classroom v1 的 JSON 保持一致（camelCase），
//! 只保留聚合管线实际消费的字段，未知字段直接忽略。

use serde::Deserialize;

use crate::classroom::due_date::{DueDate, DueTime};
use crate::models::assignments::entities::CourseworkItem;
use crate::models::courses::entities::Course;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListPayload {
    #[serde(default)]
    pub courses: Vec<WireCourse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCourse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub course_state: Option<String>,
}

impl WireCourse {
    pub fn into_course(self) -> Course {
        Course {
            id: self.id,
            name: self.name,
            state: self.course_state.unwrap_or_else(|| "ACTIVE".to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWorkListPayload {
    #[serde(default)]
    pub course_work: Vec<CourseWork>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWork {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<DueDate>,
    #[serde(default)]
    pub due_time: Option<DueTime>,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub max_points: Option<f64>,
    #[serde(default)]
    pub work_type: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub alternate_link: Option<String>,
    #[serde(default)]
    pub materials: Vec<serde_json::Value>,
}

impl CourseWork {
    /// 归一化为内部作业条目：截止时间在此处统一成 `YYYY-MM-DDTHH:MM:SS`
    pub fn into_item(self, course_id: &str) -> CourseworkItem {
        let due_date =
            crate::classroom::due_date::format_due_date(self.due_date.as_ref(), self.due_time.as_ref());
        CourseworkItem {
            id: self.id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            course_id: course_id.to_string(),
            due_date,
            creation_time: self.creation_time,
            update_time: self.update_time,
            max_points: self.max_points,
            work_type: self.work_type.unwrap_or_else(|| "ASSIGNMENT".to_string()),
            state: self.state.unwrap_or_else(|| "PUBLISHED".to_string()),
            alternate_link: self.alternate_link,
            materials: self.materials,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionListPayload {
    #[serde(default)]
    pub student_submissions: Vec<StudentSubmission>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSubmission {
    pub id: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coursework_payload_deserializes_upstream_shape() {
        let json = r#"{
            "courseWork": [{
                "id": "cw-1",
                "title": "Week 3 lab",
                "dueDate": {"year": 2024, "month": 3, "day": 5},
                "dueTime": {"hours": 9, "minutes": 30},
                "maxPoints": 100,
                "workType": "ASSIGNMENT",
                "state": "PUBLISHED",
                "alternateLink": "https://classroom.google.com/c/x/a/y"
            }]
        }"#;
        let payload: CourseWorkListPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.course_work.len(), 1);

        let item = payload.course_work[0].clone().into_item("course-1");
        assert_eq!(item.due_date.as_deref(), Some("2024-03-05T09:30:00"));
        assert_eq!(item.course_id, "course-1");
        assert_eq!(item.description, "");
        assert_eq!(item.work_type, "ASSIGNMENT");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"courseWork": [{"id": "cw-2", "title": "Untitled"}]}"#;
        let payload: CourseWorkListPayload = serde_json::from_str(json).unwrap();
        let item = payload.course_work[0].clone().into_item("c");
        assert!(item.due_date.is_none());
        assert_eq!(item.work_type, "ASSIGNMENT");
        assert_eq!(item.state, "PUBLISHED");
        assert!(item.materials.is_empty());
    }

    #[test]
    fn test_empty_course_list_payload() {
        let payload: CourseListPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.courses.is_empty());
    }
}
