use super::entities::AggregatedAssignment;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub assignments: Vec<AggregatedAssignment>,
    pub total_count: i64,
}
