use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程实体
//
// 外部系统是唯一数据源：每次聚合请求重新拉取，不做本地持久化。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub state: String,
}
