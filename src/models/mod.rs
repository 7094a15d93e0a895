pub mod assignments;
pub mod auth;
pub mod common;
pub mod courses;
pub mod oauth;
pub mod users;

pub use common::response::{ApiResponse, ErrorCode};

/// 应用启动时间（用于运行时长统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
