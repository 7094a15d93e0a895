//! ClassHub - 课堂作业聚合后端服务
//!
//! 基于 Actix Web 构建的 Google Classroom 作业聚合服务：本地账号认证，
//! 绑定 Google 账号后聚合多课程的作业与提交状态。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `classroom`: 上游 Classroom 访问层（客户端、OAuth、聚合管线）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod classroom;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
