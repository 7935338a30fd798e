//! Student Group Portal - 学生小组门户后端服务
//!
//! 基于 Actix Web 构建的小组、作业与提交管理 API。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证、授权与响应缓存中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
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

use actix_web::web;

use crate::config::AppConfig;
use crate::utils::{json_error_handler, path_error_handler, query_error_handler};

/// 注册参数错误处理器、请求体大小限制与全部路由
///
/// `main` 与集成测试共用，存储与缓存需由调用方以 `web::Data` 注入。
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    let config = AppConfig::get();

    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::PayloadConfig::new(config.server.limits.max_payload_size))
        .configure(routes::configure_api_routes);
}
