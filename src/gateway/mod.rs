//! Clinic REST gateway module
//! 诊所REST网关模块
//!
//! This module contains everything the edge gateway needs to translate the
//! public REST surface into backend gRPC calls:
//! 此模块包含边缘网关将公共REST表面转换为后端gRPC调用所需的一切：
//!
//! - Bearer credential extraction / Bearer凭证提取
//! - Generic per-resource adapters / 通用的每资源适配器
//! - Pagination link synthesis / 分页链接合成
//! - Backend outcome to HTTP status mapping / 后端结果到HTTP状态的映射
//!
//! ## Architecture / 架构
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │ HTTP request │──▶│ bearer middleware │──▶│ resource adapter │
//! │ HTTP请求     │   │ Bearer中间件      │   │ 资源适配器        │
//! └──────────────┘   └──────────────────┘   └────────┬─────────┘
//!                                                    │ gRPC
//!                               ┌────────────────────┴──────────────┐
//!                               │ patients / doctors /              │
//!                               │ appointments / tasks backends     │
//!                               └───────────────────────────────────┘
//! ```
//!
//! ## Module Structure / 模块结构
//!
//! - `config`: gateway-specific configuration / 网关特定配置
//! - `auth`: bearer token middleware / Bearer令牌中间件
//! - `adapter`: generic REST-to-RPC operation handlers / 通用REST到RPC操作处理器
//! - `pagination`: previous/next link builder / 上一页/下一页链接构建器
//! - `error`: error taxonomy and HTTP mapping / 错误分类和HTTP映射
//! - `schemas`: public REST payload types / 公共REST负载类型
//! - `resources`: per-resource backend bindings / 每资源后端绑定
//! - `routes`: route table / 路由表
//! - `http_gateway`: server bootstrap / 服务器引导

pub mod adapter;
pub mod auth;
pub mod config;
pub mod error;
pub mod http_gateway;
pub mod pagination;
pub mod resources;
pub mod routes;
pub mod schemas;

#[cfg(test)]
pub mod config_test;
#[cfg(test)]
pub mod pagination_test;

// Re-export commonly used types / 重新导出常用类型
pub use auth::Credential;
pub use error::{ErrorResponse, GatewayError};
pub use http_gateway::HttpGateway;
