//! HTTP routes for the clinic gateway
//! 诊所网关的HTTP路由
//!
//! This module composes the per-resource route sets, layers the bearer
//! middleware over every resource route, and mounts the unauthenticated
//! health endpoint.
//! 此模块组合每资源路由集，在每个资源路由上叠加Bearer中间件，
//! 并挂载无需认证的健康检查端点。

use axum::response::Json;
use axum::routing::get;
use axum::{middleware, Extension, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use super::adapter::resource_router;
use super::auth::require_bearer;
use super::pagination::LinkBase;
use super::resources::appointment::appointment_routes;
use super::resources::{AppointmentsBackend, DoctorsBackend, PatientsBackend, TasksBackend};

/// Connected backend handles, one per resource kind
/// 已连接的后端句柄，每个资源类型一个
#[derive(Clone)]
pub struct Backends {
    pub patients: PatientsBackend,
    pub doctors: DoctorsBackend,
    pub appointments: AppointmentsBackend,
    pub tasks: TasksBackend,
}

/// Create HTTP routes / 创建HTTP路由
pub fn create_routes(backends: Backends, link_base: LinkBase) -> Router {
    // Every resource route requires a bearer token; /health does not.
    // 每个资源路由都需要Bearer令牌；/health不需要。
    let resources = Router::new()
        .merge(resource_router(backends.patients))
        .merge(resource_router(backends.doctors))
        .merge(appointment_routes(backends.appointments))
        .merge(resource_router(backends.tasks))
        .layer(middleware::from_fn(require_bearer));

    Router::new()
        .route("/health", get(health_check))
        .merge(resources)
        .layer(Extension(link_base))
        .layer(CorsLayer::permissive()) // Add CORS support / 添加CORS支持
}

/// Health check endpoint / 健康检查端点
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "clinic-gateway"
    }))
}
