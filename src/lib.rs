//! clinic-gateway: REST edge gateway for the clinic microservices
//! clinic-gateway: 诊所微服务的REST边缘网关

// Shared modules / 共享模块
pub mod config;
pub mod proto;

// Service-specific modules / 服务特定模块
pub mod gateway;

// Re-exports / 重新导出
pub use config::*;
