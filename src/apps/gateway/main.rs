//! Clinic gateway main entry point
//! 诊所网关主入口点

use clap::Parser;
use std::sync::Arc;

use clinic_gateway::config::init_tracing;
use clinic_gateway::gateway::config::{CliArgs, GatewayConfig};
use clinic_gateway::gateway::HttpGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments / 解析命令行参数
    let args = CliArgs::parse();

    // Load configuration with home-first, then CLI override /
    // 先从主目录加载配置，其次使用命令行覆盖
    let config = Arc::new(GatewayConfig::load_with_cli(&args)?);

    // Initialize logging with configuration / 使用配置初始化日志
    init_tracing(&config.log.to_logging_config())?;

    tracing::info!("Clinic gateway starting with:");
    tracing::info!("  - HTTP server on: {}", config.http.addr);
    tracing::info!("  - Patients backend: {}", config.backends.patients);
    tracing::info!("  - Doctors backend: {}", config.backends.doctors);
    tracing::info!("  - Appointments backend: {}", config.backends.appointments);
    tracing::info!("  - Tasks backend: {}", config.backends.tasks);
    tracing::info!("  - Backend call timeout: {}s", config.request_timeout);
    if let Some(public_url) = &config.public_url {
        tracing::info!("  - Public URL: {}", public_url);
    }

    // A gateway without reachable backends must not serve traffic; connect
    // failures propagate and exit non-zero.
    // 没有可达后端的网关不得提供服务；连接失败会传播并以非零退出。
    let gateway = HttpGateway::new(config);
    gateway.start().await?;

    Ok(())
}
