//! HTTP gateway server for the clinic REST surface
//! 诊所REST表面的HTTP网关服务器
//!
//! The gateway owns one long-lived channel per backend. Channels are
//! connected eagerly at startup: the process must not serve traffic with
//! unreachable backends, so any connect failure is fatal.
//! 网关为每个后端拥有一个长生命周期的通道。通道在启动时立即连接：
//! 进程不得在后端不可达时提供服务，因此任何连接失败都是致命的。

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tonic::transport::{Channel, Endpoint};
use tracing::{error, info};

use super::config::GatewayConfig;
use super::pagination::LinkBase;
use super::resources::{AppointmentsBackend, DoctorsBackend, PatientsBackend, TasksBackend};
use super::routes::{create_routes, Backends};

/// Clinic HTTP gateway / 诊所HTTP网关
pub struct HttpGateway {
    config: Arc<GatewayConfig>,
}

impl HttpGateway {
    /// Create a new HTTP gateway / 创建新的HTTP网关
    pub fn new(config: Arc<GatewayConfig>) -> Self {
        Self { config }
    }

    /// Start the HTTP gateway / 启动HTTP网关
    pub async fn start(self) -> Result<()> {
        info!("Starting clinic gateway on {}", self.config.http.addr);

        let backends = connect_backends(&self.config).await?;
        let link_base = LinkBase::from_config(self.config.public_url.as_deref())
            .context("invalid public_url in configuration")?;

        let app = create_routes(backends, link_base);

        let listener = tokio::net::TcpListener::bind(self.config.http.addr)
            .await
            .with_context(|| format!("bind {}", self.config.http.addr))?;

        info!("Clinic gateway listening on {}", self.config.http.addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("Clinic gateway error: {}", e);
                e
            })?;

        Ok(())
    }
}

/// Connect every backend channel eagerly / 立即连接每个后端通道
pub async fn connect_backends(config: &GatewayConfig) -> Result<Backends> {
    let timeout = Duration::from_secs(config.request_timeout);

    let patients = connect_channel(&config.backends.patients, timeout)
        .await
        .context("connect patients backend")?;
    let doctors = connect_channel(&config.backends.doctors, timeout)
        .await
        .context("connect doctors backend")?;
    let appointments = connect_channel(&config.backends.appointments, timeout)
        .await
        .context("connect appointments backend")?;
    let tasks = connect_channel(&config.backends.tasks, timeout)
        .await
        .context("connect tasks backend")?;

    Ok(Backends {
        patients: PatientsBackend::new(patients),
        doctors: DoctorsBackend::new(doctors),
        appointments: AppointmentsBackend::new(appointments),
        tasks: TasksBackend::new(tasks),
    })
}

/// Open a channel to one backend with an explicit per-call timeout
/// 打开到单个后端的通道，带有显式的每次调用超时
async fn connect_channel(addr: &str, timeout: Duration) -> Result<Channel> {
    info!("Connecting to backend at {}", addr);

    let endpoint = Endpoint::from_shared(format!("http://{}", addr))
        .with_context(|| format!("invalid backend address: {}", addr))?
        .timeout(timeout)
        .connect_timeout(timeout);

    let channel = endpoint
        .connect()
        .await
        .with_context(|| format!("backend unreachable at {}", addr))?;

    Ok(channel)
}

/// Resolve on Ctrl-C or SIGTERM / 在Ctrl-C或SIGTERM时解析
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Clinic gateway shutting down");
}
