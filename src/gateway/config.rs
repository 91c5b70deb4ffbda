//! Gateway service configuration
//! 网关服务配置

use anyhow;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::config::base::{LogConfig, ServerConfig};

/// Gateway command line arguments / 网关命令行参数
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gateway",
    version = "0.1.0",
    about = "Clinic API gateway\n诊所API网关",
    long_about = "The gateway exposes the clinic REST surface and translates it into calls against the patients, doctors, appointments and tasks backends.\n网关公开诊所REST表面，并将其转换为对患者、医生、预约和任务后端的调用。"
)]
pub struct CliArgs {
    /// Configuration file path / 配置文件路径
    #[arg(short, long, value_name = "FILE", help = "Configuration file path / 配置文件路径")]
    pub config: Option<String>,

    /// HTTP listen address / HTTP监听地址
    #[arg(long, value_name = "ADDR", help = "HTTP listen address (e.g., 0.0.0.0:8080) / HTTP监听地址")]
    pub http_addr: Option<String>,

    /// Externally visible base URL / 外部可见的基础URL
    #[arg(long, value_name = "URL", help = "Externally visible base URL for pagination links / 分页链接的外部可见基础URL")]
    pub public_url: Option<String>,

    /// Patients backend address / 患者后端地址
    #[arg(long, value_name = "ADDR", help = "Patients backend address / 患者后端地址")]
    pub patients_addr: Option<String>,

    /// Doctors backend address / 医生后端地址
    #[arg(long, value_name = "ADDR", help = "Doctors backend address / 医生后端地址")]
    pub doctors_addr: Option<String>,

    /// Appointments backend address / 预约后端地址
    #[arg(long, value_name = "ADDR", help = "Appointments backend address / 预约后端地址")]
    pub appointments_addr: Option<String>,

    /// Tasks backend address / 任务后端地址
    #[arg(long, value_name = "ADDR", help = "Tasks backend address / 任务后端地址")]
    pub tasks_addr: Option<String>,

    /// Backend call timeout in seconds / 后端调用超时时间（秒）
    #[arg(long, value_name = "SECONDS", help = "Backend call timeout in seconds / 后端调用超时时间（秒）")]
    pub request_timeout: Option<u64>,

    /// Log level / 日志级别
    #[arg(long, value_name = "LEVEL", help = "Log level (trace, debug, info, warn, error) / 日志级别")]
    pub log_level: Option<String>,
}

/// Gateway service configuration / 网关服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration / HTTP服务器配置
    pub http: ServerConfig,
    /// Logging configuration / 日志配置
    pub log: LogConfig,
    /// Externally visible base URL; forwarding headers are used when unset
    /// 外部可见的基础URL；未设置时使用转发头
    pub public_url: Option<String>,
    /// Backend call timeout in seconds / 后端调用超时时间（秒）
    pub request_timeout: u64,
    /// Backend addresses / 后端地址
    pub backends: BackendsConfig,
}

/// Backend service addresses / 后端服务地址
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendsConfig {
    pub patients: String,
    pub doctors: String,
    pub appointments: String,
    pub tasks: String,
}

impl GatewayConfig {
    /// Load configuration with CLI arguments override / 使用CLI参数覆盖加载配置
    pub fn load_with_cli(args: &CliArgs) -> anyhow::Result<Self> {
        // Start with default configuration / 从默认配置开始
        let mut config = Self::default();

        // Try loading from home directory first / 优先从用户主目录加载配置
        // Home path: ~/.clinic-gateway/config.toml
        // 主目录路径：~/.clinic-gateway/config.toml
        if args.config.is_none() {
            // Prefer CLINIC_GATEWAY_HOME if set to avoid interfering with
            // global HOME in tests
            // 若设置了CLINIC_GATEWAY_HOME则优先使用，避免测试中修改全局HOME产生干扰
            let base_home =
                std::env::var_os("CLINIC_GATEWAY_HOME").or_else(|| std::env::var_os("HOME"));
            if let Some(home_dir) = base_home {
                let home_path = std::path::PathBuf::from(home_dir)
                    .join(".clinic-gateway")
                    .join("config.toml");
                if home_path.exists() {
                    let cfg = std::fs::read_to_string(&home_path)?;
                    config = toml::from_str(&cfg)?;
                }
            }
        }

        // If home config not found, load from CLI-provided path if any
        // 如果未找到主目录配置，则从命令行提供的路径加载
        if let Some(config_path) = &args.config {
            let path = std::path::PathBuf::from(config_path);
            if path.exists() {
                let cfg = std::fs::read_to_string(&path)?;
                config = toml::from_str(&cfg)?;
            } else {
                tracing::info!("Config file '{}' not found, using defaults", config_path);
            }
        }

        // Override with CLI arguments / 使用CLI参数覆盖
        if let Some(http_addr) = &args.http_addr {
            config.http.addr = http_addr.parse()?;
        }

        if let Some(public_url) = &args.public_url {
            config.public_url = Some(public_url.clone());
        }

        if let Some(patients_addr) = &args.patients_addr {
            config.backends.patients = patients_addr.clone();
        }

        if let Some(doctors_addr) = &args.doctors_addr {
            config.backends.doctors = doctors_addr.clone();
        }

        if let Some(appointments_addr) = &args.appointments_addr {
            config.backends.appointments = appointments_addr.clone();
        }

        if let Some(tasks_addr) = &args.tasks_addr {
            config.backends.tasks = tasks_addr.clone();
        }

        if let Some(request_timeout) = args.request_timeout {
            config.request_timeout = request_timeout;
        }

        if let Some(log_level) = &args.log_level {
            config.log.level = log_level.clone();
        }

        Ok(config)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: ServerConfig {
                addr: "127.0.0.1:8080".parse().expect("valid default address"),
            },
            log: LogConfig::default(),
            public_url: None,
            request_timeout: 30,
            backends: BackendsConfig::default(),
        }
    }
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            patients: "127.0.0.1:9090".to_string(),
            doctors: "127.0.0.1:9091".to_string(),
            appointments: "127.0.0.1:9092".to_string(),
            tasks: "127.0.0.1:9093".to_string(),
        }
    }
}
