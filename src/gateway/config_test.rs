//! Tests for gateway configuration loading
//! 网关配置加载的测试

use clap::Parser;
use std::io::Write;

use crate::gateway::config::{CliArgs, GatewayConfig};

fn parse_args(args: &[&str]) -> CliArgs {
    let mut full = vec!["gateway"];
    full.extend_from_slice(args);
    CliArgs::parse_from(full)
}

#[test]
fn test_default_configuration() {
    let config = GatewayConfig::default();

    assert_eq!(config.http.addr.to_string(), "127.0.0.1:8080");
    assert_eq!(config.request_timeout, 30);
    assert!(config.public_url.is_none());
    assert_eq!(config.backends.patients, "127.0.0.1:9090");
    assert_eq!(config.backends.doctors, "127.0.0.1:9091");
    assert_eq!(config.backends.appointments, "127.0.0.1:9092");
    assert_eq!(config.backends.tasks, "127.0.0.1:9093");
    assert_eq!(config.log.level, "info");
}

#[test]
fn test_cli_overrides() {
    // A missing config file keeps defaults and lets CLI arguments win
    // 缺失的配置文件保留默认值，并让命令行参数生效
    let args = parse_args(&[
        "--config",
        "/nonexistent/config.toml",
        "--http-addr",
        "0.0.0.0:9000",
        "--public-url",
        "https://gw.clinic.example",
        "--patients-addr",
        "patients.internal:9090",
        "--request-timeout",
        "5",
        "--log-level",
        "debug",
    ]);

    let config = GatewayConfig::load_with_cli(&args).expect("configuration loads");

    assert_eq!(config.http.addr.to_string(), "0.0.0.0:9000");
    assert_eq!(
        config.public_url.as_deref(),
        Some("https://gw.clinic.example")
    );
    assert_eq!(config.backends.patients, "patients.internal:9090");
    // Untouched backends keep their defaults / 未覆盖的后端保留默认值
    assert_eq!(config.backends.doctors, "127.0.0.1:9091");
    assert_eq!(config.request_timeout, 5);
    assert_eq!(config.log.level, "debug");
}

#[test]
fn test_config_file_loading() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).expect("create config file");
    write!(
        file,
        r#"
public_url = "https://clinic.example"
request_timeout = 10

[http]
addr = "0.0.0.0:8081"

[log]
level = "warn"
format = "json"

[backends]
patients = "10.0.0.1:9090"
doctors = "10.0.0.2:9090"
appointments = "10.0.0.3:9090"
tasks = "10.0.0.4:9090"
"#
    )
    .expect("write config file");

    let args = parse_args(&["--config", path.to_str().unwrap()]);
    let config = GatewayConfig::load_with_cli(&args).expect("configuration loads");

    assert_eq!(config.http.addr.to_string(), "0.0.0.0:8081");
    assert_eq!(config.public_url.as_deref(), Some("https://clinic.example"));
    assert_eq!(config.request_timeout, 10);
    assert_eq!(config.backends.patients, "10.0.0.1:9090");
    assert_eq!(config.backends.tasks, "10.0.0.4:9090");
    assert_eq!(config.log.level, "warn");
    assert_eq!(config.log.format, "json");
}

#[test]
fn test_cli_overrides_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[http]
addr = "0.0.0.0:8081"

[backends]
tasks = "10.0.0.4:9090"
"#,
    )
    .expect("write config file");

    let args = parse_args(&[
        "--config",
        path.to_str().unwrap(),
        "--tasks-addr",
        "tasks.internal:9093",
    ]);
    let config = GatewayConfig::load_with_cli(&args).expect("configuration loads");

    // CLI wins over the file / 命令行优先于文件
    assert_eq!(config.backends.tasks, "tasks.internal:9093");
    // File values without CLI override stay / 没有命令行覆盖的文件值保留
    assert_eq!(config.http.addr.to_string(), "0.0.0.0:8081");
    // Fields absent from the file keep defaults / 文件中缺失的字段保留默认值
    assert_eq!(config.backends.patients, "127.0.0.1:9090");
}

#[test]
fn test_partial_config_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "request_timeout = 3\n").expect("write config file");

    let args = parse_args(&["--config", path.to_str().unwrap()]);
    let config = GatewayConfig::load_with_cli(&args).expect("configuration loads");

    assert_eq!(config.request_timeout, 3);
    assert_eq!(config.http.addr.to_string(), "127.0.0.1:8080");
    assert_eq!(config.backends.doctors, "127.0.0.1:9091");
}

#[test]
fn test_invalid_http_addr_fails() {
    let args = parse_args(&[
        "--config",
        "/nonexistent/config.toml",
        "--http-addr",
        "not-an-address",
    ]);
    assert!(GatewayConfig::load_with_cli(&args).is_err());
}
