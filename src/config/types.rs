//! 配置数据结构定义
//!
//! 定义存活子系统的配置结构体和验证逻辑

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 网关策略来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicySource {
    /// 本地文件
    #[default]
    File,
    /// 控制平面服务
    Service,
    /// 授权RPC通道
    Rpc,
}

impl FromStr for PolicySource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "file" => Ok(PolicySource::File),
            "service" => Ok(PolicySource::Service),
            "rpc" => Ok(PolicySource::Rpc),
            other => Err(format!("未知的策略来源: {other}")),
        }
    }
}

impl std::fmt::Display for PolicySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicySource::File => write!(f, "file"),
            PolicySource::Service => write!(f, "service"),
            PolicySource::Rpc => write!(f, "rpc"),
        }
    }
}

/// 存活子系统配置
///
/// 进程启动时从环境读取一次，运行期间的变更不被观察。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    /// 探测间隔（秒），0表示使用调度器默认值
    #[serde(default)]
    pub check_interval_seconds: u64,
    /// 单个探测的超时时间（秒）
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_seconds: u64,
    /// 主键值存储连接URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    /// 是否从控制平面拉取应用配置
    #[serde(default)]
    pub use_dashboard_config: bool,
    /// 控制平面基础URL
    #[serde(default)]
    pub dashboard_url: Option<String>,
    /// 策略来源
    #[serde(default)]
    pub policy_source: PolicySource,
    /// 授权RPC端点地址（host:port）
    #[serde(default)]
    pub rpc_addr: Option<String>,
    /// HTTP监听地址
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
    /// HTTP监听端口
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            check_interval_seconds: 0,
            probe_timeout_seconds: default_probe_timeout(),
            redis_url: default_redis_url(),
            use_dashboard_config: false,
            dashboard_url: None,
            policy_source: PolicySource::default(),
            rpc_addr: None,
            listen_address: default_listen_address(),
            listen_port: default_listen_port(),
            log_level: default_log_level(),
        }
    }
}

// 默认值函数
fn default_probe_timeout() -> u64 {
    5
}
fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/".to_string()
}
fn default_listen_address() -> String {
    "0.0.0.0".to_string()
}
fn default_listen_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".to_string()
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &GatewayConfig) -> Result<(), String> {
    if config.probe_timeout_seconds == 0 {
        return Err("探测超时时间不能为0".to_string());
    }

    if config.listen_port == 0 {
        return Err("监听端口不能为0".to_string());
    }

    if config.use_dashboard_config
        && config.dashboard_url.as_deref().unwrap_or("").is_empty()
    {
        return Err("启用控制平面配置时必须设置dashboard_url".to_string());
    }

    if config.policy_source == PolicySource::Rpc
        && config.rpc_addr.as_deref().unwrap_or("").is_empty()
    {
        return Err("策略来源为rpc时必须设置rpc_addr".to_string());
    }

    // 验证日志级别
    let valid_log_levels = ["debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.log_level.as_str()) {
        return Err(format!(
            "无效的日志级别: {}，支持的级别: {:?}",
            config.log_level, valid_log_levels
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GatewayConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.check_interval_seconds, 0);
        assert_eq!(config.probe_timeout_seconds, 5);
        assert_eq!(config.policy_source, PolicySource::File);
    }

    #[test]
    fn test_policy_source_parsing() {
        assert_eq!("rpc".parse::<PolicySource>().unwrap(), PolicySource::Rpc);
        assert_eq!(
            "service".parse::<PolicySource>().unwrap(),
            PolicySource::Service
        );
        assert_eq!("file".parse::<PolicySource>().unwrap(), PolicySource::File);
        assert_eq!("".parse::<PolicySource>().unwrap(), PolicySource::File);
        assert!("etcd".parse::<PolicySource>().is_err());
    }

    #[test]
    fn test_validate_dashboard_url_required() {
        let config = GatewayConfig {
            use_dashboard_config: true,
            ..GatewayConfig::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.contains("dashboard_url"));
    }

    #[test]
    fn test_validate_rpc_addr_required() {
        let config = GatewayConfig {
            policy_source: PolicySource::Rpc,
            ..GatewayConfig::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.contains("rpc_addr"));
    }

    #[test]
    fn test_validate_rejects_zero_probe_timeout() {
        let config = GatewayConfig {
            probe_timeout_seconds: 0,
            ..GatewayConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let config = GatewayConfig {
            log_level: "verbose".to_string(),
            ..GatewayConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
