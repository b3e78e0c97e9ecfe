//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Gateway Vitals 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum GatewayVitalsError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 依赖探测相关错误
    #[error("依赖探测错误: {0}")]
    Probe(#[from] ProbeError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置解析错误
    #[error("配置解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 环境变量读取错误
    #[error("环境变量 {var} 的值无效: {value}")]
    EnvVarError { var: String, value: String },
}

/// 依赖探测错误类型
///
/// 探测错误的Display文本会原样进入探测结果的output字段，
/// 因此保持与依赖客户端一致的英文描述。
#[derive(Error, Debug)]
pub enum ProbeError {
    /// 键值存储访问失败
    #[error("{0}")]
    Redis(#[from] redis::RedisError),

    /// 控制平面HTTP请求失败
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// 控制平面返回了非成功状态码
    #[error("dashboard liveness returned HTTP {status}")]
    DashboardStatus { status: u16 },

    /// RPC通道连接失败
    #[error("Could not connect to RPC")]
    RpcConnect,

    /// 探测超时
    #[error("probe timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, GatewayVitalsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_wire_text() {
        // 探测错误文本直接作为output上报，措辞需保持稳定
        assert_eq!(ProbeError::RpcConnect.to_string(), "Could not connect to RPC");
        assert_eq!(
            ProbeError::Timeout { seconds: 5 }.to_string(),
            "probe timed out after 5s"
        );
        assert_eq!(
            ProbeError::DashboardStatus { status: 503 }.to_string(),
            "dashboard liveness returned HTTP 503"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: GatewayVitalsError = ConfigError::ValidationError("监听端口不能为0".to_string()).into();
        assert!(err.to_string().contains("配置验证失败"));
    }
}
