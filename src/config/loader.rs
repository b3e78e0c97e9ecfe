//! 配置加载器实现
//!
//! 提供环境变量解析、类型转换和错误处理功能

use crate::config::types::{validate_config, GatewayConfig, PolicySource};
use crate::error::{ConfigError, Result};

/// 配置加载器trait，定义配置加载接口
pub trait ConfigLoader: Send + Sync {
    /// 加载配置
    ///
    /// # 返回
    /// * `Result<GatewayConfig>` - 加载的配置或错误
    fn load(&self) -> Result<GatewayConfig>;

    /// 验证配置
    ///
    /// # 参数
    /// * `config` - 要验证的配置
    ///
    /// # 返回
    /// * `Result<()>` - 验证结果
    fn validate(&self, config: &GatewayConfig) -> Result<()>;
}

/// 环境变量配置加载器实现
///
/// 在进程启动时读取一次 `{前缀}_*` 环境变量；运行中修改环境不生效。
#[derive(Debug, Clone)]
pub struct EnvConfigLoader {
    /// 环境变量前缀
    prefix: String,
}

impl Default for EnvConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvConfigLoader {
    /// 创建使用默认`GATEWAY`前缀的加载器
    pub fn new() -> Self {
        Self::with_prefix("GATEWAY")
    }

    /// 创建使用指定前缀的加载器
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// 读取单个环境变量，未设置时返回None
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, name)).ok()
    }

    /// 读取u64类型环境变量
    fn var_u64(&self, name: &str) -> Result<Option<u64>> {
        match self.var(name) {
            None => Ok(None),
            Some(value) => value.parse::<u64>().map(Some).map_err(|_| {
                ConfigError::EnvVarError {
                    var: format!("{}_{}", self.prefix, name),
                    value,
                }
                .into()
            }),
        }
    }

    /// 读取u16类型环境变量
    fn var_u16(&self, name: &str) -> Result<Option<u16>> {
        match self.var(name) {
            None => Ok(None),
            Some(value) => value.parse::<u16>().map(Some).map_err(|_| {
                ConfigError::EnvVarError {
                    var: format!("{}_{}", self.prefix, name),
                    value,
                }
                .into()
            }),
        }
    }

    /// 读取bool类型环境变量，接受true/false/1/0
    fn var_bool(&self, name: &str) -> Result<Option<bool>> {
        match self.var(name) {
            None => Ok(None),
            Some(value) => match value.as_str() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(ConfigError::EnvVarError {
                    var: format!("{}_{}", self.prefix, name),
                    value: value.clone(),
                }
                .into()),
            },
        }
    }
}

impl ConfigLoader for EnvConfigLoader {
    fn load(&self) -> Result<GatewayConfig> {
        let mut config = GatewayConfig::default();

        if let Some(interval) = self.var_u64("CHECK_INTERVAL")? {
            config.check_interval_seconds = interval;
        }
        if let Some(timeout) = self.var_u64("PROBE_TIMEOUT")? {
            config.probe_timeout_seconds = timeout;
        }
        if let Some(redis_url) = self.var("REDIS_URL") {
            config.redis_url = redis_url;
        }
        if let Some(use_dashboard) = self.var_bool("USE_DASHBOARD_CONFIG")? {
            config.use_dashboard_config = use_dashboard;
        }
        if let Some(dashboard_url) = self.var("DASHBOARD_URL") {
            config.dashboard_url = Some(dashboard_url);
        }
        if let Some(policy_source) = self.var("POLICY_SOURCE") {
            config.policy_source = policy_source
                .parse::<PolicySource>()
                .map_err(|_| ConfigError::EnvVarError {
                    var: format!("{}_POLICY_SOURCE", self.prefix),
                    value: policy_source,
                })?;
        }
        if let Some(rpc_addr) = self.var("RPC_ADDR") {
            config.rpc_addr = Some(rpc_addr);
        }
        if let Some(listen_address) = self.var("LISTEN_ADDRESS") {
            config.listen_address = listen_address;
        }
        if let Some(listen_port) = self.var_u16("LISTEN_PORT")? {
            config.listen_port = listen_port;
        }
        if let Some(log_level) = self.var("LOG_LEVEL") {
            config.log_level = log_level;
        }

        self.validate(&config)?;

        log::info!("配置加载完成，策略来源: {}", config.policy_source);
        log::debug!("配置内容: {:?}", config);

        Ok(config)
    }

    fn validate(&self, config: &GatewayConfig) -> Result<()> {
        validate_config(config).map_err(|e| ConfigError::ValidationError(e).into())
    }
}
