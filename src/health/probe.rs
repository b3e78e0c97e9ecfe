//! 依赖探测器实现
//!
//! 定义探测接口以及键值存储、控制平面、授权RPC三类探测

use crate::config::{GatewayConfig, PolicySource};
use crate::error::{ConfigError, ProbeError, Result};
use crate::health::result::ComponentKind;
use async_trait::async_trait;
use redis::AsyncCommands;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

/// 存活标记键的前缀
const MARKER_KEY_PREFIX: &str = "livenesscheck-";

/// 存活标记键名
const MARKER_KEY: &str = "gateway-liveness-probe";

/// 存活标记的过期时间（秒）
const MARKER_TTL_SECS: u64 = 10;

/// 依赖探测器trait，定义探测接口
///
/// 探测内部错误通过`Err`返回，由执行方转换为fail结果，
/// 单个依赖的故障不会中断同一轮内其他依赖的测量。
#[async_trait]
pub trait DependencyProbe: Send + Sync {
    /// 依赖在快照中的固定键名
    fn name(&self) -> &'static str;

    /// 依赖类别
    fn component_kind(&self) -> ComponentKind;

    /// 执行一次探测
    async fn probe(&self) -> std::result::Result<(), ProbeError>;
}

/// 键值存储探测器
///
/// 健康定义为：能在调用内向主键值存储写入一个短期存活标记键。
pub struct RedisProbe {
    client: redis::Client,
}

impl RedisProbe {
    /// 创建键值存储探测器
    ///
    /// # 参数
    /// * `redis_url` - 存储连接URL
    pub fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| ConfigError::ParseError(format!("存储URL无效: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DependencyProbe for RedisProbe {
    fn name(&self) -> &'static str {
        "redis"
    }

    fn component_kind(&self) -> ComponentKind {
        ComponentKind::Datastore
    }

    async fn probe(&self) -> std::result::Result<(), ProbeError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = format!("{MARKER_KEY_PREFIX}{MARKER_KEY}");
        let _: () = conn.set_ex(key, MARKER_KEY, MARKER_TTL_SECS).await?;
        Ok(())
    }
}

/// 控制平面探测器
///
/// 仅在网关从控制平面拉取应用配置时启用；
/// 健康定义为：控制平面响应一次存活调用。
pub struct DashboardProbe {
    client: reqwest::Client,
    ping_url: String,
}

impl DashboardProbe {
    /// 创建控制平面探测器
    ///
    /// # 参数
    /// * `dashboard_url` - 控制平面基础URL
    /// * `timeout` - 单次请求超时
    pub fn new(dashboard_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()
            .map_err(ProbeError::Http)?;

        Ok(Self {
            client,
            ping_url: format!("{}/ping", dashboard_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl DependencyProbe for DashboardProbe {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn component_kind(&self) -> ComponentKind {
        ComponentKind::System
    }

    async fn probe(&self) -> std::result::Result<(), ProbeError> {
        let response = self.client.get(&self.ping_url).send().await?;

        if !response.status().is_success() {
            return Err(ProbeError::DashboardStatus {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}

/// 授权RPC通道探测器
///
/// 仅在策略来源配置为RPC通道时启用；
/// 健康定义为：能向RPC端点建立一条全新连接。
pub struct RpcProbe {
    addr: String,
}

impl RpcProbe {
    /// 创建RPC通道探测器
    ///
    /// # 参数
    /// * `addr` - RPC端点地址（host:port）
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }
}

#[async_trait]
impl DependencyProbe for RpcProbe {
    fn name(&self) -> &'static str {
        "rpc"
    }

    fn component_kind(&self) -> ComponentKind {
        ComponentKind::System
    }

    async fn probe(&self) -> std::result::Result<(), ProbeError> {
        // 连接建立成功即视为健康，连接随即关闭
        TcpStream::connect(&self.addr)
            .await
            .map_err(|_| ProbeError::RpcConnect)?;
        Ok(())
    }
}

/// 按配置构建启用的探测集合
///
/// 键值存储探测始终启用；控制平面与RPC探测按配置开关加入。
/// 探测未实际使用的依赖会产生虚假的失败信号，因此未配置的依赖不参与探测。
pub fn build_probes(config: &GatewayConfig) -> Result<Vec<Arc<dyn DependencyProbe>>> {
    let mut probes: Vec<Arc<dyn DependencyProbe>> =
        vec![Arc::new(RedisProbe::new(&config.redis_url)?)];

    if config.use_dashboard_config {
        let dashboard_url = config.dashboard_url.as_deref().ok_or_else(|| {
            ConfigError::ValidationError("启用控制平面配置时必须设置dashboard_url".to_string())
        })?;
        probes.push(Arc::new(DashboardProbe::new(
            dashboard_url,
            Duration::from_secs(config.probe_timeout_seconds),
        )?));
    }

    if config.policy_source == PolicySource::Rpc {
        let rpc_addr = config.rpc_addr.as_deref().ok_or_else(|| {
            ConfigError::ValidationError("策略来源为rpc时必须设置rpc_addr".to_string())
        })?;
        probes.push(Arc::new(RpcProbe::new(rpc_addr)));
    }

    Ok(probes)
}
