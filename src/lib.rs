//! Gateway Vitals - 网关存活探测聚合子系统
//!
//! 这是网关进程的存活/健康聚合子系统，支持：
//! - 周期性探测外部依赖（键值存储、控制平面、授权RPC通道）
//! - 并发探测与快照原子发布
//! - 基于快照的聚合健康状态（pass/warn/fail）
//! - HTTP存活上报端点
//! - 结构化日志记录

pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod web;

// 重新导出主要类型
pub use config::{GatewayConfig, PolicySource};
pub use error::GatewayVitalsError;
pub use health::{
    aggregate_status, AggregateReport, ComponentKind, CycleRunner, DependencyProbe, HealthStatus,
    LivenessScheduler, ProbeResult, Snapshot, SnapshotStore,
};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
