//! 存活探测模块
//!
//! 提供依赖探测、轮次执行、快照存储和调度功能

pub mod probe;
pub mod result;
pub mod runner;
pub mod scheduler;
pub mod store;

// 重新导出主要类型
pub use probe::{build_probes, DashboardProbe, DependencyProbe, RedisProbe, RpcProbe};
pub use result::{
    aggregate_status, AggregateReport, ComponentKind, HealthStatus, ProbeResult, Snapshot,
    REPORT_DESCRIPTION,
};
pub use runner::CycleRunner;
pub use scheduler::{LivenessScheduler, SchedulerHandle};
pub use store::SnapshotStore;
