//! 探测结果数据结构
//!
//! 定义依赖健康状态枚举、单次探测结果、快照与聚合报告

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 健康状态枚举
///
/// 严重程度排序：fail > warn > pass。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// 依赖正常
    Pass,
    /// 部分依赖异常
    Warn,
    /// 依赖异常
    Fail,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Pass => write!(f, "pass"),
            HealthStatus::Warn => write!(f, "warn"),
            HealthStatus::Fail => write!(f, "fail"),
        }
    }
}

impl HealthStatus {
    /// 判断状态是否为健康
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Pass)
    }
}

/// 被探测依赖的类别，仅用于上报展示，不参与聚合计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// 普通组件
    Component,
    /// 数据存储
    Datastore,
    /// 系统级服务
    System,
}

/// 单次依赖探测结果
///
/// 每个启用的探测每轮恰好产生一条结果；被禁用的探测不产生结果。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// 健康状态
    pub status: HealthStatus,
    /// 失败详情（健康时省略）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// 依赖类别
    #[serde(rename = "componentType")]
    pub component_kind: ComponentKind,
    /// 组件标识（可选）
    #[serde(rename = "componentId", skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    /// 探测完成时刻（非发起时刻）
    #[serde(rename = "time")]
    pub observed_at: DateTime<Utc>,
}

impl ProbeResult {
    /// 创建健康结果，时间戳取当前时刻
    pub fn pass(component_kind: ComponentKind) -> Self {
        Self {
            status: HealthStatus::Pass,
            output: None,
            component_kind,
            component_id: None,
            observed_at: Utc::now(),
        }
    }

    /// 创建失败结果，`output` 携带失败详情
    pub fn fail(component_kind: ComponentKind, output: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Fail,
            output: Some(output.into()),
            component_kind,
            component_id: None,
            observed_at: Utc::now(),
        }
    }

    /// 设置组件标识
    pub fn with_component_id(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }
}

/// 快照：依赖名到最近一轮探测结果的映射
///
/// 每轮探测整体替换上一份快照，不做跨轮合并。
pub type Snapshot = HashMap<String, ProbeResult>;

/// 从快照推导聚合健康状态
///
/// 规则：无条目或无失败条目 → pass；全部失败 → fail；部分失败 → warn。
/// warn状态的单项只按"未失败"计入，不单独影响聚合结果。
pub fn aggregate_status(snapshot: &Snapshot) -> HealthStatus {
    let fail_count = snapshot
        .values()
        .filter(|item| item.status == HealthStatus::Fail)
        .count();

    match fail_count {
        0 => HealthStatus::Pass,
        n if n == snapshot.len() => HealthStatus::Fail,
        _ => HealthStatus::Warn,
    }
}

/// 存活端点上报的网关标识
pub const REPORT_DESCRIPTION: &str = "Tyk GW";

/// 聚合健康报告，由当前快照按需推导
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    /// 聚合健康状态
    pub status: HealthStatus,
    /// 网关版本
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub version: String,
    /// 网关标识
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    /// 各依赖的最近探测结果（为空时整体省略）
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub details: Snapshot,
}

impl AggregateReport {
    /// 从快照构建聚合报告
    pub fn from_snapshot(snapshot: Snapshot, version: impl Into<String>) -> Self {
        let status = aggregate_status(&snapshot);

        Self {
            status,
            version: version.into(),
            description: REPORT_DESCRIPTION.to_string(),
            details: snapshot,
        }
    }
}
