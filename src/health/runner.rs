//! 探测轮次执行器
//!
//! 并发执行一轮所有启用的探测，等待全部完成后整体发布快照

use crate::error::ProbeError;
use crate::health::probe::DependencyProbe;
use crate::health::result::{ProbeResult, Snapshot};
use crate::health::store::SnapshotStore;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// 轮次执行器
///
/// 每轮将所有启用的探测作为并行任务发起，在汇合点等待全部完成，
/// 再把完整的结果映射一次性发布到快照存储；不存在部分结果可见的时刻。
pub struct CycleRunner {
    probes: Vec<Arc<dyn DependencyProbe>>,
    store: Arc<SnapshotStore>,
    probe_timeout: Duration,
}

impl CycleRunner {
    /// 创建轮次执行器
    ///
    /// # 参数
    /// * `probes` - 启用的探测集合
    /// * `store` - 快照存储
    /// * `probe_timeout` - 单个探测的超时上限
    pub fn new(
        probes: Vec<Arc<dyn DependencyProbe>>,
        store: Arc<SnapshotStore>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            probes,
            store,
            probe_timeout,
        }
    }

    /// 执行一轮探测并发布快照
    ///
    /// 所有探测并行发起，结果按依赖名收集；任何探测的失败都被
    /// 记录为fail结果而不会中断本轮其余探测。
    pub async fn run_cycle(&self) {
        let handles: Vec<_> = self
            .probes
            .iter()
            .map(|probe| {
                let probe = Arc::clone(probe);
                let timeout = self.probe_timeout;
                let name = probe.name();
                let kind = probe.component_kind();

                let task =
                    tokio::spawn(async move { execute_probe(probe.as_ref(), timeout).await });

                async move {
                    let result = match task.await {
                        Ok(result) => result,
                        // 探测任务本身异常终止也只记为fail，不影响其他探测
                        Err(e) => {
                            error!(probe = name, "探测任务异常终止: {}", e);
                            ProbeResult::fail(kind, format!("probe task failed: {e}"))
                        }
                    };
                    (name.to_string(), result)
                }
            })
            .collect();

        let snapshot: Snapshot = join_all(handles).await.into_iter().collect();

        debug!("探测轮次完成，依赖数量: {}", snapshot.len());
        self.store.publish(snapshot).await;
    }
}

/// 执行单个探测并转换为探测结果
///
/// 超时或内部错误均转换为fail结果；完成时刻取探测结束的时间。
async fn execute_probe(probe: &dyn DependencyProbe, timeout: Duration) -> ProbeResult {
    match tokio::time::timeout(timeout, probe.probe()).await {
        Ok(Ok(())) => ProbeResult::pass(probe.component_kind()),
        Ok(Err(e)) => {
            error!(liveness_check = true, probe = probe.name(), "依赖探测失败: {}", e);
            ProbeResult::fail(probe.component_kind(), e.to_string())
        }
        Err(_) => {
            let e = ProbeError::Timeout {
                seconds: timeout.as_secs(),
            };
            error!(liveness_check = true, probe = probe.name(), "依赖探测超时: {}", e);
            ProbeResult::fail(probe.component_kind(), e.to_string())
        }
    }
}
