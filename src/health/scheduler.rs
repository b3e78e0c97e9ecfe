//! 存活探测调度器
//!
//! 以固定间隔驱动探测轮次，直至收到进程级关闭信号

use crate::health::runner::CycleRunner;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// 未配置或配置为0时使用的探测间隔（秒）
const DEFAULT_CHECK_INTERVAL_SECS: u64 = 10;

/// 存活探测调度器
///
/// 启动后立即执行首轮探测，随后每个间隔执行一轮；收到关闭信号
/// 即退出循环且不可重启。轮次在调度循环内串行执行，一轮未结束时
/// 到期的节拍直接跳过，因此不会出现并发的轮次。
pub struct LivenessScheduler {
    runner: Arc<CycleRunner>,
    interval: Duration,
}

impl LivenessScheduler {
    /// 创建调度器
    ///
    /// # 参数
    /// * `runner` - 轮次执行器
    /// * `interval_seconds` - 探测间隔（秒），0表示使用默认值
    pub fn new(runner: Arc<CycleRunner>, interval_seconds: u64) -> Self {
        let seconds = if interval_seconds == 0 {
            DEFAULT_CHECK_INTERVAL_SECS
        } else {
            interval_seconds
        };

        Self {
            runner,
            interval: Duration::from_secs(seconds),
        }
    }

    /// 启动调度循环
    ///
    /// 消费自身以保证调度器实例不可重复启动；返回的句柄可用于
    /// 查询运行状态以及等待循环退出。进行中的轮次不会被关闭信号
    /// 强行打断，信号在轮次之间或空闲等待时生效。
    pub fn start(self, mut shutdown_rx: broadcast::Receiver<()>) -> SchedulerHandle {
        let running = Arc::new(AtomicBool::new(true));
        let running_flag = Arc::clone(&running);
        let interval = self.interval;
        let runner = self.runner;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            info!("存活调度器已启动，探测间隔: {}s", interval.as_secs());

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!("停止所有依赖的存活探测");
                        break;
                    }
                    _ = ticker.tick() => {
                        runner.run_cycle().await;
                    }
                }
            }

            running_flag.store(false, Ordering::SeqCst);
        });

        SchedulerHandle { running, task }
    }
}

/// 调度器运行句柄
pub struct SchedulerHandle {
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// 调度循环是否仍在运行
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// 等待调度循环退出
    pub async fn stopped(self) {
        let _ = self.task.await;
    }
}
