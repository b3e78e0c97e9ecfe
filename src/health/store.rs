//! 快照存储模块
//!
//! 保存最近一次发布的探测快照，提供无竞争的原子发布与读取

use crate::health::result::Snapshot;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 快照存储
///
/// 读写均只在瞬时的锁窗口内完成：探测本身不持有任何锁，
/// 发布是一次整体替换，读者要么看到旧快照、要么看到新快照，
/// 不存在半写状态。首次发布前读取返回空快照。
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    /// 创建空的快照存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 原子地以新快照整体替换当前快照
    pub async fn publish(&self, snapshot: Snapshot) {
        let mut current = self.current.write().await;
        *current = Arc::new(snapshot);
    }

    /// 读取最近发布的快照
    ///
    /// 返回共享引用，调用方不可变更；首次发布前返回空快照。
    pub async fn current(&self) -> Arc<Snapshot> {
        self.current.read().await.clone()
    }
}
