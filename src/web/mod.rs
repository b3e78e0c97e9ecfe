//! Web上报模块
//!
//! 提供存活上报HTTP端点和服务器

use crate::health::SnapshotStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod handlers;
pub mod server;

pub use server::{build_router, WebServer};

/// 上报端点共享状态
///
/// 只持有快照存储的共享引用，端点读取时不会触发新的探测轮次。
#[derive(Clone)]
pub struct AppState {
    /// 快照存储
    pub store: Arc<SnapshotStore>,
    /// 上报的网关版本
    pub version: String,
}

impl AppState {
    /// 创建上报端点状态
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self {
            store,
            version: crate::VERSION.to_string(),
        }
    }
}

/// API错误响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    /// 错误消息
    pub error: String,
}

impl ApiError {
    /// 创建新的API错误
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
