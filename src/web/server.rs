//! Web服务器实现
//!
//! 提供存活上报端点的HTTP服务器和路由管理

use super::{handlers, AppState};
use crate::error::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 创建存活上报路由
///
/// 端点仅接受GET；同一路径上的其他方法统一落入405处理。
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/hello",
            get(handlers::live_check).fallback(handlers::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 存活上报Web服务器
pub struct WebServer {
    /// 监听地址
    listen_address: String,
    /// 监听端口
    listen_port: u16,
    /// 端点共享状态
    state: AppState,
    /// 关闭信号接收器
    shutdown_rx: broadcast::Receiver<()>,
}

impl WebServer {
    /// 创建新的Web服务器
    ///
    /// # 参数
    /// * `listen_address` - 监听地址
    /// * `listen_port` - 监听端口
    /// * `state` - 端点共享状态
    /// * `shutdown_rx` - 关闭信号接收器
    pub fn new(
        listen_address: impl Into<String>,
        listen_port: u16,
        state: AppState,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            listen_address: listen_address.into(),
            listen_port,
            state,
            shutdown_rx,
        }
    }

    /// 启动Web服务器，直到收到关闭信号后优雅退出
    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.listen_address, self.listen_port);
        let listener = TcpListener::bind(&addr).await?;

        info!("启动存活上报服务器，监听地址: {}", addr);
        info!("存活端点: http://{}/hello", addr);

        let router = build_router(self.state);
        let mut shutdown_rx = self.shutdown_rx;

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("接收到关闭信号，正在关闭存活上报服务器...");
            })
            .await?;

        info!("存活上报服务器已关闭");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::SnapshotStore;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_server_serves_and_shuts_down() {
        let state = AppState::new(Arc::new(SnapshotStore::new()));
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        // 端口0由内核分配，避免测试间冲突；这里只验证启动与优雅退出
        let server = WebServer::new("127.0.0.1", 0, state, shutdown_rx);
        let handle = tokio::spawn(server.start());

        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown_tx.send(()).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("服务器应在关闭信号后退出")
            .unwrap();
        assert!(result.is_ok());
    }
}
