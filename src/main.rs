//! Gateway Vitals 主程序入口
//!
//! 网关存活探测聚合服务

use anyhow::{Context, Result};
use clap::Parser;
use gateway_vitals::config::{ConfigLoader, EnvConfigLoader, GatewayConfig};
use gateway_vitals::health::{build_probes, CycleRunner, LivenessScheduler, SnapshotStore};
use gateway_vitals::logging;
use gateway_vitals::web::{AppState, WebServer};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(
    name = "gateway-vitals",
    version = gateway_vitals::VERSION,
    about = gateway_vitals::APP_DESCRIPTION,
    long_about = None
)]
struct Args {
    /// 日志级别，覆盖 GATEWAY_LOG_LEVEL
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 配置在启动时读取一次，运行期间的环境变更不被观察
    let config = EnvConfigLoader::new().load().context("加载配置失败")?;

    let log_level = args.log_level.as_deref().unwrap_or(&config.log_level);
    let log_config = logging::log_config_from_level(log_level);
    logging::setup_logging(&log_config).context("初始化日志系统失败")?;

    info!("Gateway Vitals v{} 启动", gateway_vitals::VERSION);

    if let Err(e) = run(config).await {
        error!("服务运行失败: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// 服务主逻辑
async fn run(config: GatewayConfig) -> Result<()> {
    let (shutdown_tx, _) = broadcast::channel(1);

    spawn_signal_listener(shutdown_tx.clone());

    let probes = build_probes(&config).context("构建探测集合失败")?;
    info!("已启用 {} 个依赖探测", probes.len());

    // 快照存储由本函数持有并分发给调度器与上报端点
    let store = Arc::new(SnapshotStore::new());
    let runner = Arc::new(CycleRunner::new(
        probes,
        Arc::clone(&store),
        Duration::from_secs(config.probe_timeout_seconds),
    ));

    let scheduler = LivenessScheduler::new(runner, config.check_interval_seconds);
    let scheduler_handle = scheduler.start(shutdown_tx.subscribe());

    let state = AppState::new(store);
    let server = WebServer::new(
        config.listen_address.clone(),
        config.listen_port,
        state,
        shutdown_tx.subscribe(),
    );
    server.start().await.context("存活上报服务器运行失败")?;

    // HTTP服务器退出后等待调度循环收尾
    scheduler_handle.stopped().await;
    info!("服务已停止");

    Ok(())
}

/// 监听进程中断信号并广播关闭
fn spawn_signal_listener(shutdown_tx: broadcast::Sender<()>) {
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("收到中断信号，正在停止服务...");
                let _ = shutdown_tx.send(());
            }
            Err(err) => {
                error!("监听中断信号失败: {}", err);
            }
        }
    });
}
