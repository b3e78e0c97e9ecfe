//! 日志系统模块
//!
//! 提供结构化日志配置和初始化功能

use log::LevelFilter;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter, Layer};

/// 日志配置结构
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: LevelFilter,
    /// 日志文件路径（可选，设置后输出到文件）
    pub file_path: Option<PathBuf>,
    /// 是否输出到控制台
    pub console: bool,
    /// 是否使用JSON格式
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            file_path: None,
            console: true,
            json_format: false,
        }
    }
}

/// 全局初始化结果，保证日志系统只初始化一次
static INIT_RESULT: OnceLock<Result<(), String>> = OnceLock::new();

/// 初始化日志系统
///
/// # 参数
/// * `config` - 日志配置
///
/// # 返回
/// * `anyhow::Result<()>` - 初始化结果
///
/// 重复调用是安全的：后续调用复用首次初始化的结果。
pub fn setup_logging(config: &LogConfig) -> anyhow::Result<()> {
    let result = INIT_RESULT.get_or_init(|| perform_initialization(config).map_err(|e| e.to_string()));

    result
        .as_ref()
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("日志系统初始化失败: {}", e))
}

/// 执行实际的日志系统初始化
fn perform_initialization(config: &LogConfig) -> anyhow::Result<()> {
    // log crate 到 tracing 的桥接
    tracing_log::LogTracer::init()
        .map_err(|e| anyhow::anyhow!("LogTracer初始化失败: {}", e))?;

    let env_filter =
        EnvFilter::from_default_env().add_directive(level_directive(config.level));

    let result = if let Some(ref file_path) = config.file_path {
        let file = std::fs::File::create(file_path)
            .map_err(|e| anyhow::anyhow!("创建日志文件失败: {}", e))?;
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_timer(fmt::time::ChronoUtc::rfc_3339());

        registry().with(env_filter).with(file_layer).try_init()
    } else if config.json_format {
        let fmt_layer = fmt::layer()
            .json()
            .with_timer(fmt::time::ChronoUtc::rfc_3339())
            .boxed();

        registry().with(env_filter).with(fmt_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(fmt::time::ChronoUtc::rfc_3339())
            .with_ansi(config.console)
            .boxed();

        registry().with(env_filter).with(fmt_layer).try_init()
    };

    match result {
        Ok(()) => {
            tracing::debug!("日志系统初始化完成");
            Ok(())
        }
        Err(e) => {
            // 已被其他入口初始化过（常见于测试）视为成功
            let message = e.to_string();
            if message.contains("already initialized") || message.contains("has already been set") {
                Ok(())
            } else {
                Err(anyhow::anyhow!("tracing subscriber初始化失败: {}", message))
            }
        }
    }
}

/// 将 log::LevelFilter 转换为 tracing 的指令
fn level_directive(level: LevelFilter) -> tracing_subscriber::filter::Directive {
    use tracing_subscriber::filter::Directive;
    match level {
        LevelFilter::Off => Directive::from(tracing::level_filters::LevelFilter::OFF),
        LevelFilter::Error => Directive::from(tracing::Level::ERROR),
        LevelFilter::Warn => Directive::from(tracing::Level::WARN),
        LevelFilter::Info => Directive::from(tracing::Level::INFO),
        LevelFilter::Debug => Directive::from(tracing::Level::DEBUG),
        LevelFilter::Trace => Directive::from(tracing::Level::TRACE),
    }
}

/// 从配置的级别字符串构建日志配置
pub fn log_config_from_level(level: &str) -> LogConfig {
    let level = match level {
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    LogConfig {
        level,
        ..Default::default()
    }
}
