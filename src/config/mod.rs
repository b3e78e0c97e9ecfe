//! 配置管理模块
//!
//! 提供环境变量配置解析和验证功能

pub mod loader;
pub mod types;

// 重新导出主要类型
pub use loader::{ConfigLoader, EnvConfigLoader};
pub use types::{validate_config, GatewayConfig, PolicySource};
