// ==========================================
// 合作伙伴日产量跟踪 - 配置层
// ==========================================
// 职责: 系统配置管理,支持多级覆写
// 存储: JSON 配置文件 + 环境变量
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{
    default_data_path, env_keys, AppConfig, ConfigError, ConfigManager, ConfigResult,
    StorageBackend,
};
