// ==========================================
// 合作伙伴日产量跟踪 - 配置管理器
// ==========================================
// 职责: 配置加载与多级覆写
// 优先级: 默认值 < JSON 配置文件 < 环境变量 < 命令行参数
// 说明: 目标值（40kg / 84t / 2500t / 75%）为固定常量, 不在此配置
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// 默认数据文件名（与旧版工具一致）
pub const DEFAULT_DATA_FILE_NAME: &str = "data_produksi_harian.csv";

/// 应用目录名
const APP_DIR_NAME: &str = "mitra-tracker";

/// 环境变量键
pub mod env_keys {
    pub const CONFIG: &str = "MITRA_TRACKER_CONFIG";
    pub const DATA_FILE: &str = "MITRA_TRACKER_DATA_FILE";
    pub const BACKEND: &str = "MITRA_TRACKER_BACKEND";
    pub const LOCALE: &str = "MITRA_TRACKER_LOCALE";
    pub const LOG_JSON: &str = "MITRA_TRACKER_LOG_JSON";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    FileReadError { path: String, message: String },

    #[error("invalid config file {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// StorageBackend - 存储后端
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Csv,    // 单个 CSV 文件（默认）
    Sqlite, // SQLite 数据库
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Csv => write!(f, "csv"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(StorageBackend::Csv),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(ConfigError::InvalidValue {
                key: "backend".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub backend: StorageBackend,
    pub locale: String,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_path(),
            backend: StorageBackend::Csv,
            locale: "en".to_string(),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置: 默认值 → 配置文件 → 环境变量
    ///
    /// # 参数
    /// - config_path: 显式指定的配置文件（必须存在）; None 时尝试
    ///   MITRA_TRACKER_CONFIG 与用户配置目录下的 config.json（可不存在）
    pub fn load(config_path: Option<&Path>) -> ConfigResult<AppConfig> {
        let mut config = match config_path {
            Some(path) => Self::read_file(path)?,
            None => match Self::discover_config_file() {
                Some(path) => Self::read_file(&path)?,
                None => AppConfig::default(),
            },
        };

        Self::apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// 读取 JSON 配置文件（缺省字段取默认值）
    pub fn read_file(path: &Path) -> ConfigResult<AppConfig> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: AppConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("已加载配置文件: {}", path.display());
        Ok(config)
    }

    /// 应用环境变量覆写
    ///
    /// # 参数
    /// - lookup: 键 → 值（测试时可注入）
    pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_empty(env_keys::DATA_FILE) {
            config.data_file = PathBuf::from(path.trim());
        }
        if let Some(backend) = non_empty(env_keys::BACKEND) {
            config.backend = backend.parse()?;
        }
        if let Some(locale) = non_empty(env_keys::LOCALE) {
            config.locale = locale.trim().to_string();
        }
        if let Some(flag) = non_empty(env_keys::LOG_JSON) {
            config.log_json = match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: env_keys::LOG_JSON.to_string(),
                        value: flag,
                    })
                }
            };
        }

        Ok(())
    }

    fn discover_config_file() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(env_keys::CONFIG) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        let candidate = dirs::config_dir()?.join(APP_DIR_NAME).join("config.json");
        candidate.exists().then_some(candidate)
    }
}

/// 获取默认数据文件路径
///
/// # 返回
/// - 用户数据目录/mitra-tracker/data_produksi_harian.csv
/// - 取不到用户数据目录时: ./data_produksi_harian.csv
pub fn default_data_path() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => data_dir.join(APP_DIR_NAME).join(DEFAULT_DATA_FILE_NAME),
        None => PathBuf::from(".").join(DEFAULT_DATA_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backend, StorageBackend::Csv);
        assert_eq!(config.locale, "en");
        assert!(config.data_file.ends_with(DEFAULT_DATA_FILE_NAME));
    }

    #[test]
    fn test_read_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "backend": "sqlite", "locale": "id" }}"#).unwrap();

        let config = ConfigManager::read_file(file.path()).unwrap();
        assert_eq!(config.backend, StorageBackend::Sqlite);
        assert_eq!(config.locale, "id");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_read_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            ConfigManager::read_file(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (env_keys::DATA_FILE, "/tmp/produksi.csv"),
            (env_keys::BACKEND, "SQLite"),
            (env_keys::LOCALE, " id "),
            (env_keys::LOG_JSON, "true"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        ConfigManager::apply_overrides(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/produksi.csv"));
        assert_eq!(config.backend, StorageBackend::Sqlite);
        assert_eq!(config.locale, "id");
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_backend_override() {
        let mut config = AppConfig::default();
        let result = ConfigManager::apply_overrides(&mut config, |k| {
            (k == env_keys::BACKEND).then(|| "postgres".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
