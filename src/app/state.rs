// ==========================================
// 合作伙伴日产量跟踪 - 应用状态
// ==========================================
// 职责: 按配置创建仓储, 装配 API 实例
// 说明: 仓储句柄显式传递, 不使用全局状态
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::{DashboardApi, ProductionApi};
use crate::config::{AppConfig, StorageBackend};
use crate::repository::{CsvRecordStore, RecordStore, RepositoryError, SqliteRecordStore};

/// 应用状态
pub struct AppState {
    pub config: AppConfig,

    /// 记录仓储
    pub store: Arc<dyn RecordStore>,

    /// 产量录入API
    pub production_api: Arc<ProductionApi>,

    /// 驾驶舱API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(RepositoryError): 仓储初始化失败（SQLite 打开失败等）
    pub fn new(config: AppConfig) -> Result<Self, RepositoryError> {
        let store = open_store(config.backend, &config.data_file)?;
        tracing::info!("使用数据存储: {}", store.describe());

        Ok(Self::with_store(config, store))
    }

    /// 使用已有仓储装配（测试/嵌入场景）
    pub fn with_store(config: AppConfig, store: Arc<dyn RecordStore>) -> Self {
        let production_api = Arc::new(ProductionApi::new(store.clone()));
        let dashboard_api = Arc::new(DashboardApi::new(store.clone()));

        Self {
            config,
            store,
            production_api,
            dashboard_api,
        }
    }
}

/// 按后端类型打开仓储
pub fn open_store(
    backend: StorageBackend,
    data_file: &Path,
) -> Result<Arc<dyn RecordStore>, RepositoryError> {
    match backend {
        StorageBackend::Csv => Ok(Arc::new(CsvRecordStore::new(data_file))),
        StorageBackend::Sqlite => {
            let db_path = sqlite_path_for(data_file);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        RepositoryError::DatabaseConnectionError(format!(
                            "cannot create {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
            let store = SqliteRecordStore::new(&db_path.to_string_lossy())?;
            Ok(Arc::new(store))
        }
    }
}

/// SQLite 后端的数据库文件路径（.csv 扩展名替换为 .db）
pub fn sqlite_path_for(data_file: &Path) -> PathBuf {
    let is_csv = data_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        data_file.with_extension("db")
    } else {
        data_file.to_path_buf()
    }
}
