// ==========================================
// 合作伙伴日产量跟踪 - 数据仓储层
// ==========================================
// 职责: 产量记录的持久化（CSV 文件 / 可选 SQLite）
// 红线: Repository 不含业务逻辑
// ==========================================

pub mod csv_store;
pub mod error;
pub mod record_store;
pub mod sqlite_store;

// 重导出
pub use csv_store::CsvRecordStore;
pub use error::{RepositoryError, RepositoryResult};
pub use record_store::RecordStore;
pub use sqlite_store::SqliteRecordStore;
