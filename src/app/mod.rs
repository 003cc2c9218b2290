// ==========================================
// 合作伙伴日产量跟踪 - 应用层
// ==========================================
// 职责: 配置 → 仓储 → API 装配
// ==========================================

pub mod state;

// 重导出
pub use state::{open_store, sqlite_path_for, AppState};
