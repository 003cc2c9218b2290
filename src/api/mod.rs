// ==========================================
// 合作伙伴日产量跟踪 - API 层
// ==========================================
// 职责: 面向展示层/命令行的业务接口
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod production_api;

// 重导出
pub use dashboard_api::{DashboardApi, DashboardView};
pub use error::{ApiError, ApiResult};
pub use production_api::ProductionApi;
