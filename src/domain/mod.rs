// ==========================================
// 合作伙伴日产量跟踪 - 领域模型层
// ==========================================
// 职责: 定义领域实体、派生视图、固定目标常量
// 红线: 不含数据访问逻辑,不含统计逻辑
// ==========================================

pub mod import;
pub mod partner;
pub mod production;
pub mod summary;
pub mod targets;
pub mod types;

// 重导出核心类型
pub use import::{ImportReport, RowError};
pub use partner::{PartnerProduction, PartnerRollup, PartnerStatus, TierCount};
pub use production::{columns, parse_count, parse_record_date, ProductionEntry, ProductionRecord};
pub use summary::{DailyTotal, MonthlyProgress};
pub use types::{MonthlyBand, PartnerTier};
