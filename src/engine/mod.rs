// ==========================================
// 合作伙伴日产量跟踪 - 引擎层
// ==========================================
// 职责: 目标计算、档位判定、全网/合作伙伴汇总
// 红线: 引擎无状态、无 IO, 只接收记录切片
// ==========================================

pub mod aggregator;
pub mod status;
pub mod target;

// 重导出核心引擎
pub use aggregator::ProductionAggregator;
pub use status::StatusClassifier;
pub use target::{PartnerActivity, TargetCalculator};
