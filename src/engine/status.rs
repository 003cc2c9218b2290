// ==========================================
// 合作伙伴日产量跟踪 - 状态档位判定
// ==========================================
// 规则（下沿包含）:
// - target == 0          → NoTarget（避免除零）
// - total >= target      → Good
// - total >= 0.75×target → Fair
// - 其余                 → Poor
// ==========================================

use crate::domain::targets::FAIR_RATIO;
use crate::domain::types::PartnerTier;

pub struct StatusClassifier {}

impl StatusClassifier {
    pub fn new() -> Self {
        Self {}
    }

    /// 判定档位
    ///
    /// # 参数
    /// - `total_production`: 累计产量（kg）
    /// - `target`: 动态目标（kg）
    pub fn classify(&self, total_production: f64, target: f64) -> PartnerTier {
        if target == 0.0 {
            return PartnerTier::NoTarget;
        }
        if total_production >= target {
            PartnerTier::Good
        } else if total_production >= target * FAIR_RATIO {
            PartnerTier::Fair
        } else {
            PartnerTier::Poor
        }
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new()
    }
}
