// ==========================================
// 合作伙伴日产量跟踪 - 合作伙伴状态模型
// ==========================================
// 派生数据: 每次查看时全量重算, 不落库
// ==========================================

use crate::domain::types::PartnerTier;
use serde::{Deserialize, Serialize};

// ==========================================
// PartnerStatus - 单个合作伙伴的汇总与评级
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerStatus {
    pub partner_name: String,
    pub total_production: f64,   // 累计产量（kg）
    pub average_operations: f64, // 平均作业数
    pub distinct_days: usize,    // 有记录的不同日期数
    pub target: f64,             // 动态目标（kg）
    pub status: PartnerTier,
}

impl PartnerStatus {
    /// 达成率（%）, 目标为 0 时返回 None
    pub fn achievement_percent(&self) -> Option<f64> {
        if self.target == 0.0 {
            None
        } else {
            Some(self.total_production / self.target * 100.0)
        }
    }
}

/// 单个档位的合作伙伴数量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCount {
    pub status: PartnerTier,
    pub partner_count: usize,
}

/// 单个合作伙伴的累计产量（柱状图数据）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerProduction {
    pub partner_name: String,
    pub total_production: f64, // kg
}

// ==========================================
// PartnerRollup - 全部合作伙伴汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerRollup {
    pub partners: Vec<PartnerStatus>,    // 按名称排序
    pub status_counts: Vec<TierCount>,   // 仅包含出现过的档位, 按数量降序
}

impl PartnerRollup {
    /// 查询某个档位的合作伙伴数量
    pub fn count_for(&self, tier: PartnerTier) -> usize {
        self.status_counts
            .iter()
            .find(|c| c.status == tier)
            .map(|c| c.partner_count)
            .unwrap_or(0)
    }

    /// 按名称查找
    pub fn find(&self, partner_name: &str) -> Option<&PartnerStatus> {
        self.partners.iter().find(|p| p.partner_name == partner_name)
    }
}
