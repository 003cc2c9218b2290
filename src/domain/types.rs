// ==========================================
// 合作伙伴日产量跟踪 - 领域类型定义
// ==========================================
// 状态档位、月度达成档位
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 合作伙伴状态档位 (Partner Tier)
// ==========================================
// 红线: 档位制, 阈值不可配置
// 序列化格式: 与展示标签一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartnerTier {
    #[serde(rename = "Good")]
    Good, // 达到目标
    #[serde(rename = "Fair")]
    Fair, // 达到目标的 75% 以上
    #[serde(rename = "Poor")]
    Poor, // 低于 75%
    #[serde(rename = "No Target Available")]
    NoTarget, // 目标为 0, 无法评估
}

impl PartnerTier {
    /// 全部档位（展示顺序）
    pub const ALL: [PartnerTier; 4] = [
        PartnerTier::Good,
        PartnerTier::Fair,
        PartnerTier::Poor,
        PartnerTier::NoTarget,
    ];

    /// i18n 键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            PartnerTier::Good => "status.good",
            PartnerTier::Fair => "status.fair",
            PartnerTier::Poor => "status.poor",
            PartnerTier::NoTarget => "status.no_target",
        }
    }

    /// 当前语言下的标签
    pub fn localized_label(&self) -> String {
        crate::i18n::t(self.i18n_key())
    }
}

impl fmt::Display for PartnerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartnerTier::Good => write!(f, "Good"),
            PartnerTier::Fair => write!(f, "Fair"),
            PartnerTier::Poor => write!(f, "Poor"),
            PartnerTier::NoTarget => write!(f, "No Target Available"),
        }
    }
}

// ==========================================
// 月度达成档位 (Monthly Band)
// ==========================================
// 仅用于提示信息, 无副作用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonthlyBand {
    TargetMet,         // >= 100%
    ApproachingTarget, // >= 75%
    NeedsMoreEffort,   // < 75%
}

impl MonthlyBand {
    pub fn i18n_key(&self) -> &'static str {
        match self {
            MonthlyBand::TargetMet => "monthly.target_met",
            MonthlyBand::ApproachingTarget => "monthly.approaching_target",
            MonthlyBand::NeedsMoreEffort => "monthly.needs_more_effort",
        }
    }

    pub fn localized_message(&self) -> String {
        crate::i18n::t(self.i18n_key())
    }
}

impl fmt::Display for MonthlyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthlyBand::TargetMet => write!(f, "target met"),
            MonthlyBand::ApproachingTarget => write!(f, "approaching target"),
            MonthlyBand::NeedsMoreEffort => write!(f, "needs more effort"),
        }
    }
}
