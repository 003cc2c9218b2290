// ==========================================
// 合作伙伴日产量跟踪 - 全网汇总模型
// ==========================================

use crate::domain::types::MonthlyBand;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DailyTotal - 单日全网产量
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub production_kg: f64,
    pub production_tons: f64,
    pub daily_target_tons: f64, // 图表参考线
    pub target_met: bool,
}

// ==========================================
// MonthlyProgress - 累计产量与月度目标达成
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProgress {
    pub total_production_kg: f64,
    pub total_production_tons: f64,
    pub monthly_target_tons: f64,
    pub percentage: f64,
    pub band: MonthlyBand,
}
