// ==========================================
// 合作伙伴日产量跟踪 - 固定目标常量
// ==========================================
// 目标值固定，不走配置（改动需发版）
// ==========================================

/// 每个作业单位每天的标准产量（kg）
pub const PER_OPERATION_DAILY_RATE_KG: f64 = 40.0;

/// 全网每日目标产量（吨）
pub const DAILY_TARGET_TONS: f64 = 84.0;

/// 全网月度目标产量（吨）
pub const MONTHLY_TARGET_TONS: f64 = 2500.0;

/// 1 吨 = 1000 kg
pub const KG_PER_TON: f64 = 1000.0;

/// "Fair" 档下限：达到目标的 75%
pub const FAIR_RATIO: f64 = 0.75;

/// 月度达成 "接近目标" 档下限（百分比）
pub const APPROACHING_PERCENT: f64 = 75.0;

/// 月度达成 "已达成" 档下限（百分比）
pub const TARGET_MET_PERCENT: f64 = 100.0;

/// kg → 吨
pub fn kg_to_tons(kg: f64) -> f64 {
    kg / KG_PER_TON
}
