// ==========================================
// 合作伙伴日产量跟踪 - 动态目标计算
// ==========================================
// 公式: target = 40 kg × 平均作业数 × 不同日期数
// ==========================================
// 输入: 单个合作伙伴的全部记录
// 输出: 累计产量 / 平均作业数 / 日期数 / 目标
// ==========================================

use crate::domain::production::ProductionRecord;
use crate::domain::targets::PER_OPERATION_DAILY_RATE_KG;
use chrono::NaiveDate;
use std::collections::HashSet;

/// 单个合作伙伴的历史活动汇总
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartnerActivity {
    pub total_production: f64,
    pub average_operations: f64,
    pub distinct_days: usize,
}

// ==========================================
// TargetCalculator - 动态目标计算器
// ==========================================
pub struct TargetCalculator {
    // 无状态, 费率为固定常量
}

impl TargetCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 汇总一组记录（调用方保证同属一个合作伙伴）
    ///
    /// 说明: distinct_days 按日期去重, 同一天多条记录只算一天
    pub fn summarize<'a, I>(&self, records: I) -> PartnerActivity
    where
        I: IntoIterator<Item = &'a ProductionRecord>,
    {
        let mut total_production = 0.0;
        let mut operation_sum: u64 = 0;
        let mut row_count: usize = 0;
        let mut days: HashSet<NaiveDate> = HashSet::new();

        for record in records {
            total_production += record.production_amount;
            operation_sum += u64::from(record.operation_count);
            row_count += 1;
            days.insert(record.date);
        }

        if row_count == 0 {
            return PartnerActivity::default();
        }

        PartnerActivity {
            total_production,
            average_operations: operation_sum as f64 / row_count as f64,
            distinct_days: days.len(),
        }
    }

    /// 由平均作业数与日期数计算目标
    pub fn target_from(&self, average_operations: f64, distinct_days: usize) -> f64 {
        PER_OPERATION_DAILY_RATE_KG * average_operations * distinct_days as f64
    }

    /// 计算一组记录的目标（无记录时为 0）
    pub fn calculate<'a, I>(&self, records: I) -> f64
    where
        I: IntoIterator<Item = &'a ProductionRecord>,
    {
        let activity = self.summarize(records);
        self.target_from(activity.average_operations, activity.distinct_days)
    }

    /// 从全量记录中按名称筛选后计算目标
    ///
    /// # 返回
    /// 未知合作伙伴返回 0
    pub fn target_for_partner(&self, records: &[ProductionRecord], partner_name: &str) -> f64 {
        self.calculate(records.iter().filter(|r| r.partner_name == partner_name))
    }
}

impl Default for TargetCalculator {
    fn default() -> Self {
        Self::new()
    }
}
