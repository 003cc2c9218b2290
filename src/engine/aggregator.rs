// ==========================================
// 合作伙伴日产量跟踪 - 产量汇总引擎
// ==========================================
// 职责: 驾驶舱指标生成
// 输入: 全量产量记录
// 输出: 每日汇总 / 月度达成 / 合作伙伴汇总与档位分布
// ==========================================
// 说明: 纯函数, 不缓存; 每次调用全量重算
// ==========================================

use crate::domain::partner::{PartnerProduction, PartnerRollup, PartnerStatus, TierCount};
use crate::domain::production::ProductionRecord;
use crate::domain::summary::{DailyTotal, MonthlyProgress};
use crate::domain::targets::{
    kg_to_tons, APPROACHING_PERCENT, DAILY_TARGET_TONS, MONTHLY_TARGET_TONS, TARGET_MET_PERCENT,
};
use crate::domain::types::{MonthlyBand, PartnerTier};
use crate::engine::status::StatusClassifier;
use crate::engine::target::TargetCalculator;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

// ==========================================
// ProductionAggregator - 产量汇总引擎
// ==========================================
pub struct ProductionAggregator {
    target_calculator: TargetCalculator,
    classifier: StatusClassifier,
}

impl ProductionAggregator {
    pub fn new() -> Self {
        Self {
            target_calculator: TargetCalculator::new(),
            classifier: StatusClassifier::new(),
        }
    }

    // ==========================================
    // 全网指标
    // ==========================================

    /// 按日期汇总产量（日期升序）
    pub fn daily_totals(&self, records: &[ProductionRecord]) -> Vec<DailyTotal> {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            *by_date.entry(record.date).or_insert(0.0) += record.production_amount;
        }

        by_date
            .into_iter()
            .map(|(date, production_kg)| {
                let production_tons = kg_to_tons(production_kg);
                DailyTotal {
                    date,
                    production_kg,
                    production_tons,
                    daily_target_tons: DAILY_TARGET_TONS,
                    target_met: production_tons >= DAILY_TARGET_TONS,
                }
            })
            .collect()
    }

    /// 累计产量与月度目标达成率
    pub fn monthly_progress(&self, records: &[ProductionRecord]) -> MonthlyProgress {
        let total_production_kg: f64 = records.iter().map(|r| r.production_amount).sum();
        let total_production_tons = kg_to_tons(total_production_kg);
        let percentage = (total_production_tons / MONTHLY_TARGET_TONS) * 100.0;

        MonthlyProgress {
            total_production_kg,
            total_production_tons,
            monthly_target_tons: MONTHLY_TARGET_TONS,
            percentage,
            band: self.monthly_band(percentage),
        }
    }

    /// 月度达成档位（下沿包含）
    pub fn monthly_band(&self, percentage: f64) -> MonthlyBand {
        if percentage >= TARGET_MET_PERCENT {
            MonthlyBand::TargetMet
        } else if percentage >= APPROACHING_PERCENT {
            MonthlyBand::ApproachingTarget
        } else {
            MonthlyBand::NeedsMoreEffort
        }
    }

    // ==========================================
    // 合作伙伴指标
    // ==========================================

    /// 每个合作伙伴的累计产量（按名称排序）
    pub fn partner_totals(&self, records: &[ProductionRecord]) -> Vec<PartnerProduction> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for record in records {
            *totals.entry(record.partner_name.as_str()).or_insert(0.0) += record.production_amount;
        }

        totals
            .into_iter()
            .map(|(name, total)| PartnerProduction {
                partner_name: name.to_string(),
                total_production: total,
            })
            .collect()
    }

    /// 单个合作伙伴的状态（无记录时返回 None）
    pub fn partner_status(
        &self,
        records: &[ProductionRecord],
        partner_name: &str,
    ) -> Option<PartnerStatus> {
        let own: Vec<&ProductionRecord> = records
            .iter()
            .filter(|r| r.partner_name == partner_name)
            .collect();

        if own.is_empty() {
            return None;
        }

        Some(self.build_status(partner_name, &own))
    }

    /// 全部合作伙伴汇总 + 档位分布
    pub fn partner_rollup(&self, records: &[ProductionRecord]) -> PartnerRollup {
        let mut grouped: BTreeMap<&str, Vec<&ProductionRecord>> = BTreeMap::new();
        for record in records {
            grouped
                .entry(record.partner_name.as_str())
                .or_default()
                .push(record);
        }

        let partners: Vec<PartnerStatus> = grouped
            .iter()
            .map(|(name, own)| self.build_status(name, own))
            .collect();

        let status_counts = self.status_distribution(&partners);

        PartnerRollup {
            partners,
            status_counts,
        }
    }

    /// 档位分布: 只含出现过的档位, 数量降序, 同数量按档位顺序
    pub fn status_distribution(&self, partners: &[PartnerStatus]) -> Vec<TierCount> {
        let mut counts: HashMap<PartnerTier, usize> = HashMap::new();
        for partner in partners {
            *counts.entry(partner.status).or_insert(0) += 1;
        }

        let mut distribution: Vec<TierCount> = PartnerTier::ALL
            .iter()
            .filter_map(|tier| {
                counts.get(tier).map(|&partner_count| TierCount {
                    status: *tier,
                    partner_count,
                })
            })
            .collect();

        // 稳定排序, 保留档位顺序
        distribution.sort_by(|a, b| b.partner_count.cmp(&a.partner_count));
        distribution
    }

    fn build_status(&self, partner_name: &str, records: &[&ProductionRecord]) -> PartnerStatus {
        let activity = self
            .target_calculator
            .summarize(records.iter().copied());
        let target = self
            .target_calculator
            .target_from(activity.average_operations, activity.distinct_days);

        PartnerStatus {
            partner_name: partner_name.to_string(),
            total_production: activity.total_production,
            average_operations: activity.average_operations,
            distinct_days: activity.distinct_days,
            target,
            status: self.classifier.classify(activity.total_production, target),
        }
    }
}

impl Default for ProductionAggregator {
    fn default() -> Self {
        Self::new()
    }
}
