// ==========================================
// 合作伙伴日产量跟踪 - 驾驶舱 API
// ==========================================
// 职责: 为展示层提供全部统计视图
// 说明: 每次调用都从仓储全量读取并重算, 不缓存
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::production_api::sort_newest_first;
use crate::domain::partner::{PartnerProduction, PartnerRollup, PartnerStatus};
use crate::domain::production::ProductionRecord;
use crate::domain::summary::{DailyTotal, MonthlyProgress};
use crate::domain::targets::DAILY_TARGET_TONS;
use crate::engine::aggregator::ProductionAggregator;
use crate::repository::record_store::RecordStore;

// ==========================================
// DashboardView - 驾驶舱完整视图
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub is_empty: bool,
    pub records: Vec<ProductionRecord>,           // 日期倒序
    pub daily_totals: Vec<DailyTotal>,            // 日期升序（折线图）
    pub daily_target_tons: f64,                   // 折线图参考线
    pub monthly: MonthlyProgress,
    pub partner_totals: Vec<PartnerProduction>,   // 柱状图
    pub partner_rollup: PartnerRollup,            // 状态表 + 档位分布
}

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================
pub struct DashboardApi {
    store: Arc<dyn RecordStore>,
    aggregator: ProductionAggregator,
}

impl DashboardApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            aggregator: ProductionAggregator::new(),
        }
    }

    fn load(&self) -> ApiResult<Vec<ProductionRecord>> {
        Ok(self.store.load_all()?)
    }

    /// 每日全网产量（吨）
    pub fn daily_totals(&self) -> ApiResult<Vec<DailyTotal>> {
        let records = self.load()?;
        Ok(self.aggregator.daily_totals(&records))
    }

    /// 累计产量与月度达成
    pub fn monthly_progress(&self) -> ApiResult<MonthlyProgress> {
        let records = self.load()?;
        Ok(self.aggregator.monthly_progress(&records))
    }

    /// 合作伙伴状态表 + 档位分布
    pub fn partner_rollup(&self) -> ApiResult<PartnerRollup> {
        let records = self.load()?;
        Ok(self.aggregator.partner_rollup(&records))
    }

    /// 单个合作伙伴状态
    pub fn partner_status(&self, partner_name: &str) -> ApiResult<PartnerStatus> {
        let name = partner_name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("partner name must not be empty".to_string()));
        }

        let records = self.load()?;
        self.aggregator
            .partner_status(&records, name)
            .ok_or_else(|| ApiError::NotFound(format!("partner '{}' has no records", name)))
    }

    /// 每个合作伙伴的累计产量
    pub fn partner_totals(&self) -> ApiResult<Vec<PartnerProduction>> {
        let records = self.load()?;
        Ok(self.aggregator.partner_totals(&records))
    }

    /// 完整视图（单次读取）
    pub fn dashboard(&self) -> ApiResult<DashboardView> {
        let mut records = self.load()?;
        tracing::debug!(records = records.len(), "生成驾驶舱视图");

        let daily_totals = self.aggregator.daily_totals(&records);
        let monthly = self.aggregator.monthly_progress(&records);
        let partner_totals = self.aggregator.partner_totals(&records);
        let partner_rollup = self.aggregator.partner_rollup(&records);

        sort_newest_first(&mut records);

        Ok(DashboardView {
            is_empty: records.is_empty(),
            records,
            daily_totals,
            daily_target_tons: DAILY_TARGET_TONS,
            monthly,
            partner_totals,
            partner_rollup,
        })
    }
}
