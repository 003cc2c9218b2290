// ==========================================
// 合作伙伴日产量跟踪 - 产量录入 API
// ==========================================
// 职责: 人工单条录入、批量文件导入、记录查询
// 红线: 只追加, 校验失败不写入任何记录
// ==========================================

use std::path::Path;
use std::sync::Arc;

use crate::api::error::{partner_and_location_required, ApiError, ApiResult};
use crate::domain::import::ImportReport;
use crate::domain::production::{ProductionEntry, ProductionRecord};
use crate::i18n::t;
use crate::importer::production_importer::ProductionImporter;
use crate::repository::record_store::RecordStore;

/// 按日期倒序（同日保持写入顺序）
pub(crate) fn sort_newest_first(records: &mut [ProductionRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

// ==========================================
// ProductionApi - 产量录入 API
// ==========================================
pub struct ProductionApi {
    store: Arc<dyn RecordStore>,
    importer: ProductionImporter,
}

impl ProductionApi {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let importer = ProductionImporter::new(store.clone());
        Self { store, importer }
    }

    /// 人工录入单条记录
    ///
    /// # 校验
    /// - 合作伙伴名称、地点去空白后非空
    /// - 产量为非负有限数
    ///
    /// # 返回
    /// - Ok(ProductionRecord): 已写入的记录
    /// - Err(ApiError::ValidationError): 未写入
    pub fn submit_entry(&self, entry: ProductionEntry) -> ApiResult<ProductionRecord> {
        if entry.partner_name.trim().is_empty() || entry.location.trim().is_empty() {
            tracing::warn!("人工录入被拒绝: 合作伙伴名称或地点为空");
            return Err(partner_and_location_required());
        }

        if !entry.production_amount.is_finite() || entry.production_amount < 0.0 {
            tracing::warn!(
                production_amount = entry.production_amount,
                "人工录入被拒绝: 产量非法"
            );
            return Err(ApiError::ValidationError(t(
                "validation.production_not_negative",
            )));
        }

        let record = entry.into_record();
        let total = self.store.append(std::slice::from_ref(&record))?;

        tracing::info!(
            partner = %record.partner_name,
            date = %record.date,
            total,
            "人工录入成功"
        );
        Ok(record)
    }

    /// 批量导入文件（.csv / .xlsx / .xls）
    pub fn import_file(&self, file_path: &str) -> ApiResult<ImportReport> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("file path must not be empty".to_string()));
        }

        let report = self.importer.import_file(Path::new(file_path.trim()))?;
        Ok(report)
    }

    /// 预览导入（只校验不写入）
    pub fn preview_import(&self, file_path: &str) -> ApiResult<Vec<ProductionRecord>> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("file path must not be empty".to_string()));
        }

        let records = self.importer.validate_file(Path::new(file_path.trim()))?;
        Ok(records)
    }

    /// 全部记录（日期倒序）
    pub fn list_records(&self) -> ApiResult<Vec<ProductionRecord>> {
        let mut records = self.store.load_all()?;
        sort_newest_first(&mut records);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::csv_store::CsvRecordStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn entry(partner: &str, location: &str, day: u32) -> ProductionEntry {
        ProductionEntry {
            date: NaiveDate::from_ymd_opt(2025, 5, day).unwrap(),
            partner_name: partner.to_string(),
            location: location.to_string(),
            order_count: 1,
            operation_count: 3,
            production_amount: 75.0,
        }
    }

    fn api(dir: &TempDir) -> ProductionApi {
        ProductionApi::new(Arc::new(CsvRecordStore::new(dir.path().join("data.csv"))))
    }

    #[test]
    fn test_submit_entry_rejects_blank_fields() {
        let dir = TempDir::new().unwrap();
        let api = api(&dir);

        assert!(matches!(
            api.submit_entry(entry("", "Bogor", 1)),
            Err(ApiError::ValidationError(_))
        ));
        assert!(matches!(
            api.submit_entry(entry("Mitra A", "   ", 1)),
            Err(ApiError::ValidationError(_))
        ));
        assert!(api.list_records().unwrap().is_empty());
    }

    #[test]
    fn test_submit_entry_rejects_negative_production() {
        let dir = TempDir::new().unwrap();
        let api = api(&dir);

        let mut bad = entry("Mitra A", "Bogor", 1);
        bad.production_amount = -1.0;
        assert!(matches!(api.submit_entry(bad), Err(ApiError::ValidationError(_))));
    }

    #[test]
    fn test_list_records_newest_first() {
        let dir = TempDir::new().unwrap();
        let api = api(&dir);

        api.submit_entry(entry("Mitra A", "Bogor", 1)).unwrap();
        api.submit_entry(entry("Mitra B", "Bogor", 3)).unwrap();
        api.submit_entry(entry("Mitra C", "Bogor", 2)).unwrap();

        let names: Vec<String> = api
            .list_records()
            .unwrap()
            .into_iter()
            .map(|r| r.partner_name)
            .collect();
        assert_eq!(names, vec!["Mitra B", "Mitra C", "Mitra A"]);
    }

    #[test]
    fn test_import_empty_path() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            api(&dir).import_file(" "),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
