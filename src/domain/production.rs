// ==========================================
// 合作伙伴日产量跟踪 - 产量记录领域模型
// ==========================================
// 用途: 录入/导入层写入, 统计层只读
// 红线: 只追加, 不提供修改/删除
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// 持久化/导入列名（表格文件表头）
// ==========================================
pub mod columns {
    pub const DATE: &str = "Tanggal";
    pub const PARTNER_NAME: &str = "Nama Mitra";
    pub const LOCATION: &str = "Lokasi";
    pub const ORDER_COUNT: &str = "Jumlah SPK";
    pub const OPERATION_COUNT: &str = "Jumlah Operasi";
    pub const PRODUCTION_AMOUNT: &str = "Jumlah Produksi";

    /// 全部必需列（表头顺序）
    pub const REQUIRED: [&str; 6] = [
        DATE,
        PARTNER_NAME,
        LOCATION,
        ORDER_COUNT,
        OPERATION_COUNT,
        PRODUCTION_AMOUNT,
    ];
}

// ==========================================
// ProductionRecord - 单条日产量记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub date: NaiveDate,         // 日期（无时间部分）
    pub partner_name: String,    // 合作伙伴名称
    pub location: String,        // 地点
    pub order_count: u32,        // SPK 数量（不参与目标计算）
    pub operation_count: u32,    // 作业数量
    pub production_amount: f64,  // 产量（kg）
}

impl ProductionRecord {
    pub fn new(
        date: NaiveDate,
        partner_name: impl Into<String>,
        location: impl Into<String>,
        order_count: u32,
        operation_count: u32,
        production_amount: f64,
    ) -> Self {
        Self {
            date,
            partner_name: partner_name.into(),
            location: location.into(),
            order_count,
            operation_count,
            production_amount,
        }
    }

    /// 产量（吨）
    pub fn production_tons(&self) -> f64 {
        crate::domain::targets::kg_to_tons(self.production_amount)
    }
}

// ==========================================
// ProductionEntry - 人工录入表单（未校验）
// ==========================================
// 说明: 计数字段为无符号类型; 文本与产量在 API 层校验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionEntry {
    pub date: NaiveDate,
    pub partner_name: String,
    pub location: String,
    pub order_count: u32,
    pub operation_count: u32,
    pub production_amount: f64,
}

impl ProductionEntry {
    /// 文本字段去首尾空白后转为记录
    pub fn into_record(self) -> ProductionRecord {
        ProductionRecord {
            date: self.date,
            partner_name: self.partner_name.trim().to_string(),
            location: self.location.trim().to_string(),
            order_count: self.order_count,
            operation_count: self.operation_count,
            production_amount: self.production_amount,
        }
    }
}

// ==========================================
// 日期解析（持久化文件与导入文件共用）
// ==========================================

/// 支持的纯日期格式
///
/// 斜杠日期先按月在前解析（01/03/2025 = 1 月 3 日）, 失败再按日在前
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%Y%m%d"];

/// 支持的日期时间格式（时间部分丢弃）
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// 解析日期文本
///
/// # 返回
/// - Some(NaiveDate): 解析成功
/// - None: 无法识别的格式
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// 解析计数文本（非负整数）
///
/// 电子表格与旧版数据文件常把整数存成 "3.0", 整值小数也接受
pub fn parse_count(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(n) = value.parse::<u32>() {
        return Some(n);
    }

    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
            Some(f as u32)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_date_iso() {
        assert_eq!(
            parse_record_date("2025-03-01"),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn test_parse_record_date_drops_time() {
        assert_eq!(
            parse_record_date("2025-03-01 00:00:00"),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn test_parse_record_date_slash_month_first() {
        assert_eq!(
            parse_record_date("01/03/2025"),
            NaiveDate::from_ymd_opt(2025, 1, 3)
        );
        // 月份不合法时按日在前
        assert_eq!(
            parse_record_date("15/03/2025"),
            NaiveDate::from_ymd_opt(2025, 3, 15)
        );
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12"), Some(12));
        assert_eq!(parse_count(" 10.0 "), Some(10));
        assert_eq!(parse_count("2.5"), None);
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn test_parse_record_date_invalid() {
        assert_eq!(parse_record_date("kemarin"), None);
        assert_eq!(parse_record_date("   "), None);
    }

    #[test]
    fn test_entry_into_record_trims_text() {
        let entry = ProductionEntry {
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            partner_name: "  Mitra Jaya ".to_string(),
            location: " Bogor".to_string(),
            order_count: 2,
            operation_count: 5,
            production_amount: 120.5,
        };

        let record = entry.into_record();
        assert_eq!(record.partner_name, "Mitra Jaya");
        assert_eq!(record.location, "Bogor");
    }
}
