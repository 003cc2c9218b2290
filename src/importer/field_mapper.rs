// ==========================================
// 合作伙伴日产量跟踪 - 字段映射器实现
// ==========================================
// 职责: 原始行 → ProductionRecord（逐单元格解析 + 校验）
// 规则:
// - Tanggal: 可识别的日期格式
// - Nama Mitra / Lokasi: 原样保留（允许空值）
// - Jumlah SPK / Jumlah Operasi: 非负整数（允许 "3.0" 这类整值小数）
// - Jumlah Produksi: 非负有限实数（kg）
// ==========================================

use crate::domain::import::RowError;
use crate::domain::production::{columns, parse_count, parse_record_date, ProductionRecord};
use crate::importer::importer_trait::{FieldMapper, RawRow};
use chrono::NaiveDate;

pub struct ProductionFieldMapper;

impl FieldMapper for ProductionFieldMapper {
    fn map_row(&self, row: &RawRow) -> Result<ProductionRecord, Vec<RowError>> {
        let mut errors = Vec::new();

        let date = self.parse_date(row, columns::DATE, &mut errors);
        let partner_name = self.parse_text(row, columns::PARTNER_NAME);
        let location = self.parse_text(row, columns::LOCATION);
        let order_count = self.parse_count(row, columns::ORDER_COUNT, &mut errors);
        let operation_count = self.parse_count(row, columns::OPERATION_COUNT, &mut errors);
        let production_amount = self.parse_amount(row, columns::PRODUCTION_AMOUNT, &mut errors);

        match (date, order_count, operation_count, production_amount) {
            (Some(date), Some(order_count), Some(operation_count), Some(production_amount))
                if errors.is_empty() =>
            {
                Ok(ProductionRecord {
                    date,
                    partner_name,
                    location,
                    order_count,
                    operation_count,
                    production_amount,
                })
            }
            _ => Err(errors),
        }
    }
}

impl ProductionFieldMapper {
    fn cell<'a>(&self, row: &'a RawRow, column: &str) -> &'a str {
        row.get(column).map(str::trim).unwrap_or("")
    }

    fn error(&self, row: &RawRow, column: &str, value: &str, message: &str) -> RowError {
        RowError {
            row_number: row.row_number,
            column: column.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }

    fn parse_date(
        &self,
        row: &RawRow,
        column: &str,
        errors: &mut Vec<RowError>,
    ) -> Option<NaiveDate> {
        let value = self.cell(row, column);
        let parsed = parse_record_date(value);
        if parsed.is_none() {
            errors.push(self.error(row, column, value, "expected a date such as YYYY-MM-DD"));
        }
        parsed
    }

    /// 文本列: 批量导入允许空值（非空只约束人工录入）
    fn parse_text(&self, row: &RawRow, column: &str) -> String {
        self.cell(row, column).to_string()
    }

    fn parse_count(&self, row: &RawRow, column: &str, errors: &mut Vec<RowError>) -> Option<u32> {
        let value = self.cell(row, column);
        let parsed = parse_count(value);
        if parsed.is_none() {
            errors.push(self.error(row, column, value, "expected a non-negative integer"));
        }
        parsed
    }

    fn parse_amount(&self, row: &RawRow, column: &str, errors: &mut Vec<RowError>) -> Option<f64> {
        let value = self.cell(row, column);
        match value.parse::<f64>() {
            Ok(f) if f.is_finite() && f >= 0.0 => Some(f),
            _ => {
                errors.push(self.error(row, column, value, "expected a non-negative number"));
                None
            }
        }
    }
}
