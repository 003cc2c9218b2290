// ==========================================
// 合作伙伴日产量跟踪 - 导入接口
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 阶段: 文件解析 → 列校验 → 单元格解析 → 整批落库
// ==========================================

use crate::domain::import::RowError;
use crate::domain::production::ProductionRecord;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始数据行（列名 → 文本值）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub row_number: usize, // 文件中的行号（表头为第 1 行）
    pub values: HashMap<String, String>,
}

impl RawRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(|v| v.as_str())
    }
}

/// 解析后的原始表格
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// 缺失的列（按传入顺序）
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|col| !self.headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect()
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 原始行（完全空白的行跳过）
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 实现者: ProductionFieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行解析为强类型记录
    ///
    /// # 返回
    /// - Ok(ProductionRecord): 全部单元格合法
    /// - Err(Vec<RowError>): 该行所有不合法单元格
    fn map_row(&self, row: &RawRow) -> Result<ProductionRecord, Vec<RowError>>;
}
