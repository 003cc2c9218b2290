// ==========================================
// 合作伙伴日产量跟踪 - 批量导入领域模型
// ==========================================
// 用途: 导入层输出, API 层透传给调用方
// ==========================================

use crate::domain::production::ProductionRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// RowError - 单元格级校验错误
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row_number: usize, // 文件中的行号（表头为第 1 行）
    pub column: String,    // 列名
    pub value: String,     // 原始值
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, column '{}': {} (value: '{}')",
            self.row_number, self.column, self.message, self.value
        )
    }
}

// ==========================================
// ImportReport - 导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,                 // 导入批次号（UUID）
    pub file_name: String,
    pub rows_imported: usize,
    pub total_records: usize,             // 追加后的记录总数
    pub records: Vec<ProductionRecord>,   // 本次导入的记录（用于回显）
}
