// ==========================================
// 合作伙伴日产量跟踪 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 任一错误都意味着整批未写入
// ==========================================

use crate::domain::import::RowError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (only .csv/.xlsx/.xls)")]
    UnsupportedFormat(String),

    #[error("failed to read file: {0}")]
    FileReadError(String),

    #[error("failed to parse Excel file: {0}")]
    ExcelParseError(String),

    #[error("failed to parse CSV file: {0}")]
    CsvParseError(String),

    // ===== 表结构错误 =====
    #[error(
        "missing required columns: {}; expected columns: {}",
        .missing.join(", "),
        .expected.join(", ")
    )]
    MissingColumns {
        missing: Vec<String>,
        expected: Vec<String>,
    },

    // ===== 单元格校验错误 =====
    #[error("{} invalid cell(s) in upload, nothing was imported", .errors.len())]
    RowValidation { errors: Vec<RowError> },

    // ===== 存储错误 =====
    #[error("failed to save imported records: {0}")]
    Storage(#[from] RepositoryError),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
