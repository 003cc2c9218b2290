// ==========================================
// 合作伙伴日产量跟踪 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换导入/仓储错误为用户可读的消息
// 说明: 面向用户的消息走 i18n
// ==========================================

use crate::domain::import::RowError;
use crate::i18n::{t, t_with_args};
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入校验错误
    // ==========================================
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    // ==========================================
    // 导入错误（整批未写入）
    // ==========================================
    #[error("{message}")]
    MissingColumns {
        message: String,
        missing: Vec<String>,
        expected: Vec<String>,
    },

    #[error("{message}")]
    ImportRejected {
        message: String,
        errors: Vec<RowError>,
    },

    #[error("{0}")]
    ImportError(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("storage error: {0}")]
    StorageError(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 错误代码（供 JSON 输出）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::MissingColumns { .. } => "MISSING_COLUMNS",
            ApiError::ImportRejected { .. } => "IMPORT_REJECTED",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::StorageError(_) => "STORAGE_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    /// 详细信息（可选）
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::MissingColumns {
                missing, expected, ..
            } => Some(serde_json::json!({ "missing": missing, "expected": expected })),
            ApiError::ImportRejected { errors, .. } => {
                Some(serde_json::json!({ "row_errors": errors }))
            }
            _ => None,
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DatabaseConnectionError(msg)
            | RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::Other(e) => ApiError::Other(e),
            other => ApiError::StorageError(other.to_string()),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::MissingColumns { missing, expected } => ApiError::MissingColumns {
                message: t_with_args(
                    "import.missing_columns",
                    &[("columns", expected.join(", ").as_str())],
                ),
                missing,
                expected,
            },
            ImportError::RowValidation { errors } => ApiError::ImportRejected {
                message: t_with_args(
                    "import.row_errors",
                    &[("count", errors.len().to_string().as_str())],
                ),
                errors,
            },
            ImportError::FileNotFound(path) => {
                ApiError::ImportError(t_with_args("import.file_not_found", &[("path", path.as_str())]))
            }
            ImportError::Storage(e) => ApiError::from(e),
            other => ApiError::ImportError(t_with_args(
                "import.failed",
                &[("error", other.to_string().as_str())],
            )),
        }
    }
}

/// 人工录入校验失败
pub(crate) fn partner_and_location_required() -> ApiError {
    ApiError::ValidationError(t("validation.partner_and_location_required"))
}

/// API Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_validation_keeps_errors() {
        let err = ApiError::from(ImportError::RowValidation {
            errors: vec![RowError {
                row_number: 3,
                column: "Tanggal".to_string(),
                value: "x".to_string(),
                message: "bad".to_string(),
            }],
        });

        assert_eq!(err.code(), "IMPORT_REJECTED");
        let details = err.details().unwrap();
        assert_eq!(details["row_errors"][0]["row_number"], 3);
    }

    #[test]
    fn test_storage_error_from_import() {
        let err = ApiError::from(ImportError::Storage(RepositoryError::DatabaseQueryError(
            "locked".to_string(),
        )));
        assert!(matches!(err, ApiError::DatabaseError(msg) if msg == "locked"));
    }

    #[test]
    fn test_missing_columns_code() {
        let err = ApiError::from(ImportError::MissingColumns {
            missing: vec!["Lokasi".to_string()],
            expected: vec!["Tanggal".to_string(), "Lokasi".to_string()],
        });
        assert_eq!(err.code(), "MISSING_COLUMNS");
        assert!(err.to_string().contains("Tanggal, Lokasi"));
    }
}
