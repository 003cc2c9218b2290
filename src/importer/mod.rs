// ==========================================
// 合作伙伴日产量跟踪 - 导入层
// ==========================================
// 职责: 外部表格文件 → 强类型产量记录
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod production_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::ProductionFieldMapper;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use importer_trait::{FieldMapper, FileParser, RawRow, RawTable};
pub use production_importer::ProductionImporter;
