// ==========================================
// 合作伙伴日产量跟踪 - 产量批量导入器
// ==========================================
// 导入流程:
// 1. 文件读取与解析（CSV / Excel）
// 2. 必需列校验（按列名, 顺序不限）
// 3. 逐行逐单元格解析, 收集全部行错误
// 4. 全部合法才整批追加落库（不做部分导入）
// ==========================================

use crate::domain::import::{ImportReport, RowError};
use crate::domain::production::{columns, ProductionRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::ProductionFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FieldMapper, FileParser, RawTable};
use crate::repository::record_store::RecordStore;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub struct ProductionImporter {
    parser: Box<dyn FileParser>,
    mapper: Box<dyn FieldMapper>,
    store: Arc<dyn RecordStore>,
}

impl ProductionImporter {
    /// 使用默认解析器/映射器
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_components(
            Box::new(UniversalFileParser),
            Box::new(ProductionFieldMapper),
            store,
        )
    }

    pub fn with_components(
        parser: Box<dyn FileParser>,
        mapper: Box<dyn FieldMapper>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            parser,
            mapper,
            store,
        }
    }

    /// 导入文件并追加落库
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportReport> {
        let path = file_path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let table = self.parser.parse_to_raw_table(path)?;
        self.import_table(table, &file_name)
    }

    /// 只解析校验, 不落库（预览）
    pub fn validate_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<ProductionRecord>> {
        let table = self.parser.parse_to_raw_table(file_path.as_ref())?;
        self.validate_table(&table)
    }

    /// 导入已解析的表格
    pub fn import_table(&self, table: RawTable, source_name: &str) -> ImportResult<ImportReport> {
        let batch_id = Uuid::new_v4().to_string();
        tracing::info!(
            batch_id = %batch_id,
            rows = table.rows.len(),
            "开始导入: {}",
            source_name
        );

        let records = match self.validate_table(&table) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(batch_id = %batch_id, "导入被拒绝: {}", e);
                return Err(e);
            }
        };

        let total_records = self.store.append(&records)?;

        tracing::info!(
            batch_id = %batch_id,
            imported = records.len(),
            total = total_records,
            "导入完成: {}",
            source_name
        );

        Ok(ImportReport {
            batch_id,
            file_name: source_name.to_string(),
            rows_imported: records.len(),
            total_records,
            records,
        })
    }

    /// 列校验 + 逐行解析
    pub fn validate_table(&self, table: &RawTable) -> ImportResult<Vec<ProductionRecord>> {
        let missing = table.missing_columns(&columns::REQUIRED);
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns {
                missing,
                expected: columns::REQUIRED.iter().map(|c| c.to_string()).collect(),
            });
        }

        let mut records = Vec::with_capacity(table.rows.len());
        let mut errors: Vec<RowError> = Vec::new();

        for row in &table.rows {
            match self.mapper.map_row(row) {
                Ok(record) => records.push(record),
                Err(row_errors) => errors.extend(row_errors),
            }
        }

        if !errors.is_empty() {
            return Err(ImportError::RowValidation { errors });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::importer_trait::RawRow;
    use crate::repository::csv_store::CsvRecordStore;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn table(rows: Vec<Vec<(&str, &str)>>) -> RawTable {
        RawTable {
            headers: columns::REQUIRED.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(idx, pairs)| RawRow {
                    row_number: idx + 2,
                    values: pairs
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect::<HashMap<_, _>>(),
                })
                .collect(),
        }
    }

    fn row<'a>(date: &'a str, partner: &'a str, kg: &'a str) -> Vec<(&'a str, &'a str)> {
        vec![
            ("Tanggal", date),
            ("Nama Mitra", partner),
            ("Lokasi", "Bogor"),
            ("Jumlah SPK", "1"),
            ("Jumlah Operasi", "5"),
            ("Jumlah Produksi", kg),
        ]
    }

    fn importer(dir: &TempDir) -> (ProductionImporter, Arc<CsvRecordStore>) {
        let store = Arc::new(CsvRecordStore::new(dir.path().join("data.csv")));
        (ProductionImporter::new(store.clone()), store)
    }

    #[test]
    fn test_import_table_appends_all_rows() {
        let dir = TempDir::new().unwrap();
        let (importer, store) = importer(&dir);

        let report = importer
            .import_table(
                table(vec![row("2025-03-01", "A", "100"), row("2025-03-02", "B", "200")]),
                "upload.csv",
            )
            .unwrap();

        assert_eq!(report.rows_imported, 2);
        assert_eq!(report.total_records, 2);
        assert!(!report.batch_id.is_empty());
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_bad_row_rejects_whole_batch() {
        let dir = TempDir::new().unwrap();
        let (importer, store) = importer(&dir);

        let result = importer.import_table(
            table(vec![row("2025-03-01", "A", "100"), row("2025-03-02", "B", "x")]),
            "upload.csv",
        );

        match result {
            Err(ImportError::RowValidation { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].row_number, 3);
                assert_eq!(errors[0].column, "Jumlah Produksi");
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.rows_imported)),
        }
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_missing_column_rejected() {
        let dir = TempDir::new().unwrap();
        let (importer, store) = importer(&dir);

        let mut raw = table(vec![row("2025-03-01", "A", "100")]);
        raw.headers.retain(|h| h != "Lokasi");

        let result = importer.import_table(raw, "upload.csv");
        match result {
            Err(ImportError::MissingColumns { missing, expected }) => {
                assert_eq!(missing, vec!["Lokasi".to_string()]);
                assert_eq!(expected.len(), 6);
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.rows_imported)),
        }
        assert!(store.load_all().unwrap().is_empty());
    }
}
