// ==========================================
// 合作伙伴日产量跟踪 - CSV 记录仓储
// ==========================================
// 存储: 单个 CSV 文件, 每行一条记录
// 表头: Tanggal,Nama Mitra,Lokasi,Jumlah SPK,Jumlah Operasi,Jumlah Produksi
// ==========================================
// 事务边界:
// - 进程内: write_lock 串行化 读-改-写
// - 落盘: 先写同目录临时文件, 再 rename 覆盖
// - 跨进程并发写仍为"后写覆盖"
// ==========================================

use crate::domain::production::{columns, parse_count, parse_record_date, ProductionRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::record_store::RecordStore;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 文件中的一行（列名与旧版数据文件保持一致）
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Tanggal")]
    date: String,
    #[serde(rename = "Nama Mitra")]
    partner_name: String,
    #[serde(rename = "Lokasi")]
    location: String,
    // 计数列按文本读取: 旧文件可能写成 "10.0"
    #[serde(rename = "Jumlah SPK")]
    order_count: String,
    #[serde(rename = "Jumlah Operasi")]
    operation_count: String,
    #[serde(rename = "Jumlah Produksi")]
    production_amount: f64,
}

impl CsvRow {
    fn from_record(record: &ProductionRecord) -> Self {
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            partner_name: record.partner_name.clone(),
            location: record.location.clone(),
            order_count: record.order_count.to_string(),
            operation_count: record.operation_count.to_string(),
            production_amount: record.production_amount,
        }
    }

    fn into_record(self, line: usize) -> RepositoryResult<ProductionRecord> {
        let date = parse_record_date(&self.date).ok_or_else(|| RepositoryError::CorruptRecord {
            line,
            message: format!("invalid date: {}", self.date),
        })?;

        let count = |column: &str, value: &str| {
            parse_count(value).ok_or_else(|| RepositoryError::CorruptRecord {
                line,
                message: format!("invalid {}: {}", column, value),
            })
        };
        let order_count = count(columns::ORDER_COUNT, &self.order_count)?;
        let operation_count = count(columns::OPERATION_COUNT, &self.operation_count)?;

        Ok(ProductionRecord {
            date,
            partner_name: self.partner_name,
            location: self.location,
            order_count,
            operation_count,
            production_amount: self.production_amount,
        })
    }
}

// ==========================================
// CsvRecordStore
// ==========================================
pub struct CsvRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvRecordStore {
    /// 创建 CSV 仓储（文件可以不存在, 首次追加时创建）
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 全量回写（先写临时文件再 rename）
    pub fn save_all(&self, records: &[ProductionRecord]) -> RepositoryResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        self.write_file(records)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_error(&self, err: impl ToString) -> RepositoryError {
        RepositoryError::FileWriteError {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }

    fn read_file(&self) -> RepositoryResult<Vec<ProductionRecord>> {
        if !self.path.exists() {
            tracing::debug!("数据文件不存在, 返回空集合: {}", self.path.display());
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| RepositoryError::FileReadError {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(file);

        // 表头读取失败时 deserialize 不报错, 这里先显式读取并校验
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        let missing: Vec<&str> = columns::REQUIRED
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(RepositoryError::CorruptRecord {
                line: 1,
                message: format!("missing columns: {}", missing.join(", ")),
            });
        }

        let mut records = Vec::new();
        for (idx, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = result?;
            // 第 1 行为表头
            records.push(row.into_record(idx + 2)?);
        }

        Ok(records)
    }

    fn write_file(&self, records: &[ProductionRecord]) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }

        let tmp_path = self.temp_path();
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_path(&tmp_path)
                .map_err(|e| self.write_error(e))?;

            // 表头单独写, 保证空集合也有表头
            writer
                .write_record(columns::REQUIRED)
                .map_err(|e| self.write_error(e))?;
            for record in records {
                writer
                    .serialize(CsvRow::from_record(record))
                    .map_err(|e| self.write_error(e))?;
            }
            writer.flush().map_err(|e| self.write_error(e))?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| self.write_error(e))?;
        tracing::debug!(count = records.len(), "数据文件已回写: {}", self.path.display());
        Ok(())
    }
}

impl RecordStore for CsvRecordStore {
    fn load_all(&self) -> RepositoryResult<Vec<ProductionRecord>> {
        self.read_file()
    }

    fn append(&self, records: &[ProductionRecord]) -> RepositoryResult<usize> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let mut all = self.read_file()?;
        all.extend_from_slice(records);
        self.write_file(&all)?;

        tracing::info!(
            appended = records.len(),
            total = all.len(),
            "记录已追加: {}",
            self.path.display()
        );
        Ok(all.len())
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample(day: u32, partner: &str, kg: f64) -> ProductionRecord {
        ProductionRecord::new(
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            partner,
            "Depok",
            2,
            7,
            kg,
        )
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = CsvRecordStore::new(dir.path().join("data.csv"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_reload() {
        let dir = TempDir::new().unwrap();
        let store = CsvRecordStore::new(dir.path().join("nested").join("data.csv"));

        assert_eq!(store.append(&[sample(1, "A", 300.0)]).unwrap(), 1);
        assert_eq!(store.append(&[sample(2, "B", 12.345)]).unwrap(), 2);

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, vec![sample(1, "A", 300.0), sample(2, "B", 12.345)]);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_header_written_for_empty_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        let store = CsvRecordStore::new(&path);
        store.save_all(&[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.trim_end(),
            "Tanggal,Nama Mitra,Lokasi,Jumlah SPK,Jumlah Operasi,Jumlah Produksi"
        );
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_reads_legacy_datetime_dates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Tanggal,Nama Mitra,Lokasi,Jumlah SPK,Jumlah Operasi,Jumlah Produksi").unwrap();
        writeln!(file, "2025-03-01 00:00:00,Mitra A,Bogor,3,10,250.5").unwrap();

        let store = CsvRecordStore::new(&path);
        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(records[0].production_amount, 250.5);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Tanggal,Nama Mitra,Lokasi,Jumlah SPK,Jumlah Operasi,Jumlah Produksi").unwrap();
        writeln!(file, "2025-03-01,Mitra A,Bogor,tiga,10,250.5").unwrap();

        let store = CsvRecordStore::new(&path);
        assert!(matches!(
            store.load_all(),
            Err(RepositoryError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn test_reads_whole_float_counts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Tanggal,Nama Mitra,Lokasi,Jumlah SPK,Jumlah Operasi,Jumlah Produksi").unwrap();
        writeln!(file, "2025-03-01,Mitra A,Bogor,3.0,10.0,250.5").unwrap();

        let records = CsvRecordStore::new(&path).load_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].order_count, 3);
        assert_eq!(records[0].operation_count, 10);
    }

    #[test]
    fn test_fractional_count_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Tanggal,Nama Mitra,Lokasi,Jumlah SPK,Jumlah Operasi,Jumlah Produksi").unwrap();
        writeln!(file, "2025-03-01,Mitra A,Bogor,3,10.5,250.5").unwrap();

        match CsvRecordStore::new(&path).load_all() {
            Err(RepositoryError::CorruptRecord { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("Jumlah Operasi"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_header_columns_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "Tanggal,Nama Mitra\n2025-03-01,Mitra A\n").unwrap();

        let store = CsvRecordStore::new(&path);
        assert!(matches!(
            store.load_all(),
            Err(RepositoryError::CorruptRecord { line: 1, .. })
        ));

        // 读取失败时不回写, 原文件保留
        assert!(store.append(&[sample(1, "A", 1.0)]).is_err());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Tanggal,Nama Mitra\n2025-03-01,Mitra A\n"
        );
    }

    #[test]
    fn test_unreadable_header_is_error() {
        let dir = TempDir::new().unwrap();
        // 目录无法按文件读取
        let store = CsvRecordStore::new(dir.path());
        assert!(store.load_all().is_err());
    }

    #[test]
    fn test_empty_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        File::create(&path).unwrap();

        assert!(CsvRecordStore::new(&path).load_all().unwrap().is_empty());
    }
}
