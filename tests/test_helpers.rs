// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据文件、测试记录构造、导入文件生成
// ==========================================

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use mitra_tracker::app::AppState;
use mitra_tracker::config::{AppConfig, StorageBackend};
use mitra_tracker::domain::ProductionRecord;
use tempfile::TempDir;

/// 标准表头
pub const HEADER: &str =
    "Tanggal,Nama Mitra,Lokasi,Jumlah SPK,Jumlah Operasi,Jumlah Produksi";

/// 2025-05-dd
pub fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
}

/// 构造测试记录（地点固定为 Bogor, SPK 固定为 1）
pub fn record(partner: &str, day: u32, operations: u32, kg: f64) -> ProductionRecord {
    ProductionRecord::new(may(day), partner, "Bogor", 1, operations, kg)
}

/// 在临时目录创建 AppState
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - Arc<AppState>
pub fn create_test_state(backend: StorageBackend) -> (TempDir, Arc<AppState>) {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        data_file: dir.path().join("data_produksi_harian.csv"),
        backend,
        ..AppConfig::default()
    };
    let state = AppState::new(config).expect("初始化AppState失败");
    (dir, Arc::new(state))
}

/// 在目录中写入 CSV 导入文件
pub fn write_csv(dir: &TempDir, name: &str, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    path
}
