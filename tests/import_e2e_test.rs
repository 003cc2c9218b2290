// ==========================================
// 批量导入 端到端测试
// ==========================================
// 测试目标: CSV 文件 → 校验 → 追加 → 统计可见
// 说明: 任一行校验失败则整批不写入
// ==========================================

mod test_helpers;

use mitra_tracker::api::ApiError;
use mitra_tracker::config::StorageBackend;
use mitra_tracker::logging;
use test_helpers::{create_test_state, may, write_csv, HEADER};

#[test]
fn test_import_valid_csv_appends_all_rows() {
    logging::init_test();
    let (dir, state) = create_test_state(StorageBackend::Csv);
    state
        .production_api
        .submit_entry(mitra_tracker::ProductionEntry {
            date: may(1),
            partner_name: "Mitra A".to_string(),
            location: "Bogor".to_string(),
            order_count: 1,
            operation_count: 10,
            production_amount: 400.0,
        })
        .unwrap();

    let file = write_csv(
        &dir,
        "upload.csv",
        HEADER,
        &[
            "2025-05-02,Mitra A,Bogor,1,10,500",
            "2025/05/02,Mitra B,Depok,3,5,150.5",
        ],
    );

    let report = state
        .production_api
        .import_file(&file.to_string_lossy())
        .unwrap();

    assert_eq!(report.rows_imported, 2);
    assert_eq!(report.total_records, 3);
    assert_eq!(report.file_name, "upload.csv");
    assert!(!report.batch_id.is_empty());

    let records = state.production_api.list_records().unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().any(|r| r.partner_name == "Mitra B" && r.date == may(2)));

    let status = state.dashboard_api.partner_status("Mitra A").unwrap();
    assert_eq!(status.total_production, 900.0);
    assert_eq!(status.distinct_days, 2);
}

#[test]
fn test_import_missing_columns_is_rejected() {
    let (dir, state) = create_test_state(StorageBackend::Csv);

    let file = write_csv(
        &dir,
        "partial.csv",
        "Tanggal,Nama Mitra,Lokasi",
        &["2025-05-02,Mitra A,Bogor"],
    );

    let err = state
        .production_api
        .import_file(&file.to_string_lossy())
        .unwrap_err();

    match err {
        ApiError::MissingColumns { missing, .. } => {
            assert_eq!(
                missing,
                vec!["Jumlah SPK", "Jumlah Operasi", "Jumlah Produksi"]
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(state.production_api.list_records().unwrap().is_empty());
}

#[test]
fn test_import_with_bad_row_writes_nothing() {
    logging::init_test();
    let (dir, state) = create_test_state(StorageBackend::Csv);

    let file = write_csv(
        &dir,
        "bad.csv",
        HEADER,
        &[
            "2025-05-02,Mitra A,Bogor,1,10,500",
            "bukan-tanggal,Mitra B,Depok,1,abc,100",
        ],
    );

    let err = state
        .production_api
        .import_file(&file.to_string_lossy())
        .unwrap_err();

    match &err {
        ApiError::ImportRejected { errors, .. } => {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().all(|e| e.row_number == 3));
            assert!(errors.iter().any(|e| e.column == "Tanggal"));
            assert!(errors.iter().any(|e| e.column == "Jumlah Operasi"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.code(), "IMPORT_REJECTED");
    assert!(state.production_api.list_records().unwrap().is_empty());
}

#[test]
fn test_preview_import_does_not_write() {
    let (dir, state) = create_test_state(StorageBackend::Csv);

    let file = write_csv(&dir, "preview.csv", HEADER, &["2025-05-02,Mitra A,Bogor,1,10,500"]);

    let records = state
        .production_api
        .preview_import(&file.to_string_lossy())
        .unwrap();
    assert_eq!(records.len(), 1);
    assert!(state.production_api.list_records().unwrap().is_empty());
}

#[test]
fn test_import_missing_file() {
    let (dir, state) = create_test_state(StorageBackend::Csv);
    let path = dir.path().join("tidak_ada.csv");

    let err = state
        .production_api
        .import_file(&path.to_string_lossy())
        .unwrap_err();
    assert!(matches!(err, ApiError::ImportError(_)));
}

#[test]
fn test_import_keeps_rows_with_blank_location() {
    let (dir, state) = create_test_state(StorageBackend::Csv);

    let file = write_csv(
        &dir,
        "tanpa_lokasi.csv",
        HEADER,
        &["2025-05-02,Mitra A,,1,10,500", "2025-05-03,,Depok,1,10,300"],
    );

    let report = state
        .production_api
        .import_file(&file.to_string_lossy())
        .unwrap();
    assert_eq!(report.rows_imported, 2);

    // 回读后空文本保持为空
    let records = state.production_api.list_records().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().any(|r| r.partner_name == "Mitra A" && r.location.is_empty()));
    assert!(records.iter().any(|r| r.partner_name.is_empty() && r.location == "Depok"));
}

#[test]
fn test_import_excel_file() {
    let (_dir, state) = create_test_state(StorageBackend::Csv);
    let fixture = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("produksi_upload.xlsx");

    let report = state
        .production_api
        .import_file(&fixture.to_string_lossy())
        .unwrap();
    assert_eq!(report.rows_imported, 2);
    assert_eq!(report.file_name, "produksi_upload.xlsx");

    let status = state.dashboard_api.partner_status("Mitra A").unwrap();
    assert_eq!(status.total_production, 480.5);
    assert_eq!(status.average_operations, 12.0);
    assert_eq!(report.records[0].date, chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    assert_eq!(report.records[0].order_count, 3);
}
