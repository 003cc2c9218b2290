// ==========================================
// 合作伙伴日产量跟踪 - SQLite 记录仓储（可选后端）
// ==========================================
// 表: production_record（只插入, 不更新/删除）
// 事务边界: append 在单个 SQLite 事务内完成
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::production::{parse_record_date, ProductionRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::record_store::RecordStore;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

pub struct SqliteRecordStore {
    db_path: String,
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRecordStore {
    /// 打开（或创建）数据库并建表
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        ensure_schema(&conn)?;

        Ok(Self {
            db_path: db_path.to_string(),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 记录总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM production_record", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl RecordStore for SqliteRecordStore {
    fn load_all(&self) -> RepositoryResult<Vec<ProductionRecord>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT
                id, record_date, partner_name, location,
                order_count, operation_count, production_kg
            FROM production_record
            ORDER BY id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, u32>(4)?,
                    row.get::<_, u32>(5)?,
                    row.get::<_, f64>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(
                |(id, date, partner_name, location, order_count, operation_count, production_kg)|
                 -> RepositoryResult<ProductionRecord> {
                    let date =
                        parse_record_date(&date).ok_or_else(|| RepositoryError::CorruptRecord {
                            line: id as usize,
                            message: format!("invalid date: {}", date),
                        })?;
                    Ok(ProductionRecord {
                        date,
                        partner_name,
                        location,
                        order_count,
                        operation_count,
                        production_amount: production_kg,
                    })
                },
            )
            .collect()
    }

    fn append(&self, records: &[ProductionRecord]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO production_record (
                    record_date, partner_name, location,
                    order_count, operation_count, production_kg
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;

            for record in records {
                stmt.execute(params![
                    record.date.format("%Y-%m-%d").to_string(),
                    record.partner_name,
                    record.location,
                    record.order_count,
                    record.operation_count,
                    record.production_amount,
                ])?;
            }
        }

        let total: i64 =
            tx.query_row("SELECT COUNT(*) FROM production_record", [], |row| row.get(0))?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::info!(appended = records.len(), total, "记录已追加: {}", self.db_path);
        Ok(total as usize)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.db_path)
    }
}
