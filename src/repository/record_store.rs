// ==========================================
// 合作伙伴日产量跟踪 - 记录仓储接口
// ==========================================
// 职责: 定义产量记录的读写边界（不包含实现）
// 红线: 只追加; 每次变更 = 全量读取 + 追加 + 全量回写
// ==========================================

use crate::domain::production::ProductionRecord;
use crate::repository::error::RepositoryResult;

// ==========================================
// RecordStore Trait
// ==========================================
// 实现者: CsvRecordStore, SqliteRecordStore
pub trait RecordStore: Send + Sync {
    /// 读取全部记录（按写入顺序）
    ///
    /// # 返回
    /// - Ok(Vec<ProductionRecord>): 数据文件不存在时返回空集合
    /// - Err: 文件损坏/读取失败
    fn load_all(&self) -> RepositoryResult<Vec<ProductionRecord>>;

    /// 追加记录（读-改-写, 在实现内部构成一个事务边界）
    ///
    /// # 返回
    /// - Ok(usize): 追加后的记录总数
    fn append(&self, records: &[ProductionRecord]) -> RepositoryResult<usize>;

    /// 存储位置描述（日志用）
    fn describe(&self) -> String;
}
