// ==========================================
// 合作伙伴日产量跟踪 - 核心库
// ==========================================
// 功能: 日产量录入 / 批量导入 / 目标达成统计
// 存储: CSV 文件（默认）或 SQLite
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 目标计算与汇总
pub mod engine;

// 导入层 - 外部表格文件
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    DailyTotal, ImportReport, MonthlyBand, MonthlyProgress, PartnerRollup, PartnerStatus,
    PartnerTier, ProductionEntry, ProductionRecord, RowError,
};

// 引擎
pub use engine::{ProductionAggregator, StatusClassifier, TargetCalculator};

// API
pub use api::{ApiError, DashboardApi, DashboardView, ProductionApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Mitra Production Tracker";
