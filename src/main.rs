// ==========================================
// 合作伙伴日产量跟踪 - 命令行入口
// ==========================================
// 子命令: add / import / records / daily / monthly / partners / dashboard
// 输出: 文本表格（默认）或 JSON（--json）
// ==========================================

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use mitra_tracker::api::{ApiError, DashboardView};
use mitra_tracker::app::AppState;
use mitra_tracker::config::{AppConfig, ConfigManager, StorageBackend};
use mitra_tracker::domain::{
    DailyTotal, ImportReport, MonthlyProgress, PartnerProduction, PartnerRollup, ProductionEntry,
    ProductionRecord,
};
use mitra_tracker::i18n::{self, t, t_with_args};
use mitra_tracker::logging;

#[derive(Debug, Parser)]
#[command(name = "mitra-tracker", version, about = "Daily production tracker for partner networks")]
struct Cli {
    /// JSON 配置文件
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 数据文件路径（覆盖配置）
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// 存储后端: csv | sqlite
    #[arg(long, global = true)]
    backend: Option<StorageBackend>,

    /// 语言: en | id
    #[arg(long, global = true)]
    locale: Option<String>,

    /// 以 JSON 输出
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 录入单条记录
    Add(AddArgs),
    /// 批量导入 CSV / Excel 文件
    Import(ImportArgs),
    /// 列出全部记录（日期倒序）
    Records,
    /// 每日全网产量 vs 每日目标
    Daily,
    /// 累计产量 vs 月度目标
    Monthly,
    /// 合作伙伴状态
    Partners(PartnersArgs),
    /// 完整驾驶舱视图
    Dashboard,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// 日期（YYYY-MM-DD, 默认今天）
    #[arg(long)]
    date: Option<NaiveDate>,
    /// 合作伙伴名称
    #[arg(long)]
    partner: String,
    /// 地点
    #[arg(long)]
    location: String,
    /// SPK 数量
    #[arg(long, default_value_t = 0)]
    orders: u32,
    /// 作业数量
    #[arg(long, default_value_t = 0)]
    operations: u32,
    /// 产量（kg）
    #[arg(long, default_value_t = 0.0)]
    production: f64,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// 文件路径（.csv / .xlsx / .xls）
    file: PathBuf,
    /// 只校验不写入
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Args)]
struct PartnersArgs {
    /// 只看某个合作伙伴
    #[arg(long)]
    name: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, json);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    logging::init_with(&config.log_level, config.log_json);
    i18n::set_locale(&config.locale);

    tracing::debug!("{} {}", mitra_tracker::APP_NAME, mitra_tracker::VERSION);

    let state = AppState::new(config).context("failed to open data store")?;

    match cli.command {
        Commands::Add(args) => handle_add(&state, args, cli.json),
        Commands::Import(args) => handle_import(&state, args, cli.json),
        Commands::Records => {
            let records = state.production_api.list_records()?;
            output(&records, cli.json, || print_records(&records))
        }
        Commands::Daily => {
            let daily = state.dashboard_api.daily_totals()?;
            output(&daily, cli.json, || print_daily(&daily))
        }
        Commands::Monthly => {
            let monthly = state.dashboard_api.monthly_progress()?;
            output(&monthly, cli.json, || print_monthly(&monthly))
        }
        Commands::Partners(args) => match args.name {
            Some(name) => {
                let status = state.dashboard_api.partner_status(&name)?;
                output(&status, cli.json, || {
                    print_partner_table(std::slice::from_ref(&status))
                })
            }
            None => {
                let rollup = state.dashboard_api.partner_rollup()?;
                output(&rollup, cli.json, || print_rollup(&rollup))
            }
        },
        Commands::Dashboard => {
            let view = state.dashboard_api.dashboard()?;
            output(&view, cli.json, || print_dashboard(&view))
        }
    }
}

/// 配置优先级: 默认值 < 配置文件 < 环境变量 < 命令行
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = ConfigManager::load(cli.config.as_deref())?;

    if let Some(path) = &cli.data_file {
        config.data_file = path.clone();
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(locale) = &cli.locale {
        config.locale = locale.clone();
    }

    Ok(config)
}

fn handle_add(state: &AppState, args: AddArgs, json: bool) -> Result<()> {
    let entry = ProductionEntry {
        date: args.date.unwrap_or_else(|| chrono::Local::now().date_naive()),
        partner_name: args.partner,
        location: args.location,
        order_count: args.orders,
        operation_count: args.operations,
        production_amount: args.production,
    };

    let record = state.production_api.submit_entry(entry)?;
    output(&record, json, || {
        println!(
            "{}",
            t_with_args(
                "entry.saved",
                &[
                    ("partner", record.partner_name.as_str()),
                    ("date", record.date.to_string().as_str()),
                ],
            )
        );
    })
}

fn handle_import(state: &AppState, args: ImportArgs, json: bool) -> Result<()> {
    let path = args.file.to_string_lossy().to_string();

    if args.dry_run {
        let records = state.production_api.preview_import(&path)?;
        return output(&records, json, || print_records(&records));
    }

    let report: ImportReport = state.production_api.import_file(&path)?;
    output(&report, json, || {
        println!(
            "{}",
            t_with_args(
                "import.success",
                &[
                    ("file", report.file_name.as_str()),
                    ("rows", report.rows_imported.to_string().as_str()),
                ],
            )
        );
        print_records(&report.records);
    })
}

// ==========================================
// 输出
// ==========================================

fn output<T: Serialize>(value: &T, json: bool, text: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text();
    }
    Ok(())
}

fn report_error(err: &anyhow::Error, json: bool) {
    let api_error = err.downcast_ref::<ApiError>();

    if json {
        let body = serde_json::json!({
            "error": {
                "code": api_error.map(|e| e.code()).unwrap_or("ERROR"),
                "message": format!("{:#}", err),
                "details": api_error.and_then(|e| e.details()),
            }
        });
        println!("{}", body);
        return;
    }

    eprintln!("{:#}", err);
    if let Some(ApiError::ImportRejected { errors, .. }) = api_error {
        for row_error in errors {
            eprintln!("  - {}", row_error);
        }
    }
}

fn print_records(records: &[ProductionRecord]) {
    if records.is_empty() {
        println!("{}", t("common.no_data"));
        return;
    }

    println!(
        "{:<10}  {:<24}  {:<16}  {:>10}  {:>14}  {:>15}",
        "Tanggal", "Nama Mitra", "Lokasi", "Jumlah SPK", "Jumlah Operasi", "Jumlah Produksi"
    );
    for r in records {
        println!(
            "{:<10}  {:<24}  {:<16}  {:>10}  {:>14}  {:>15.2}",
            r.date, r.partner_name, r.location, r.order_count, r.operation_count, r.production_amount
        );
    }
}

fn print_daily(daily: &[DailyTotal]) {
    if daily.is_empty() {
        println!("{}", t("common.no_data"));
        return;
    }

    println!("{:<10}  {:>12}  {:>12}", "Tanggal", "Ton", "Target (Ton)");
    for d in daily {
        let marker = if d.target_met { "*" } else { "" };
        println!(
            "{:<10}  {:>12.2}  {:>12.0} {}",
            d.date, d.production_tons, d.daily_target_tons, marker
        );
    }
}

fn print_monthly(monthly: &MonthlyProgress) {
    println!("Total: {:.2} t", monthly.total_production_tons);
    println!("Target: {:.0} t", monthly.monthly_target_tons);
    println!("Progress: {:.2}%", monthly.percentage);
    println!("{}", monthly.band.localized_message());
}

fn print_partner_totals(totals: &[PartnerProduction]) {
    for p in totals {
        println!("{:<24}  {:>14.2} kg", p.partner_name, p.total_production);
    }
}

fn print_partner_table(partners: &[mitra_tracker::PartnerStatus]) {
    println!(
        "{:<24}  {:>14}  {:>14}  {}",
        "Nama Mitra", "Total (kg)", "Target (kg)", "Status"
    );
    for p in partners {
        println!(
            "{:<24}  {:>14.2}  {:>14.2}  {}",
            p.partner_name,
            p.total_production,
            p.target,
            p.status.localized_label()
        );
    }
}

fn print_rollup(rollup: &PartnerRollup) {
    if rollup.partners.is_empty() {
        println!("{}", t("common.no_data"));
        return;
    }

    print_partner_table(&rollup.partners);
    println!();
    for count in &rollup.status_counts {
        println!("{:<20}  {}", count.status.localized_label(), count.partner_count);
    }
}

fn print_dashboard(view: &DashboardView) {
    if view.is_empty {
        println!("{}", t("common.no_data"));
        return;
    }

    print_records(&view.records);
    println!();
    print_daily(&view.daily_totals);
    println!();
    print_monthly(&view.monthly);
    println!();
    print_partner_totals(&view.partner_totals);
    println!();
    print_rollup(&view.partner_rollup);
}
