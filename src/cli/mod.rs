//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - 查看: `table`, `plot`, `citations`, `years`, `breakdown`
//! - 导出: `export`, `report`, `cache-citations`
//! - 会话: `add`, `session`
//! - `info`: 工具说明与数据库概况
//!
//! ## 全局参数
//! `--database`, `--citations`, `--current-year` 均可由环境变量提供。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: filter, view, export, session

pub mod export;
pub mod filter;
pub mod session;
pub mod view;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// htmdash - 氢输运材料属性浏览工具
#[derive(Parser)]
#[command(name = "htmdash")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Explore hydrogen transport material properties", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 全局参数
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Property database: JSON/CSV file or a directory of such files
    /// (default: bundled sample database)
    #[arg(long, global = true, env = "HTM_DATABASE")]
    pub database: Option<PathBuf>,

    /// Citation cache produced by `cache-citations`, applied after loading
    #[arg(long, global = true, env = "HTM_CITATIONS")]
    pub citations: Option<PathBuf>,

    /// Year used as "now" for histograms and per-year citations
    #[arg(long, global = true, env = "HTM_CURRENT_YEAR")]
    pub current_year: Option<i32>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, global = true, default_value_t = 0)]
    pub jobs: usize,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Show the filtered properties as a table
    Table(view::TableArgs),

    /// Plot Arrhenius curves of the filtered properties
    Plot(view::PlotArgs),

    /// Rank references by number of citations
    Citations(view::CitationsArgs),

    /// Count properties per publication year
    Years(view::YearsArgs),

    /// Break the filtered properties down by material, isotope and author
    Breakdown(view::BreakdownArgs),

    /// Export the filtered properties to JSON or a Python script
    Export(export::ExportArgs),

    /// Add a property for this run and show the resulting table
    Add(session::AddArgs),

    /// Replay a file of dashboard events
    Session(session::SessionArgs),

    /// Generate plots and data for every property type
    Report(export::ReportArgs),

    /// Write a citation cache keyed by DOI
    CacheCitations(export::CacheCitationsArgs),

    /// Describe the tool and the loaded database
    Info,
}
