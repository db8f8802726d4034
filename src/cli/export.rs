//! # 导出类子命令 CLI 定义
//!
//! - `export`: 导出 JSON 数据或 Python 脚本
//! - `report`: 为每种属性类型批量生成图表和数据
//! - `cache-citations`: 生成引用数缓存
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/export.rs`, `commands/report.rs`, `commands/cache_citations.rs`

use super::filter::{ColourByArg, FilterArgs, ImageFormat};

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 导出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON array of the filtered properties
    Json,
    /// Python script reproducing the filter
    Python,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Python => write!(f, "python"),
        }
    }
}

/// export 子命令参数
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Output file (default: data.json or script.py)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long, default_value_t = false)]
    pub stdout: bool,
}

/// report 子命令参数
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Output directory
    #[arg(short, long, default_value = "htm_report")]
    pub output_dir: PathBuf,

    /// Materials to include, comma separated (default: every material)
    #[arg(short, long, value_delimiter = ',')]
    pub material: Vec<String>,

    /// Inclusive year range, e.g. "1960-2010" (default: full span per property)
    #[arg(short, long)]
    pub years: Option<String>,

    /// Curve colouring
    #[arg(long, value_enum, default_value_t = ColourByArg::Material)]
    pub colour_by: ColourByArg,

    /// Image format
    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

/// cache-citations 子命令参数
#[derive(Args, Debug)]
pub struct CacheCitationsArgs {
    /// Output file
    #[arg(short, long, default_value = "citations.json")]
    pub output: PathBuf,
}
