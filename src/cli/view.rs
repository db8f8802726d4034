//! # 查看类子命令 CLI 定义
//!
//! 与仪表板各视图一一对应：
//! - `table`: 数据表
//! - `plot`: Arrhenius 曲线图（可叠加平均曲线）
//! - `citations`: 引用数排名
//! - `years`: 年份直方图
//! - `breakdown`: 材料 / 同位素 / 作者饼图
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/` 相应模块

use super::filter::{ColourByArg, FilterArgs, ImageFormat, MeanMethodArg};
use crate::analysis::DEFAULT_YEAR_STEP;

use clap::Args;
use std::path::PathBuf;

/// table 子命令参数
#[derive(Args, Debug)]
pub struct TableArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Also save the table rows to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output image (.png or .svg)
    #[arg(short, long, default_value = "arrhenius.png")]
    pub output: PathBuf,

    /// Curve colouring
    #[arg(long, value_enum, default_value_t = ColourByArg::Property)]
    pub colour_by: ColourByArg,

    /// Overlay the mean curve of the displayed properties
    #[arg(long, default_value_t = false)]
    pub mean: bool,

    /// Mean curve method
    #[arg(long, value_enum, default_value_t = MeanMethodArg::LogAverage)]
    pub mean_method: MeanMethodArg,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 700)]
    pub height: u32,
}

/// citations 子命令参数
#[derive(Args, Debug)]
pub struct CitationsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Divide citation counts by years since publication
    #[arg(long, default_value_t = false)]
    pub per_year: bool,

    /// Save a horizontal bar chart (.png or .svg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// years 子命令参数
#[derive(Args, Debug)]
pub struct YearsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Bin width in years
    #[arg(long, default_value_t = DEFAULT_YEAR_STEP)]
    pub step: usize,

    /// Save a histogram (.png or .svg)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// breakdown 子命令参数
#[derive(Args, Debug)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Directory for materials/isotopes/authors pie charts
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Image format for the pie charts
    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,
}
