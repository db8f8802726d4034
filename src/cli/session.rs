//! # 会话类子命令 CLI 定义
//!
//! - `add`: 添加一条属性（仅本次运行有效）并显示结果表
//! - `session`: 按顺序重放仪表板事件文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/add.rs`, `commands/session.rs`

use super::filter::{FilterArgs, PropertyArg};

use clap::Args;
use std::path::PathBuf;

/// add 子命令参数（必填项缺失时报错）
#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Pre-exponential factor of the new property
    #[arg(long)]
    pub pre_exp: Option<f64>,

    /// Activation energy (eV)
    #[arg(long)]
    pub act_energy: Option<f64>,

    /// Author (stored lowercase)
    #[arg(long = "new-author")]
    pub new_author: Option<String>,

    /// Publication year
    #[arg(long = "new-year")]
    pub new_year: Option<i32>,

    /// Isotope: H, D or T
    #[arg(long = "new-isotope")]
    pub new_isotope: Option<String>,

    /// Material
    #[arg(long = "new-material")]
    pub new_material: Option<String>,

    /// Lower bound of the validity range (K)
    #[arg(long)]
    pub range_low: Option<f64>,

    /// Upper bound of the validity range (K)
    #[arg(long)]
    pub range_high: Option<f64>,

    /// Units (default: units of the property type)
    #[arg(long)]
    pub units: Option<String>,
}

/// session 子命令参数
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// JSON file with an array of dashboard events
    pub events: PathBuf,

    /// Initial property tab
    #[arg(short, long, value_enum, default_value_t = PropertyArg::Diffusivity)]
    pub property: PropertyArg,

    /// Directory for downloads and the final view (data.json, script.py, view.json)
    #[arg(short, long, default_value = "htm_session")]
    pub output_dir: PathBuf,
}
