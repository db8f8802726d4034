//! # 进度条工具
//!
//! 封装 `indicatif`：批量任务用计数进度条，单个文件解析用 spinner。
//! 只有一个任务时不显示进度条。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 和 `database/loader.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str = "{spinner:.green} {msg:<20} [{bar:36.cyan/blue}] {pos}/{len} ({elapsed})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} ({elapsed})";
const SPINNER_TICKS: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// 批量任务进度条
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    if len <= 1 {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(BAR_TEMPLATE)
        .map(|s| s.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// 不确定进度的单个任务
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
        .map(|s| s.tick_strings(&SPINNER_TICKS))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
