//! # htmdash - 氢输运材料属性浏览工具
//!
//! 浏览氢输运性质数据库（扩散系数、溶解度、渗透率、复合 / 解离系数），
//! 过滤、绘图、统计引用数并导出数据或 Python 脚本。
//!
//! ## 子命令
//! - `table` / `plot` / `citations` / `years` / `breakdown` - 仪表板各视图
//! - `export` - 导出 JSON 数据或 Python 脚本
//! - `add` - 添加一条属性（仅本次运行）
//! - `session` - 重放仪表板事件
//! - `report` - 逐属性类型批量生成输出
//! - `cache-citations` - 生成引用数缓存
//! - `info` - 工具说明与数据库概况
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── database/  (加载、引用数缓存、新属性表单)
//!   │     ├── analysis/  (过滤、曲线、统计)
//!   │     ├── dashboard/ (会话状态机)
//!   │     └── export/    (JSON、脚本、图表)
//!   ├── parsers/    (JSON / CSV 数据库解析)
//!   ├── models/     (数据模型)
//!   ├── batch/      (并行批处理)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod batch;
mod cli;
mod commands;
mod dashboard;
mod database;
mod error;
mod export;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
