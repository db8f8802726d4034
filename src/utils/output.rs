//! # 终端输出
//!
//! 统一的状态前缀（`[OK]`, `[ERR]`, `[WARN]`, `[*]`, `[DONE]`）、
//! 标题栏和 "名称: 值" 形式的字段行。错误写到 stderr，其余写到 stdout。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

/// 标题栏和分隔线宽度
const RULE_WIDTH: usize = 60;

fn status(tag: ColoredString, msg: &str) {
    println!("{} {}", tag, msg);
}

pub fn print_success(msg: &str) {
    status("[OK]".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    status("[WARN]".yellow().bold(), msg);
}

pub fn print_info(msg: &str) {
    status("[*]".blue().bold(), msg);
}

pub fn print_done(msg: &str) {
    status("[DONE]".green().bold(), msg);
}

/// 打印 "名称: 值"，值为空时显示 `(none)`
pub fn print_field(name: &str, value: &str) {
    let value = if value.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        value.to_string()
    };
    status("[*]".blue().bold(), &format!("{}: {}", name.bold(), value));
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let rule = "─".repeat(RULE_WIDTH);
    println!("\n{}", rule.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", rule.dimmed());
}

pub fn print_separator() {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}
