//! # session 命令实现
//!
//! 按顺序重放仪表板事件文件：每个事件之后打印视图摘要，
//! 下载类事件写入输出目录，最后保存完整视图 `view.json`。
//!
//! ## 依赖关系
//! - 使用 `cli/session.rs` 定义的 SessionArgs
//! - 使用 `dashboard/` 会话状态机
//! - 使用 `utils/output.rs`

use super::Context;
use crate::cli::session::SessionArgs;
use crate::dashboard::{read_events, DashboardView, Outcome, Session};
use crate::error::{HtmError, Result};
use crate::utils::output;

use std::fs;
use std::path::Path;
use tabled::Table;

/// 最终视图文件名
pub const VIEW_FILENAME: &str = "view.json";

/// 执行 session 命令
pub fn execute(args: SessionArgs, ctx: Context) -> Result<()> {
    output::print_header("Dashboard Session");
    ctx.print_source();

    let events = read_events(&args.events)?;
    output::print_info(&format!(
        "Replaying {} events from '{}'",
        events.len(),
        args.events.display()
    ));

    fs::create_dir_all(&args.output_dir).map_err(|e| HtmError::FileWriteError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;

    let Context {
        mut store,
        current_year,
        ..
    } = ctx;
    let mut session = Session::new(&store, args.property.into(), current_year);

    for (i, event) in events.into_iter().enumerate() {
        output::print_separator();
        output::print_info(&format!("#{} {}", i + 1, event.name()));

        match session.handle(&mut store, event)? {
            Outcome::View(view) => print_view_summary(&view),
            Outcome::Download { filename, content } => {
                let path = args.output_dir.join(filename);
                write_file(&path, &content)?;
                output::print_success(&format!("Downloaded '{}'", path.display()));
            }
            Outcome::FormError(msg) => output::print_warning(&msg),
        }
    }

    let view = session.view(&store)?;
    output::print_separator();
    println!("{}", Table::new(&view.table));

    let path = args.output_dir.join(VIEW_FILENAME);
    write_file(&path, &serde_json::to_string_pretty(&view)?)?;
    output::print_done(&format!("Final view saved to '{}'", path.display()));
    Ok(())
}

/// 视图摘要：标签页、曲线数、平均值和提示
fn print_view_summary(view: &DashboardView) {
    output::print_info(&format!(
        "{}: {} properties, {} materials, {} authors",
        view.kind.title(),
        view.table.len(),
        view.selection.materials.len(),
        view.selection.authors.len()
    ));

    if let Some(mean) = &view.mean {
        output::print_info(&format!(
            "Mean: {} = {:.2e} {}, {} = {:.2} eV",
            view.kind.pre_exp_label(),
            mean.pre_exp,
            mean.units,
            view.kind.act_energy_label(),
            mean.act_energy
        ));
    }

    if let Some(notice) = &view.notice {
        output::print_warning(notice);
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| HtmError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
