//! # table 命令实现
//!
//! 以表格显示过滤后的属性，可另存为 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/view.rs` 定义的参数
//! - 使用 `analysis/filter.rs`, `analysis/table.rs`
//! - 使用 `utils/output.rs`

use super::{print_selection, resolve_selection, Context};
use crate::analysis::filter_properties;
use crate::analysis::table::table_rows;
use crate::analysis::TableRow;
use crate::cli::view::TableArgs;
use crate::error::{HtmError, Result};
use crate::models::PropertiesGroup;
use crate::utils::output;

use std::path::Path;
use tabled::Table;

/// 执行 table 命令
pub fn execute(args: TableArgs, ctx: &Context) -> Result<()> {
    output::print_header("Property Table");
    ctx.print_source();

    let kind = args.filter.kind();
    let selection = resolve_selection(&args.filter, &ctx.store, ctx.current_year)?;
    print_selection(kind, &selection);

    let group = filter_properties(&ctx.store, kind, &selection);
    print_group_table(&group);

    if let Some(path) = &args.csv {
        save_rows_csv(&table_rows(&group), path)?;
        output::print_success(&format!("Table saved to '{}'", path.display()));
    }

    Ok(())
}

/// 打印属性组的表格
pub fn print_group_table(group: &PropertiesGroup) {
    if group.is_empty() {
        output::print_warning("No properties match the current selection.");
        return;
    }

    output::print_header(&format!(
        "{} {} properties",
        group.len(),
        group.kind.title()
    ));
    let table = Table::new(table_rows(group));
    println!("{}", table);
}

/// 保存表格行到 CSV
fn save_rows_csv(rows: &[TableRow], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| HtmError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}
