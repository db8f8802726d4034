//! # breakdown 命令实现
//!
//! 按材料、同位素、作者统计过滤后的属性数，可输出饼图。
//!
//! ## 依赖关系
//! - 使用 `cli/view.rs` 定义的参数
//! - 使用 `analysis/stats.rs`, `export/plot.rs`
//! - 使用 `utils/output.rs`

use super::{print_selection, resolve_selection, Context};
use crate::analysis::filter_properties;
use crate::analysis::stats::{author_breakdown, isotope_breakdown, material_breakdown, share};
use crate::analysis::Slice;
use crate::cli::view::BreakdownArgs;
use crate::error::{HtmError, Result};
use crate::export::plot::{plot_pie, DEFAULT_SIZE};
use crate::utils::output;

use std::fs;
use tabled::{Table, Tabled};

#[derive(Debug, Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    label: String,
    #[tabled(rename = "Properties")]
    count: usize,
    #[tabled(rename = "Share (%)")]
    share: String,
}

/// 执行 breakdown 命令
pub fn execute(args: BreakdownArgs, ctx: &Context) -> Result<()> {
    output::print_header("Breakdown");
    ctx.print_source();

    let kind = args.filter.kind();
    let selection = resolve_selection(&args.filter, &ctx.store, ctx.current_year)?;
    print_selection(kind, &selection);

    let group = filter_properties(&ctx.store, kind, &selection);
    if group.is_empty() {
        output::print_warning("No properties match the current selection.");
    }

    let charts = [
        ("materials", material_breakdown(&group)),
        ("isotopes", isotope_breakdown(&group)),
        ("authors", author_breakdown(&group)),
    ];

    for (name, slices) in &charts {
        output::print_info(&format!("By {}:", name.trim_end_matches('s')));
        print_slices(slices);
    }

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir).map_err(|e| HtmError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;

        for (name, slices) in &charts {
            let path = dir.join(format!("{}.{}", name, args.format));
            plot_pie(&format!("{} ({})", kind.title(), name), slices, &path, DEFAULT_SIZE)?;
            output::print_success(&format!("Pie chart saved to '{}'", path.display()));
        }
    }

    Ok(())
}

fn print_slices(slices: &[Slice]) {
    let rows: Vec<ShareRow> = slices
        .iter()
        .map(|s| ShareRow {
            label: s.label.clone(),
            count: s.count,
            share: format!("{:.1}", share(s, slices)),
        })
        .collect();
    println!("{}", Table::new(&rows));
}
