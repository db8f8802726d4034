//! # years 命令实现
//!
//! 统计全时段属性组每个年份分箱内的属性数，标记选中年份的分箱。
//!
//! ## 依赖关系
//! - 使用 `cli/view.rs` 定义的参数
//! - 使用 `analysis/stats.rs`, `export/plot.rs`
//! - 使用 `utils/output.rs`

use super::{print_selection, resolve_selection, Context};
use crate::analysis::filter_properties;
use crate::analysis::stats::year_histogram;
use crate::cli::view::YearsArgs;
use crate::error::Result;
use crate::export::plot::{plot_year_histogram, DEFAULT_SIZE};
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Debug, Tabled)]
struct BinRow {
    #[tabled(rename = "Years")]
    years: String,
    #[tabled(rename = "Properties")]
    count: usize,
    #[tabled(rename = "Selected")]
    selected: String,
}

/// 执行 years 命令
pub fn execute(args: YearsArgs, ctx: &Context) -> Result<()> {
    output::print_header("Properties per Year");
    ctx.print_source();

    let kind = args.filter.kind();
    let selection = resolve_selection(&args.filter, &ctx.store, ctx.current_year)?;
    print_selection(kind, &selection);

    // 直方图忽略年份过滤，只用于高亮
    let all_time = filter_properties(&ctx.store, kind, &selection.all_time());
    let bins = year_histogram(&all_time, args.step, ctx.current_year, selection.years)?;

    let last = bins.len().saturating_sub(1);
    let rows: Vec<BinRow> = bins
        .iter()
        .enumerate()
        .map(|(i, b)| BinRow {
            years: if i == last {
                format!("[{}, {}]", b.start, b.end)
            } else {
                format!("[{}, {})", b.start, b.end)
            },
            count: b.count,
            selected: if b.selected { "*".to_string() } else { String::new() },
        })
        .collect();
    println!("{}", Table::new(&rows));

    output::print_info(&format!(
        "{} properties in total, {} in the selected years",
        all_time.len(),
        all_time
            .iter()
            .filter(|r| selection.years.map_or(true, |y| y.contains(r.year)))
            .count()
    ));

    if let Some(path) = &args.output {
        plot_year_histogram(&bins, &all_time, path, DEFAULT_SIZE)?;
        output::print_success(&format!("Histogram saved to '{}'", path.display()));
    }

    Ok(())
}
