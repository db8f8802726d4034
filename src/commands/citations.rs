//! # citations 命令实现
//!
//! 按引用数排列过滤后属性的参考文献（同一 "作者 (年份)" 只计一次）。
//!
//! ## 依赖关系
//! - 使用 `cli/view.rs` 定义的参数
//! - 使用 `analysis/stats.rs`, `export/plot.rs`
//! - 使用 `utils/output.rs`

use super::{print_selection, resolve_selection, Context};
use crate::analysis::filter_properties;
use crate::analysis::stats::citation_ranking;
use crate::cli::view::CitationsArgs;
use crate::error::Result;
use crate::export::plot::{plot_citations, DEFAULT_SIZE};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 引用数表格行
#[derive(Debug, Tabled)]
struct CitationRow {
    #[tabled(rename = "Reference")]
    label: String,
    #[tabled(rename = "Citations")]
    citations: String,
    #[tabled(rename = "DOI")]
    doi: String,
}

/// 执行 citations 命令
pub fn execute(args: CitationsArgs, ctx: &Context) -> Result<()> {
    output::print_header("Citations");
    ctx.print_source();

    let kind = args.filter.kind();
    let selection = resolve_selection(&args.filter, &ctx.store, ctx.current_year)?;
    print_selection(kind, &selection);

    let group = filter_properties(&ctx.store, kind, &selection);
    let ranking = citation_ranking(&group, args.per_year, ctx.current_year);

    if ranking.is_empty() {
        output::print_warning("No properties match the current selection.");
    } else {
        // 排名升序适合条形图，表格按降序显示
        let rows: Vec<CitationRow> = ranking
            .iter()
            .rev()
            .map(|e| CitationRow {
                label: e.label.clone(),
                citations: if args.per_year {
                    format!("{:.1}", e.citations)
                } else {
                    format!("{:.0}", e.citations)
                },
                doi: e.doi.clone(),
            })
            .collect();
        println!("{}", Table::new(&rows));
    }

    if let Some(path) = &args.output {
        plot_citations(&ranking, args.per_year, path, DEFAULT_SIZE)?;
        output::print_success(&format!("Chart saved to '{}'", path.display()));
    }

    Ok(())
}
