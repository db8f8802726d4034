//! # info 命令实现
//!
//! 工具说明以及已加载数据库的逐类型概况。
//!
//! ## 依赖关系
//! - 使用 `database/store.rs`
//! - 使用 `utils/output.rs`

use super::Context;
use crate::error::Result;
use crate::models::PropertyKind;
use crate::utils::output;

use tabled::{Table, Tabled};

const ABOUT: &str = "\
htmdash explores a database of hydrogen transport properties of materials \
(diffusivity, solubility, permeability, recombination and dissociation \
coefficients). Every property follows an Arrhenius law \
X = X_0 exp(-E / (k_B T)). Filter by material, isotope, author and year, \
then plot, rank citations, export the data or generate a Python script \
that reproduces the filter with h-transport-materials.";

#[derive(Debug, Tabled)]
struct KindRow {
    #[tabled(rename = "Property")]
    title: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Units")]
    units: String,
    #[tabled(rename = "Records")]
    count: usize,
    #[tabled(rename = "Materials")]
    materials: usize,
    #[tabled(rename = "Authors")]
    authors: usize,
    #[tabled(rename = "Years")]
    years: String,
}

/// 执行 info 命令
pub fn execute(ctx: &Context) -> Result<()> {
    output::print_header("htmdash");
    println!("{}\n", ABOUT);
    ctx.print_source();

    let rows: Vec<KindRow> = PropertyKind::ALL
        .iter()
        .map(|&kind| KindRow {
            title: kind.title().to_string(),
            symbol: kind.symbol().to_string(),
            units: kind.default_units().to_string(),
            count: ctx.store.count(kind),
            materials: ctx.store.materials(kind).len(),
            authors: ctx.store.authors(kind, None).len(),
            years: ctx
                .store
                .year_bounds(kind)
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    println!("{}", Table::new(&rows));
    output::print_info(&format!("Current year: {}", ctx.current_year));
    Ok(())
}
