//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑，并提供共用的数据库加载和过滤参数解析。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `database/`, `analysis/`, `export/`, `dashboard/`, `utils/`
//! - 子模块: table, plot, citations, years, breakdown, export, add, session,
//!   report, cache_citations, info

pub mod add;
pub mod breakdown;
pub mod cache_citations;
pub mod citations;
pub mod export;
pub mod info;
pub mod plot;
pub mod report;
pub mod session;
pub mod table;
pub mod years;

use crate::cli::filter::FilterArgs;
use crate::cli::{Cli, Commands, GlobalArgs};
use crate::dashboard::{default_years, INITIAL_MATERIAL};
use crate::database::{load_database, CitationCache, PropertyStore};
use crate::error::Result;
use crate::models::{
    normalise_materials, parse_year_range, FilterSelection, Isotope, PropertyKind,
};
use crate::utils::output;

use chrono::Datelike;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let ctx = Context::load(&cli.global)?;

    match cli.command {
        Commands::Table(args) => table::execute(args, &ctx),
        Commands::Plot(args) => plot::execute(args, &ctx),
        Commands::Citations(args) => citations::execute(args, &ctx),
        Commands::Years(args) => years::execute(args, &ctx),
        Commands::Breakdown(args) => breakdown::execute(args, &ctx),
        Commands::Export(args) => export::execute(args, &ctx),
        Commands::Add(args) => add::execute(args, ctx),
        Commands::Session(args) => session::execute(args, ctx),
        Commands::Report(args) => report::execute(args, &ctx),
        Commands::CacheCitations(args) => cache_citations::execute(args, &ctx),
        Commands::Info => info::execute(&ctx),
    }
}

/// 命令运行环境：已加载的存储和全局设置
pub struct Context {
    pub store: PropertyStore,
    pub current_year: i32,
    pub jobs: usize,
    /// 数据来源描述
    pub source: String,
}

impl Context {
    /// 加载数据库（未指定时使用内置样例）并应用引用数缓存
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let (mut store, source) = match &global.database {
            Some(path) => (
                load_database(path, global.jobs)?,
                path.display().to_string(),
            ),
            None => (PropertyStore::bundled()?, "bundled sample database".to_string()),
        };

        if let Some(path) = &global.citations {
            let cache = CitationCache::load(path)?;
            cache.apply(&mut store);
        }

        let current_year = global
            .current_year
            .unwrap_or_else(|| chrono::Local::now().year());

        Ok(Context {
            store,
            current_year,
            jobs: global.jobs,
            source,
        })
    }

    /// 打印数据来源；空数据库给出警告
    pub fn print_source(&self) {
        if self.store.is_empty() {
            output::print_warning(&format!("No properties found in {}", self.source));
            return;
        }
        output::print_info(&format!(
            "Loaded {} properties from {}",
            self.store.len(),
            self.source
        ));
    }
}

/// 将过滤参数解析为过滤选择；未给出的维度使用仪表板初始值
pub fn resolve_selection(
    filter: &FilterArgs,
    store: &PropertyStore,
    current_year: i32,
) -> Result<FilterSelection> {
    let kind = filter.kind();

    let materials = if filter.all_materials {
        store.material_options()
    } else if filter.material.is_empty() {
        vec![INITIAL_MATERIAL.to_string()]
    } else {
        normalise_materials(&filter.material)
    };

    let isotopes = if filter.isotope.is_empty() {
        Isotope::ALL.to_vec()
    } else {
        filter
            .isotope
            .iter()
            .map(|s| s.parse::<Isotope>())
            .collect::<Result<Vec<_>>>()?
    };

    let authors = if filter.all_authors {
        store.authors(kind, None)
    } else if filter.author.is_empty() {
        store.authors(kind, Some(materials.as_slice()))
    } else {
        trimmed(&filter.author)
    };

    let years = match &filter.years {
        Some(text) => parse_year_range(text)?,
        None => default_years(store, kind, current_year),
    };

    Ok(FilterSelection::new(
        materials,
        isotopes,
        authors,
        Some(years),
    ))
}

fn trimmed(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// 打印过滤选择摘要
pub fn print_selection(kind: PropertyKind, selection: &FilterSelection) {
    output::print_field("Property", kind.title());
    output::print_field("Materials", &selection.materials.join(", "));
    let isotopes: Vec<&str> = selection.isotopes.iter().map(|i| i.symbol()).collect();
    output::print_field("Isotopes", &isotopes.join(", "));
    output::print_field("Authors", &selection.authors.join(", "));
    if let Some(years) = selection.years {
        output::print_field("Years", &years.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::filter::PropertyArg;

    fn filter() -> FilterArgs {
        FilterArgs {
            property: PropertyArg::Diffusivity,
            material: vec![],
            all_materials: false,
            isotope: vec![],
            author: vec![],
            all_authors: false,
            years: None,
        }
    }

    #[test]
    fn test_defaults_match_dashboard_initial_state() {
        let store = PropertyStore::bundled().unwrap();
        let sel = resolve_selection(&filter(), &store, 2026).unwrap();
        assert_eq!(sel.materials, vec!["tungsten"]);
        assert_eq!(sel.isotopes.len(), 3);
        assert_eq!(sel.authors.len(), 4);
        assert_eq!(sel.years, store.year_bounds(PropertyKind::Diffusivity));
    }

    #[test]
    fn test_explicit_facets() {
        let store = PropertyStore::bundled().unwrap();
        let args = FilterArgs {
            material: vec![" Copper".to_string()],
            isotope: vec!["d".to_string()],
            all_authors: true,
            years: Some("1990-2000".to_string()),
            ..filter()
        };
        let sel = resolve_selection(&args, &store, 2026).unwrap();
        assert_eq!(sel.materials, vec!["copper"]);
        assert_eq!(sel.isotopes, vec![Isotope::D]);
        assert_eq!(sel.authors, store.authors(PropertyKind::Diffusivity, None));
        let years = sel.years.unwrap();
        assert_eq!((years.min, years.max), (1990, 2000));
    }

    #[test]
    fn test_bad_isotope_is_error() {
        let store = PropertyStore::bundled().unwrap();
        let args = FilterArgs {
            isotope: vec!["X".to_string()],
            ..filter()
        };
        assert!(resolve_selection(&args, &store, 2026).is_err());
    }
}
