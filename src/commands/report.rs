//! # report 命令实现
//!
//! 为每种属性类型并行生成一组输出：
//! `<kind>.json`, `<kind>.py`, `<kind>_arrhenius.<fmt>`, `<kind>_years.<fmt>`,
//! `<kind>_citations.<fmt>`。
//!
//! ## 功能
//! - 并行处理（rayon），每种类型是一个任务
//! - 属性组为空的类型跳过
//! - 已存在的输出默认跳过，`--overwrite` 时覆盖
//!
//! ## 依赖关系
//! - 使用 `cli/export.rs` 定义的 ReportArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `analysis/`, `export/`

use super::Context;
use crate::analysis::stats::{citation_ranking, year_histogram};
use crate::analysis::{filter_properties, ColourBy, DEFAULT_YEAR_STEP};
use crate::batch::{BatchRunner, ProcessResult};
use crate::cli::export::ReportArgs;
use crate::cli::filter::ImageFormat;
use crate::dashboard::default_years;
use crate::error::{HtmError, Result};
use crate::export::plot::{plot_arrhenius, plot_citations, plot_year_histogram, DEFAULT_SIZE};
use crate::export::{generate_python_script, to_json_file};
use crate::models::{
    normalise_materials, parse_year_range, FilterSelection, Isotope, PropertiesGroup,
    PropertyKind, YearRange,
};
use crate::utils::output;

use std::fs;
use std::path::PathBuf;

/// 所有类型共用的报告配置
struct ReportConfig {
    output_dir: PathBuf,
    materials: Option<Vec<String>>,
    years: Option<YearRange>,
    colour_by: ColourBy,
    format: ImageFormat,
    overwrite: bool,
    current_year: i32,
}

/// 执行 report 命令
pub fn execute(args: ReportArgs, ctx: &Context) -> Result<()> {
    output::print_header("Property Report");
    ctx.print_source();

    // 提前校验年份，避免每个任务重复报错
    let years = args.years.as_deref().map(parse_year_range).transpose()?;

    fs::create_dir_all(&args.output_dir).map_err(|e| HtmError::FileWriteError {
        path: args.output_dir.display().to_string(),
        source: e,
    })?;

    let config = ReportConfig {
        output_dir: args.output_dir.clone(),
        materials: Some(normalise_materials(&args.material)).filter(|m| !m.is_empty()),
        years,
        colour_by: args.colour_by.into(),
        format: args.format,
        overwrite: args.overwrite,
        current_year: ctx.current_year,
    };

    output::print_info(&format!("Output directory: '{}'", config.output_dir.display()));

    let runner = BatchRunner::new(ctx.jobs);
    output::print_info(&format!(
        "Processing {} property types with {} jobs",
        PropertyKind::ALL.len(),
        runner.jobs()
    ));
    let result = runner.run(&PropertyKind::ALL[..], "Generating reports", |kind| {
        process_kind(*kind, ctx, &config)
    })?;

    output::print_separator();
    output::print_success(&format!(
        "Report complete: {} of {} succeeded ({} skipped, {} failed)",
        result.success,
        result.total(),
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed property types:");
        for (name, err) in &result.failures {
            output::print_error(&format!("  {}: {}", name, err));
        }
    }

    Ok(())
}

/// 报告中某一类型的过滤选择：全部同位素、该类型全部作者
fn report_selection(kind: PropertyKind, ctx: &Context, config: &ReportConfig) -> FilterSelection {
    let materials = config
        .materials
        .clone()
        .unwrap_or_else(|| ctx.store.material_options());
    let years = config
        .years
        .unwrap_or_else(|| default_years(&ctx.store, kind, config.current_year));

    FilterSelection::new(
        materials,
        Isotope::ALL.to_vec(),
        ctx.store.authors(kind, None),
        Some(years),
    )
}

fn process_kind(kind: PropertyKind, ctx: &Context, config: &ReportConfig) -> ProcessResult {
    let selection = report_selection(kind, ctx, config);
    let group = filter_properties(&ctx.store, kind, &selection);

    if group.is_empty() {
        return ProcessResult::Skipped(format!("No {} properties", kind.name()));
    }

    let json_path = config.output_dir.join(format!("{}.json", kind.name()));
    if json_path.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            json_path.display()
        ));
    }

    match write_outputs(&group, ctx, config, &selection) {
        Ok(n) => ProcessResult::Success(format!("{}: {} files", kind.name(), n)),
        Err(e) => ProcessResult::Failed(kind.name().to_string(), e.to_string()),
    }
}

/// 写出一种类型的全部文件，返回文件数
fn write_outputs(
    group: &PropertiesGroup,
    ctx: &Context,
    config: &ReportConfig,
    selection: &FilterSelection,
) -> Result<usize> {
    let kind = group.kind;
    let name = kind.name();
    let dir = &config.output_dir;

    to_json_file(group, &dir.join(format!("{}.json", name)))?;

    let script = generate_python_script(kind, selection);
    let script_path = dir.join(format!("{}.py", name));
    fs::write(&script_path, script).map_err(|e| HtmError::FileWriteError {
        path: script_path.display().to_string(),
        source: e,
    })?;

    plot_arrhenius(
        group,
        None,
        config.colour_by,
        &dir.join(format!("{}_arrhenius.{}", name, config.format)),
        DEFAULT_SIZE,
    )?;

    let all_time = filter_properties(&ctx.store, kind, &selection.all_time());
    let bins = year_histogram(
        &all_time,
        DEFAULT_YEAR_STEP,
        config.current_year,
        selection.years,
    )?;
    plot_year_histogram(
        &bins,
        &all_time,
        &dir.join(format!("{}_years.{}", name, config.format)),
        DEFAULT_SIZE,
    )?;

    let ranking = citation_ranking(group, false, config.current_year);
    plot_citations(
        &ranking,
        false,
        &dir.join(format!("{}_citations.{}", name, config.format)),
        DEFAULT_SIZE,
    )?;

    Ok(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::PropertyStore;

    fn context() -> Context {
        Context {
            store: PropertyStore::bundled().unwrap(),
            current_year: 2026,
            jobs: 1,
            source: "test".to_string(),
        }
    }

    fn config(dir: PathBuf) -> ReportConfig {
        ReportConfig {
            output_dir: dir,
            materials: None,
            years: None,
            colour_by: ColourBy::Material,
            format: ImageFormat::Svg,
            overwrite: false,
            current_year: 2026,
        }
    }

    #[test]
    fn test_report_selection_covers_every_material() {
        let ctx = context();
        let cfg = config(std::env::temp_dir());
        let sel = report_selection(PropertyKind::Diffusivity, &ctx, &cfg);
        assert_eq!(sel.materials, ctx.store.material_options());
        assert_eq!(sel.authors, ctx.store.authors(PropertyKind::Diffusivity, None));
        assert_eq!(sel.years, ctx.store.year_bounds(PropertyKind::Diffusivity));
    }

    #[test]
    fn test_report_materials_any_case() {
        let ctx = context();
        let mut cfg = config(std::env::temp_dir());
        cfg.materials = Some(normalise_materials(&["Tungsten"]));
        let sel = report_selection(PropertyKind::Diffusivity, &ctx, &cfg);
        assert_eq!(sel.materials, vec!["tungsten"]);
        assert_eq!(filter_properties(&ctx.store, PropertyKind::Diffusivity, &sel).len(), 4);
    }

    #[test]
    fn test_empty_group_skipped() {
        let ctx = context();
        let mut cfg = config(std::env::temp_dir());
        cfg.materials = Some(vec!["unobtainium".to_string()]);
        let result = process_kind(PropertyKind::Diffusivity, &ctx, &cfg);
        assert!(matches!(result, ProcessResult::Skipped(_)));
    }

    #[test]
    fn test_existing_output_skipped() {
        let dir = std::env::temp_dir().join("htmdash_report_existing");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("diffusivity.json"), "[]").unwrap();

        let ctx = context();
        let result = process_kind(PropertyKind::Diffusivity, &ctx, &config(dir.clone()));
        assert!(matches!(result, ProcessResult::Skipped(_)));

        fs::remove_dir_all(&dir).ok();
    }
}
