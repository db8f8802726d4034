//! # add 命令实现
//!
//! 校验并添加一条新属性（只在本次运行的存储中），然后显示过滤后的表格。
//!
//! ## 依赖关系
//! - 使用 `cli/session.rs` 定义的 AddArgs
//! - 使用 `database/form.rs`
//! - 使用 `commands/table.rs` 打印表格

use super::table::print_group_table;
use super::{print_selection, resolve_selection, Context};
use crate::analysis::filter_properties;
use crate::cli::session::AddArgs;
use crate::database::NewPropertyForm;
use crate::error::Result;
use crate::models::Isotope;
use crate::utils::output;

/// 执行 add 命令
pub fn execute(args: AddArgs, mut ctx: Context) -> Result<()> {
    output::print_header("Add Property");
    ctx.print_source();

    let kind = args.filter.kind();
    let form = form_from_args(&args)?;
    let record = form.validate(kind)?;

    output::print_success(&format!(
        "Added {} of {} by {}",
        kind.name(),
        record.material.name,
        record.label()
    ));

    ctx.store.append(record);

    let selection = resolve_selection(&args.filter, &ctx.store, ctx.current_year)?;
    print_selection(kind, &selection);

    let group = filter_properties(&ctx.store, kind, &selection);
    print_group_table(&group);
    Ok(())
}

/// 命令行参数 -> 表单；同位素在此解析，其余缺失项留给表单校验
fn form_from_args(args: &AddArgs) -> Result<NewPropertyForm> {
    let isotope = args
        .new_isotope
        .as_deref()
        .map(|s| s.parse::<Isotope>())
        .transpose()?;

    Ok(NewPropertyForm {
        pre_exp: args.pre_exp,
        act_energy: args.act_energy,
        author: args.new_author.clone(),
        year: args.new_year,
        isotope,
        material: args.new_material.clone(),
        range_low: args.range_low,
        range_high: args.range_high,
        units: args.units.clone(),
    })
}
