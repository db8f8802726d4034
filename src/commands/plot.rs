//! # plot 命令实现
//!
//! 绘制过滤后属性的 Arrhenius 曲线，可叠加平均曲线。
//!
//! ## 依赖关系
//! - 使用 `cli/view.rs` 定义的参数
//! - 使用 `analysis/curve.rs`, `export/plot.rs`
//! - 使用 `utils/output.rs`

use super::{print_selection, resolve_selection, Context};
use crate::analysis::{filter_properties, mean_property};
use crate::cli::view::PlotArgs;
use crate::error::Result;
use crate::export::plot::plot_arrhenius;
use crate::utils::output;

/// 执行 plot 命令
pub fn execute(args: PlotArgs, ctx: &Context) -> Result<()> {
    output::print_header("Arrhenius Plot");
    ctx.print_source();

    let kind = args.filter.kind();
    let selection = resolve_selection(&args.filter, &ctx.store, ctx.current_year)?;
    print_selection(kind, &selection);

    let group = filter_properties(&ctx.store, kind, &selection);
    if group.is_empty() {
        output::print_warning("No properties match the current selection; plotting empty axes.");
    } else {
        output::print_info(&format!("Plotting {} properties", group.len()));
    }

    let mean = if args.mean {
        match mean_property(&group, args.mean_method.into()) {
            Ok(mean) => {
                output::print_info(&format!(
                    "Mean value ({}): {} = {:.2e} {}, {} = {:.2} eV",
                    args.mean_method,
                    kind.pre_exp_label(),
                    mean.pre_exp,
                    mean.units,
                    kind.act_energy_label(),
                    mean.act_energy
                ));
                Some(mean)
            }
            Err(e) => {
                output::print_warning(&format!("Mean value unavailable: {}", e));
                None
            }
        }
    } else {
        None
    };

    plot_arrhenius(
        &group,
        mean.as_ref(),
        args.colour_by.into(),
        &args.output,
        (args.width, args.height),
    )?;

    output::print_success(&format!("Plot saved to '{}'", args.output.display()));
    Ok(())
}
