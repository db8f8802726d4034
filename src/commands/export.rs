//! # export 命令实现
//!
//! 导出过滤后属性的 JSON 数据，或生成复现当前过滤的 Python 脚本。
//!
//! ## 依赖关系
//! - 使用 `cli/export.rs` 定义的参数
//! - 使用 `export/json.rs`, `export/script.rs`
//! - 使用 `utils/output.rs`

use super::{print_selection, resolve_selection, Context};
use crate::analysis::filter_properties;
use crate::cli::export::{ExportArgs, ExportFormat};
use crate::error::{HtmError, Result};
use crate::export::{generate_python_script, to_json_string, JSON_FILENAME, SCRIPT_FILENAME};
use crate::utils::output;

use std::fs;
use std::path::PathBuf;

/// 执行 export 命令
pub fn execute(args: ExportArgs, ctx: &Context) -> Result<()> {
    let kind = args.filter.kind();
    let selection = resolve_selection(&args.filter, &ctx.store, ctx.current_year)?;

    // stdout 模式只输出内容本身，便于管道
    if !args.stdout {
        output::print_header("Export");
        ctx.print_source();
        print_selection(kind, &selection);
    }

    let (content, default_name) = match args.format {
        ExportFormat::Json => {
            let group = filter_properties(&ctx.store, kind, &selection);
            if !args.stdout {
                output::print_info(&format!("Exporting {} properties", group.len()));
            }
            (to_json_string(&group)?, JSON_FILENAME)
        }
        ExportFormat::Python => (generate_python_script(kind, &selection), SCRIPT_FILENAME),
    };

    if args.stdout {
        println!("{}", content);
        return Ok(());
    }

    let path = args.output.unwrap_or_else(|| PathBuf::from(default_name));
    fs::write(&path, content).map_err(|e| HtmError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    output::print_success(&format!(
        "Exported {} to '{}'",
        args.format,
        path.display()
    ));
    Ok(())
}
