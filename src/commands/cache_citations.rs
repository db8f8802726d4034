//! # cache-citations 命令实现
//!
//! 将当前数据库中按 DOI 的引用数写入缓存文件，供 `--citations` 复用。
//!
//! ## 依赖关系
//! - 使用 `cli/export.rs` 定义的参数
//! - 使用 `database/citations.rs`

use super::Context;
use crate::cli::export::CacheCitationsArgs;
use crate::database::CitationCache;
use crate::error::Result;
use crate::utils::output;

/// 执行 cache-citations 命令
pub fn execute(args: CacheCitationsArgs, ctx: &Context) -> Result<()> {
    output::print_header("Citation Cache");
    ctx.print_source();

    let cache = CitationCache::from_store(&ctx.store, chrono::Local::now().date_naive());
    cache.save(&args.output)?;

    output::print_success(&format!(
        "Cached citations for {} DOIs to '{}'",
        cache.dois.len(),
        args.output.display()
    ));
    Ok(())
}
