//! # 数据库加载
//!
//! 从单个文件或目录加载属性存储。目录中的文件按路径排序后并行解析，
//! 合并时保持排序后的文件顺序，因此记录顺序与并行度无关。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 调用
//! - 使用 `batch/` 的 FileCollector, BatchRunner
//! - 使用 `parsers/` 解析各文件
//! - 使用 `utils/progress.rs` 显示单文件解析 spinner

use super::store::PropertyStore;
use crate::batch::{BatchRunner, FileCollector, DATABASE_PATTERN};
use crate::error::{HtmError, Result};
use crate::parsers::parse_database_file;
use crate::utils::progress;

use std::path::Path;

/// 加载数据库文件或目录（目录递归搜索 `*.json` 和 `*.csv`）
pub fn load_database(path: &Path, jobs: usize) -> Result<PropertyStore> {
    if path.is_file() {
        let spinner = progress::create_spinner(&format!("Parsing {}", path.display()));
        let records = parse_database_file(path);
        spinner.finish_and_clear();
        return Ok(PropertyStore::from_records(records?));
    }

    let files = FileCollector::new(path.to_path_buf())
        .with_pattern(DATABASE_PATTERN)
        .recursive(true)
        .collect()?;

    if files.is_empty() {
        return Err(HtmError::NoFilesFound {
            pattern: format!("{}/{}", path.display(), DATABASE_PATTERN),
        });
    }

    let parsed = BatchRunner::new(jobs).map(&files, "Loading database", |f| parse_database_file(f))?;

    let mut store = PropertyStore::new();
    for records in parsed {
        store.extend(records?);
    }
    Ok(store)
}
