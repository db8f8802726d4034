//! # 解析器模块
//!
//! 提供属性数据库文件（JSON / CSV）的解析器。
//!
//! ## 依赖关系
//! - 被 `database/` 和 `export/json.rs` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: json_db, csv_db

pub mod csv_db;
pub mod json_db;

use crate::error::{HtmError, Result};
use crate::models::PropertyRecord;
use std::path::Path;

/// 从文件路径推断格式并解析
pub fn parse_database_file(path: &Path) -> Result<Vec<PropertyRecord>> {
    if !path.exists() {
        return Err(HtmError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => json_db::parse_json_file(path),
        "csv" => csv_db::parse_csv_file(path),
        _ => Err(HtmError::UnsupportedFormat(format!(
            "Cannot determine database format for: {}",
            path.display()
        ))),
    }
}
