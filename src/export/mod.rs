//! # 导出模块
//!
//! 把过滤结果导出为文件：JSON 数据、可复现的 Python 脚本、PNG/SVG 图表。
//!
//! ## 子模块
//! - `json`: 属性组 JSON 导出与读回
//! - `script`: Python 脚本生成
//! - `plot`: plotters 图表渲染
//!
//! ## 依赖关系
//! - 被 `dashboard/`, `commands/` 使用
//! - 使用 `analysis/`, `models/`

pub mod json;
pub mod plot;
pub mod script;

pub use json::{to_json_file, to_json_string};
pub use script::{generate_python_script, SCRIPT_FILENAME};

/// JSON 下载时的文件名
pub const JSON_FILENAME: &str = "data.json";
