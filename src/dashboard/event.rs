//! # 仪表板事件
//!
//! 用户交互的显式类型：每个控件变化或按钮点击对应一个变体，
//! 会话根据变体直接分派，不依赖触发源的字符串标识。
//!
//! 事件以 JSON 表示，`"event"` 字段为标签：
//!
//! ```json
//! [
//!   { "event": "select_tab", "property": "solubility" },
//!   { "event": "select_materials", "materials": ["tungsten", "copper"] },
//!   { "event": "select_years", "years": [1960, 2010] },
//!   { "event": "compute_mean" },
//!   { "event": "extract_data" }
//! ]
//! ```
//!
//! ## 依赖关系
//! - 被 `dashboard/session.rs`, `commands/session.rs` 使用
//! - 使用 `serde_json` 读取事件文件

use crate::analysis::{ColourBy, MeanMethod};
use crate::database::NewPropertyForm;
use crate::error::{HtmError, Result};
use crate::models::{Isotope, PropertyKind, YearRange};

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 一次用户交互
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    // ─────────────────────────────────────────────────────────────
    // 标签页与过滤控件
    // ─────────────────────────────────────────────────────────────
    /// 切换属性类型标签页
    SelectTab { property: PropertyKind },
    SelectMaterials { materials: Vec<String> },
    SelectIsotopes { isotopes: Vec<Isotope> },
    SelectAuthors { authors: Vec<String> },
    SelectYears { years: YearRange },

    // ─────────────────────────────────────────────────────────────
    // "All" 按钮
    // ─────────────────────────────────────────────────────────────
    AddAllMaterials,
    AddAllAuthors,

    // ─────────────────────────────────────────────────────────────
    // 显示选项
    // ─────────────────────────────────────────────────────────────
    SetCitationMode { per_year: bool },
    SetColourBy { colour_by: ColourBy },

    // ─────────────────────────────────────────────────────────────
    // 动作按钮
    // ─────────────────────────────────────────────────────────────
    ComputeMean {
        #[serde(default)]
        method: MeanMethod,
    },
    SubmitProperty { form: NewPropertyForm },
    ExtractData,
    GeneratePython,
}

impl Event {
    /// 事件名（与 JSON 标签一致）
    pub fn name(&self) -> &'static str {
        match self {
            Event::SelectTab { .. } => "select_tab",
            Event::SelectMaterials { .. } => "select_materials",
            Event::SelectIsotopes { .. } => "select_isotopes",
            Event::SelectAuthors { .. } => "select_authors",
            Event::SelectYears { .. } => "select_years",
            Event::AddAllMaterials => "add_all_materials",
            Event::AddAllAuthors => "add_all_authors",
            Event::SetCitationMode { .. } => "set_citation_mode",
            Event::SetColourBy { .. } => "set_colour_by",
            Event::ComputeMean { .. } => "compute_mean",
            Event::SubmitProperty { .. } => "submit_property",
            Event::ExtractData => "extract_data",
            Event::GeneratePython => "generate_python",
        }
    }
}

/// 解析事件列表（JSON 数组）
pub fn parse_events(content: &str) -> Result<Vec<Event>> {
    Ok(serde_json::from_str(content)?)
}

/// 读取事件文件
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    if !path.exists() {
        return Err(HtmError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path).map_err(|e| HtmError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_events(&content)
}
