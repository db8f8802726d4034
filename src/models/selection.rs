//! # 过滤选择
//!
//! 用户在四个维度（材料、同位素、作者、年份）上的选择。
//!
//! ## 依赖关系
//! - 被 `analysis/filter.rs`, `dashboard/`, `cli/` 使用
//! - 使用 `regex` 解析年份区间

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::property::Isotope;
use crate::error::{HtmError, Result};

/// 闭区间年份范围 `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[i32; 2]", into = "[i32; 2]")]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(HtmError::InvalidRange(format!(
                "{}-{} (first year must not exceed last year)",
                min, max
            )));
        }
        Ok(YearRange { min, max })
    }

    /// 两端均包含
    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

impl TryFrom<[i32; 2]> for YearRange {
    type Error = HtmError;

    fn try_from(value: [i32; 2]) -> Result<Self> {
        YearRange::new(value[0], value[1])
    }
}

impl From<YearRange> for [i32; 2] {
    fn from(range: YearRange) -> Self {
        [range.min, range.max]
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// 解析年份区间 (e.g., "1960-1970", "1960:1970", "1960..1970", "1968")
pub fn parse_year_range(input: &str) -> Result<YearRange> {
    let pattern = Regex::new(r"^\s*(\d{1,4})\s*(?:(?:-|:|\.\.)\s*(\d{1,4})\s*)?$")
        .map_err(|e| HtmError::Other(e.to_string()))?;

    let caps = pattern
        .captures(input)
        .ok_or_else(|| HtmError::InvalidRange(input.to_string()))?;

    let min: i32 = caps[1]
        .parse()
        .map_err(|_| HtmError::InvalidRange(input.to_string()))?;
    let max: i32 = match caps.get(2) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| HtmError::InvalidRange(input.to_string()))?,
        None => min,
    };

    YearRange::new(min, max)
}

/// 材料名统一为导入时的形式（去空白、小写），丢弃空项
pub fn normalise_materials<S: AsRef<str>>(materials: &[S]) -> Vec<String> {
    materials
        .iter()
        .map(|m| m.as_ref().trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .collect()
}

/// 四维过滤选择
///
/// 任一维度为空时结果为空（各维度之间是交集，不是并集）。
/// `years` 为 `None` 表示不按年份过滤（用于全时段年份直方图）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub materials: Vec<String>,
    pub isotopes: Vec<Isotope>,
    pub authors: Vec<String>,
    pub years: Option<YearRange>,
}

impl FilterSelection {
    pub fn new(
        materials: Vec<String>,
        isotopes: Vec<Isotope>,
        authors: Vec<String>,
        years: Option<YearRange>,
    ) -> Self {
        FilterSelection {
            materials: normalise_materials(&materials),
            isotopes,
            authors,
            years,
        }
    }

    /// 是否存在空维度
    pub fn has_empty_facet(&self) -> bool {
        self.materials.is_empty() || self.isotopes.is_empty() || self.authors.is_empty()
    }

    /// 去掉年份约束后的选择
    pub fn all_time(&self) -> Self {
        FilterSelection {
            years: None,
            ..self.clone()
        }
    }
}
