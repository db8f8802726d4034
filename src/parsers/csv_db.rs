//! # CSV 数据库解析器
//!
//! 每行一条记录，列名：
//! `property,material,family,isotope,author,year,pre_exp,act_energy,range_low,range_high,units,source,doi,nb_citations`
//!
//! 只有 `material, isotope, author, year, pre_exp, act_energy` 为必填列。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 调用
//! - 复用 `parsers/json_db.rs` 的 `RecordEntry` 转换逻辑
//! - 使用 `csv` 库读取

use super::json_db::RecordEntry;
use crate::error::{HtmError, Result};
use crate::models::{PropertyKind, PropertyRecord};

use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// CSV 行
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    property: Option<String>,
    material: String,
    #[serde(default)]
    family: Option<String>,
    isotope: String,
    author: String,
    year: i32,
    pre_exp: f64,
    act_energy: f64,
    #[serde(default)]
    range_low: Option<f64>,
    #[serde(default)]
    range_high: Option<f64>,
    #[serde(default)]
    units: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    doi: Option<String>,
    #[serde(default)]
    nb_citations: Option<u32>,
}

impl CsvRow {
    fn into_entry(self) -> Result<RecordEntry> {
        let range = match (self.range_low, self.range_high) {
            (Some(low), Some(high)) => Some([low, high]),
            (None, None) => None,
            _ => {
                return Err(HtmError::InvalidField {
                    field: "range",
                    reason: "both range_low and range_high are required".to_string(),
                })
            }
        };

        Ok(RecordEntry {
            property: self.property.filter(|p| !p.trim().is_empty()),
            material: self.material,
            family: self.family,
            isotope: self.isotope,
            author: self.author,
            year: self.year,
            pre_exp: self.pre_exp,
            act_energy: self.act_energy,
            range,
            units: self.units,
            source: self.source,
            doi: self.doi,
            nb_citations: self.nb_citations,
            data_t: None,
            data_y: None,
        })
    }
}

/// 从任意读取器解析 CSV 数据库
pub fn parse_csv_reader<R: Read>(
    reader: R,
    origin: &str,
    default_kind: Option<PropertyKind>,
) -> Result<Vec<PropertyRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let parse_error = |reason: String| HtmError::ParseError {
            format: "CSV".to_string(),
            path: origin.to_string(),
            reason: format!("row {}: {}", i + 1, reason),
        };

        let row = row.map_err(|e| parse_error(e.to_string()))?;
        let record = row
            .into_entry()
            .and_then(|entry| entry.into_record(default_kind))
            .map_err(|e| parse_error(e.to_string()))?;
        records.push(record);
    }

    Ok(records)
}

/// 解析 CSV 数据库文件
pub fn parse_csv_file(path: &Path) -> Result<Vec<PropertyRecord>> {
    let file = std::fs::File::open(path).map_err(|e| HtmError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_csv_reader(file, &path.display().to_string(), None)
}
