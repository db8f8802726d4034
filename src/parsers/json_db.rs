//! # JSON 数据库解析器
//!
//! 读取 JSON 格式的属性数据库。支持两种顶层结构：
//! - `{ "properties": [ ... ] }`
//! - `[ ... ]`（JSON 导出文件即此格式，可直接重新读取）
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 和 `export/json.rs` 调用
//! - 使用 `models/` 数据模型

use crate::error::{HtmError, Result};
use crate::models::{Isotope, Material, PropertyKind, PropertyRecord, RawData, TemperatureRange};

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 文件中的一条记录
#[derive(Debug, Clone, Deserialize)]
pub struct RecordEntry {
    /// 属性类型；缺省时使用调用方给出的类型
    #[serde(default, alias = "type")]
    pub property: Option<String>,
    pub material: String,
    #[serde(default)]
    pub family: Option<String>,
    pub isotope: String,
    pub author: String,
    pub year: i32,
    pub pre_exp: f64,
    pub act_energy: f64,
    #[serde(default)]
    pub range: Option<[f64; 2]>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub nb_citations: Option<u32>,
    #[serde(default, rename = "data_T")]
    pub data_t: Option<Vec<f64>>,
    #[serde(default)]
    pub data_y: Option<Vec<f64>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatabaseFile {
    Wrapped { properties: Vec<RecordEntry> },
    Bare(Vec<RecordEntry>),
}

impl RecordEntry {
    /// 转换为属性记录并做基本校验
    pub fn into_record(self, default_kind: Option<PropertyKind>) -> Result<PropertyRecord> {
        let kind = match (&self.property, default_kind) {
            (Some(name), _) => name.parse::<PropertyKind>()?,
            (None, Some(kind)) => kind,
            (None, None) => {
                return Err(HtmError::MissingField("property"));
            }
        };

        if !self.pre_exp.is_finite() {
            return Err(HtmError::InvalidField {
                field: "pre_exp",
                reason: format!("{} is not finite", self.pre_exp),
            });
        }
        if !self.act_energy.is_finite() {
            return Err(HtmError::InvalidField {
                field: "act_energy",
                reason: format!("{} is not finite", self.act_energy),
            });
        }

        let isotope: Isotope = self.isotope.parse()?;

        let mut material = Material::new(&self.material);
        if let Some(family) = &self.family {
            material = material.with_family(family);
        }

        let mut record = PropertyRecord::new(
            kind,
            material,
            isotope,
            &self.author,
            self.year,
            self.pre_exp,
            self.act_energy,
        );

        if let Some([low, high]) = self.range {
            if !(low < high) {
                return Err(HtmError::InvalidField {
                    field: "range",
                    reason: format!("{}-{} (low must be below high)", low, high),
                });
            }
            record.range = Some(TemperatureRange::new(low, high));
        }

        record.data = match (self.data_t, self.data_y) {
            (Some(t), Some(y)) => Some(RawData::new(t, y)?),
            (None, None) => None,
            (t, _) => {
                let given = if t.is_some() { "data_T" } else { "data_y" };
                return Err(HtmError::InvalidField {
                    field: "data",
                    reason: format!("only {} given (data_T and data_y go together)", given),
                });
            }
        };

        if let Some(units) = self.units.filter(|u| !u.trim().is_empty()) {
            record.units = units;
        }
        record.source = self.source.filter(|s| !s.trim().is_empty());
        record.doi = self.doi.filter(|d| !d.trim().is_empty());
        record.nb_citations = self.nb_citations.unwrap_or(0);

        Ok(record)
    }
}

/// 从字符串解析 JSON 数据库
pub fn parse_json_str(
    content: &str,
    origin: &str,
    default_kind: Option<PropertyKind>,
) -> Result<Vec<PropertyRecord>> {
    let file: DatabaseFile = serde_json::from_str(content).map_err(|e| HtmError::ParseError {
        format: "JSON".to_string(),
        path: origin.to_string(),
        reason: e.to_string(),
    })?;

    let entries = match file {
        DatabaseFile::Wrapped { properties } => properties,
        DatabaseFile::Bare(entries) => entries,
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .into_record(default_kind)
                .map_err(|e| HtmError::ParseError {
                    format: "JSON".to_string(),
                    path: origin.to_string(),
                    reason: format!("entry {}: {}", i + 1, e),
                })
        })
        .collect()
}

/// 解析 JSON 数据库文件
pub fn parse_json_file(path: &Path) -> Result<Vec<PropertyRecord>> {
    let content = fs::read_to_string(path).map_err(|e| HtmError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_json_str(&content, &path.display().to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "properties": [
            {
                "property": "diffusivity",
                "material": "Tungsten",
                "family": "metal",
                "isotope": "h",
                "author": "Frauenfelder",
                "year": 1969,
                "pre_exp": 4.1e-7,
                "act_energy": 0.39,
                "range": [1100, 2400],
                "doi": "10.1116/1.1492866",
                "nb_citations": 600
            },
            {
                "property": "solubility",
                "material": "copper",
                "isotope": "D",
                "author": "thomas",
                "year": 1955,
                "pre_exp": 1.0e24,
                "act_energy": 0.4,
                "data_T": [500, 700, 900],
                "data_y": [1.0, 2.0, 3.0]
            }
        ]
    }"#;

    #[test]
    fn test_parse_wrapped_database() {
        let records = parse_json_str(SAMPLE, "sample", None).unwrap();
        assert_eq!(records.len(), 2);

        let w = &records[0];
        assert_eq!(w.kind, PropertyKind::Diffusivity);
        assert_eq!(w.material.name, "tungsten");
        assert_eq!(w.material.family.as_deref(), Some("metal"));
        assert_eq!(w.author, "frauenfelder");
        assert_eq!(w.range, Some(TemperatureRange::new(1100.0, 2400.0)));
        assert_eq!(w.nb_citations, 600);
        assert_eq!(w.units, "m2/s");

        let cu = &records[1];
        assert_eq!(cu.isotope, Isotope::D);
        assert_eq!(cu.domain(), TemperatureRange::new(500.0, 900.0));
        assert_eq!(cu.units, PropertyKind::Solubility.default_units());
    }

    #[test]
    fn test_parse_bare_array_with_default_kind() {
        let content = r#"[{"material": "w", "isotope": "T", "author": "a", "year": 2000,
                           "pre_exp": 1.0, "act_energy": 0.1}]"#;
        let records = parse_json_str(content, "bare", Some(PropertyKind::Permeability)).unwrap();
        assert_eq!(records[0].kind, PropertyKind::Permeability);

        let err = parse_json_str(content, "bare", None).unwrap_err();
        assert!(err.to_string().contains("property"));
    }

    #[test]
    fn test_parse_rejects_inverted_range() {
        let content = r#"[{"property": "diffusivity", "material": "w", "isotope": "H",
                           "author": "a", "year": 2000, "pre_exp": 1.0, "act_energy": 0.1,
                           "range": [900, 300]}]"#;
        assert!(parse_json_str(content, "bad", None).is_err());
    }

    fn entry_with_data(data: &str) -> String {
        format!(
            r#"[{{"property": "diffusivity", "material": "w", "isotope": "H",
                 "author": "a", "year": 2000, "pre_exp": 1.0, "act_energy": 0.1{}}}]"#,
            data
        )
    }

    #[test]
    fn test_parse_rejects_mismatched_data_lengths() {
        let content = entry_with_data(r#", "data_T": [500, 600, 700], "data_y": [1, 2]"#);
        let err = parse_json_str(&content, "bad", None).unwrap_err();
        assert!(err.to_string().contains("data"));
    }

    #[test]
    fn test_parse_rejects_half_data() {
        let only_t = entry_with_data(r#", "data_T": [500, 600]"#);
        assert!(parse_json_str(&only_t, "bad", None).is_err());

        let only_y = entry_with_data(r#", "data_y": [1, 2]"#);
        assert!(parse_json_str(&only_y, "bad", None).is_err());
    }

    #[test]
    fn test_parse_rejects_zero_temperature() {
        let content = entry_with_data(r#", "data_T": [0, 600], "data_y": [1, 2]"#);
        assert!(parse_json_str(&content, "bad", None).is_err());

        let ok = entry_with_data(r#", "data_T": [500, 600], "data_y": [1, 2]"#);
        let records = parse_json_str(&ok, "ok", None).unwrap();
        assert_eq!(records[0].domain(), TemperatureRange::new(500.0, 600.0));
    }
}
