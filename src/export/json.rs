//! # JSON 导出
//!
//! 将属性组导出为 JSON 数组，数值字段均为纯数值（不带单位）。
//! 导出文件可以被 `parsers/json_db.rs` 重新读取。
//!
//! ## 依赖关系
//! - 被 `dashboard/session.rs`, `commands/export.rs`, `commands/report.rs` 调用
//! - 使用 `serde_json` 序列化

use crate::error::{HtmError, Result};
use crate::models::{PropertiesGroup, PropertyRecord};
use crate::parsers::json_db;

use serde::Serialize;
use std::fs;
use std::path::Path;

/// 导出的一条记录
#[derive(Debug, Serialize)]
struct ExportedRecord<'a> {
    property: &'a str,
    material: &'a str,
    pre_exp: f64,
    act_energy: f64,
    isotope: String,
    author: &'a str,
    year: i32,
    source: Option<&'a str>,
    range: Option<[f64; 2]>,
    doi: Option<&'a str>,
    units: &'a str,
}

impl<'a> From<&'a PropertyRecord> for ExportedRecord<'a> {
    fn from(record: &'a PropertyRecord) -> Self {
        ExportedRecord {
            property: record.kind.name(),
            material: &record.material.name,
            pre_exp: record.pre_exp,
            act_energy: record.act_energy,
            isotope: record.isotope.to_string(),
            author: &record.author,
            year: record.year,
            source: record.source.as_deref(),
            range: record.range.map(|r| [r.low, r.high]),
            doi: record.doi.as_deref(),
            units: &record.units,
        }
    }
}

/// 属性组 -> JSON 文本（两空格缩进）
pub fn to_json_string(group: &PropertiesGroup) -> Result<String> {
    let records: Vec<ExportedRecord> = group.iter().map(ExportedRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// 写出 JSON 文件
pub fn to_json_file(group: &PropertiesGroup, output_path: &Path) -> Result<()> {
    let content = to_json_string(group)?;
    fs::write(output_path, content).map_err(|e| HtmError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })
}

/// 读回导出的 JSON 文本
pub fn read_exported(content: &str, group: &PropertiesGroup) -> Result<PropertiesGroup> {
    let records = json_db::parse_json_str(content, "<export>", Some(group.kind))?;
    Ok(PropertiesGroup::new(group.kind, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Isotope, Material, PropertyKind};

    fn group() -> PropertiesGroup {
        let mut w = PropertyRecord::new(
            PropertyKind::Diffusivity,
            Material::new("tungsten"),
            Isotope::H,
            "frauenfelder",
            1968,
            4.1e-7,
            0.39,
        )
        .with_range(1100.0, 2400.0)
        .with_doi("10.1116/1.1492699");
        w.source = Some("J. Vac. Sci. Technol.".to_string());

        let d = PropertyRecord::new(
            PropertyKind::Diffusivity,
            Material::new("tungsten"),
            Isotope::D,
            "frauenfelder",
            1968,
            2.9e-7,
            0.39,
        );
        let cu = PropertyRecord::new(
            PropertyKind::Diffusivity,
            Material::new("copper"),
            Isotope::H,
            "heinola",
            2010,
            6.6e-7,
            0.39,
        );
        PropertiesGroup::new(PropertyKind::Diffusivity, vec![w, d, cu])
    }

    #[test]
    fn test_export_fields_are_plain_numbers() {
        let json = to_json_string(&group()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value[0];
        assert_eq!(first["material"], "tungsten");
        assert_eq!(first["isotope"], "H");
        assert_eq!(first["units"], "m2/s");
        assert!(first["pre_exp"].is_f64());
        assert_eq!(first["range"][0].as_f64(), Some(1100.0));
        assert_eq!(first["doi"], "10.1116/1.1492699");
        assert!(value[1]["range"].is_null());
        for key in [
            "material", "pre_exp", "act_energy", "isotope", "author", "source", "range", "doi",
            "units",
        ] {
            assert!(first.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_export_then_read_keeps_identity_tuples() {
        let group = group();
        let json = to_json_string(&group).unwrap();
        let back = read_exported(&json, &group).unwrap();

        assert_eq!(back.len(), group.len());
        let key = |r: &PropertyRecord| (r.material.name.clone(), r.author.clone(), r.year, r.isotope);
        let original: Vec<_> = group.iter().map(key).collect();
        let reread: Vec<_> = back.iter().map(key).collect();
        assert_eq!(original, reread);
    }

    #[test]
    fn test_export_empty_group() {
        let empty = PropertiesGroup::empty(PropertyKind::Solubility);
        assert_eq!(to_json_string(&empty).unwrap(), "[]");
    }
}
