//! # 数据表行
//!
//! 将属性组格式化为表格行（终端表格和会话视图共用）。
//!
//! ## 依赖关系
//! - 被 `commands/table.rs`, `dashboard/session.rs` 使用
//! - 使用 `tabled` 派生表格显示

use crate::models::{PropertiesGroup, PropertyRecord};

use serde::Serialize;
use tabled::Tabled;

/// 表格中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct TableRow {
    #[tabled(rename = "Material")]
    pub material: String,
    #[tabled(rename = "Pre-exp.")]
    pub pre_exp: String,
    #[tabled(rename = "Act. energy (eV)")]
    pub act_energy: String,
    #[tabled(rename = "Range (K)")]
    pub range: String,
    #[tabled(rename = "Author")]
    pub author: String,
    #[tabled(rename = "Year")]
    pub year: i32,
    #[tabled(rename = "Isotope")]
    pub isotope: String,
    #[tabled(rename = "Reference")]
    pub doi: String,
}

impl TableRow {
    pub fn from_record(record: &PropertyRecord) -> Self {
        let range = match record.range {
            Some(r) => format!("{:.0}-{:.0}", r.low, r.high),
            None => "none".to_string(),
        };

        let material = match &record.material.family {
            Some(family) => format!("{} ({})", record.material.name, family),
            None => record.material.name.clone(),
        };

        // 有 DOI 时给出可点击链接，否则显示来源文本
        let doi = match (&record.doi, &record.source) {
            (Some(doi), _) => format!("[{}](https://doi.org/{})", doi, doi),
            (None, Some(source)) => source.clone(),
            (None, None) => "none".to_string(),
        };

        TableRow {
            material,
            pre_exp: format!("{:.2e} {}", record.pre_exp, record.units),
            act_energy: format!("{:.2}", record.act_energy),
            range,
            author: record.author_display(),
            year: record.year,
            isotope: record.isotope.to_string(),
            doi,
        }
    }
}

/// 属性组的全部表格行
pub fn table_rows(group: &PropertiesGroup) -> Vec<TableRow> {
    group.iter().map(TableRow::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Isotope, Material, PropertyKind};

    #[test]
    fn test_row_formatting() {
        let record = PropertyRecord::new(
            PropertyKind::Diffusivity,
            Material::new("tungsten").with_family("metal"),
            Isotope::H,
            "frauenfelder",
            1969,
            4.1e-7,
            0.39,
        )
        .with_range(1100.0, 2400.0)
        .with_doi("10.1116/1.1492699");

        let row = TableRow::from_record(&record);
        assert_eq!(row.material, "tungsten (metal)");
        assert_eq!(row.pre_exp, "4.10e-7 m2/s");
        assert_eq!(row.act_energy, "0.39");
        assert_eq!(row.range, "1100-2400");
        assert_eq!(row.author, "Frauenfelder");
        assert_eq!(row.doi, "[10.1116/1.1492699](https://doi.org/10.1116/1.1492699)");
    }

    #[test]
    fn test_row_without_range_or_doi() {
        let mut record = PropertyRecord::new(
            PropertyKind::Solubility,
            Material::new("copper"),
            Isotope::T,
            "reiter",
            1996,
            4.95e23,
            0.39,
        );
        assert_eq!(TableRow::from_record(&record).range, "none");
        assert_eq!(TableRow::from_record(&record).doi, "none");

        record.source = Some("Latvian J. Phys. 3 (1996) 50".to_string());
        assert_eq!(TableRow::from_record(&record).doi, "Latvian J. Phys. 3 (1996) 50");
    }
}
