//! # 新属性表单
//!
//! 用户提交的新属性：校验必填项，补齐默认温度范围，生成记录。
//!
//! ## 规则
//! - 指前因子、激活能、作者、年份、同位素、材料均为必填
//! - 温度范围上下限都缺省时取 300–1200 K；只给一端视为错误
//!
//! ## 依赖关系
//! - 被 `dashboard/session.rs` 和 `commands/add.rs` 使用
//! - 使用 `models/` 数据模型

use serde::Deserialize;

use crate::error::{HtmError, Result};
use crate::models::{Isotope, Material, PropertyKind, PropertyRecord, DEFAULT_RANGE};

/// 新属性表单输入（所有字段均可能未填写）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPropertyForm {
    #[serde(default)]
    pub pre_exp: Option<f64>,
    #[serde(default)]
    pub act_energy: Option<f64>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub isotope: Option<Isotope>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub range_low: Option<f64>,
    #[serde(default)]
    pub range_high: Option<f64>,
    /// 单位，缺省时使用类型默认单位
    #[serde(default)]
    pub units: Option<String>,
}

impl NewPropertyForm {
    /// 校验并生成 `kind` 类型的记录
    pub fn validate(&self, kind: PropertyKind) -> Result<PropertyRecord> {
        let pre_exp = self.pre_exp.ok_or(HtmError::MissingField("pre_exp"))?;
        let act_energy = self.act_energy.ok_or(HtmError::MissingField("act_energy"))?;
        let author = non_blank(&self.author).ok_or(HtmError::MissingField("author"))?;
        let year = self.year.ok_or(HtmError::MissingField("year"))?;
        let isotope = self.isotope.ok_or(HtmError::MissingField("isotope"))?;
        let material = non_blank(&self.material).ok_or(HtmError::MissingField("material"))?;

        if !pre_exp.is_finite() || pre_exp <= 0.0 {
            return Err(HtmError::InvalidField {
                field: "pre_exp",
                reason: format!("{} (must be a positive number)", pre_exp),
            });
        }
        if !act_energy.is_finite() {
            return Err(HtmError::InvalidField {
                field: "act_energy",
                reason: format!("{} is not finite", act_energy),
            });
        }

        let (low, high) = match (self.range_low, self.range_high) {
            (None, None) => (DEFAULT_RANGE.low, DEFAULT_RANGE.high),
            (Some(low), Some(high)) => (low, high),
            _ => {
                return Err(HtmError::InvalidField {
                    field: "range",
                    reason: "give both bounds or neither".to_string(),
                })
            }
        };
        if !(low > 0.0 && low < high) {
            return Err(HtmError::InvalidField {
                field: "range",
                reason: format!("{}-{} K (need 0 < low < high)", low, high),
            });
        }

        let mut record = PropertyRecord::new(
            kind,
            Material::new(material),
            isotope,
            author,
            year,
            pre_exp,
            act_energy,
        )
        .with_range(low, high);

        if let Some(units) = non_blank(&self.units) {
            record.units = units.to_string();
        }

        Ok(record)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemperatureRange;

    fn complete_form() -> NewPropertyForm {
        NewPropertyForm {
            pre_exp: Some(1.5e-7),
            act_energy: Some(0.25),
            author: Some("Smith".to_string()),
            year: Some(2021),
            isotope: Some(Isotope::D),
            material: Some("Tungsten".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_defaults_range() {
        let record = complete_form().validate(PropertyKind::Diffusivity).unwrap();
        assert_eq!(record.range, Some(TemperatureRange::new(300.0, 1200.0)));
        assert_eq!(record.author, "smith");
        assert_eq!(record.material.name, "tungsten");
        assert_eq!(record.isotope, Isotope::D);
        assert_eq!(record.units, "m2/s");
    }

    #[test]
    fn test_validate_missing_fields() {
        let missing_author = NewPropertyForm {
            author: Some("   ".to_string()),
            ..complete_form()
        };
        assert!(matches!(
            missing_author.validate(PropertyKind::Diffusivity),
            Err(HtmError::MissingField("author"))
        ));

        let missing_year = NewPropertyForm {
            year: None,
            ..complete_form()
        };
        assert!(matches!(
            missing_year.validate(PropertyKind::Solubility),
            Err(HtmError::MissingField("year"))
        ));

        assert!(NewPropertyForm::default()
            .validate(PropertyKind::Diffusivity)
            .is_err());
    }

    #[test]
    fn test_validate_range_rules() {
        let half = NewPropertyForm {
            range_low: Some(400.0),
            ..complete_form()
        };
        assert!(half.validate(PropertyKind::Diffusivity).is_err());

        let inverted = NewPropertyForm {
            range_low: Some(900.0),
            range_high: Some(400.0),
            ..complete_form()
        };
        assert!(inverted.validate(PropertyKind::Diffusivity).is_err());

        let explicit = NewPropertyForm {
            range_low: Some(400.0),
            range_high: Some(900.0),
            ..complete_form()
        };
        let record = explicit.validate(PropertyKind::Diffusivity).unwrap();
        assert_eq!(record.range, Some(TemperatureRange::new(400.0, 900.0)));
    }

    #[test]
    fn test_validate_custom_units() {
        let form = NewPropertyForm {
            units: Some("H m-3 Pa-1/2".to_string()),
            ..complete_form()
        };
        let record = form.validate(PropertyKind::Solubility).unwrap();
        assert_eq!(record.units, "H m-3 Pa-1/2");
    }
}
