//! # 属性类型描述
//!
//! 五类氢输运属性（扩散系数、溶解度、渗透率、复合系数、解离系数）
//! 共用一条流水线，差异只在单位、标签和脚本中的数据库名称。
//!
//! ## 依赖关系
//! - 被 `models/property.rs`, `analysis/`, `export/`, `cli/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::HtmError;

/// 属性类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Diffusivity,
    Solubility,
    Permeability,
    RecombinationCoeff,
    DissociationCoeff,
}

impl PropertyKind {
    /// 全部类型，顺序即输出顺序
    pub const ALL: [PropertyKind; 5] = [
        PropertyKind::Diffusivity,
        PropertyKind::Solubility,
        PropertyKind::Permeability,
        PropertyKind::RecombinationCoeff,
        PropertyKind::DissociationCoeff,
    ];

    /// 标识名（JSON / CSV 中使用）
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Diffusivity => "diffusivity",
            PropertyKind::Solubility => "solubility",
            PropertyKind::Permeability => "permeability",
            PropertyKind::RecombinationCoeff => "recombination_coeff",
            PropertyKind::DissociationCoeff => "dissociation_coeff",
        }
    }

    /// 人类可读名称
    pub fn title(&self) -> &'static str {
        match self {
            PropertyKind::Diffusivity => "Diffusivity",
            PropertyKind::Solubility => "Solubility",
            PropertyKind::Permeability => "Permeability",
            PropertyKind::RecombinationCoeff => "Recombination coefficient",
            PropertyKind::DissociationCoeff => "Dissociation coefficient",
        }
    }

    /// 物理量符号
    pub fn symbol(&self) -> &'static str {
        match self {
            PropertyKind::Diffusivity => "D",
            PropertyKind::Solubility => "S",
            PropertyKind::Permeability => "P",
            PropertyKind::RecombinationCoeff => "Kr",
            PropertyKind::DissociationCoeff => "Kd",
        }
    }

    /// 指前因子标签，例如 `D_0`
    pub fn pre_exp_label(&self) -> String {
        format!("{}_0", self.symbol())
    }

    /// 激活能标签，例如 `E_D`
    pub fn act_energy_label(&self) -> String {
        format!("E_{}", self.symbol())
    }

    /// 默认单位
    pub fn default_units(&self) -> &'static str {
        match self {
            PropertyKind::Diffusivity => "m2/s",
            PropertyKind::Solubility => "m-3 Pa-1/2",
            PropertyKind::Permeability => "m-1 s-1 Pa-1/2",
            PropertyKind::RecombinationCoeff => "m4/s",
            PropertyKind::DissociationCoeff => "m-2 s-1 Pa-1",
        }
    }

    /// 生成脚本中对应的数据库表达式
    pub fn database_expr(&self) -> &'static str {
        match self {
            PropertyKind::Diffusivity => "htm.diffusivities",
            PropertyKind::Solubility => "htm.solubilities",
            PropertyKind::Permeability => "htm.permeabilities",
            PropertyKind::RecombinationCoeff => "htm.recombination_coeffs",
            PropertyKind::DissociationCoeff => "htm.dissociation_coeffs",
        }
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PropertyKind {
    type Err = HtmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "diffusivity" | "diffusivities" => Ok(PropertyKind::Diffusivity),
            "solubility" | "solubilities" => Ok(PropertyKind::Solubility),
            "permeability" | "permeabilities" => Ok(PropertyKind::Permeability),
            "recombination_coeff" | "recombination" => Ok(PropertyKind::RecombinationCoeff),
            "dissociation_coeff" | "dissociation" => Ok(PropertyKind::DissociationCoeff),
            _ => Err(HtmError::InvalidArgument(format!(
                "Unknown property type '{}'",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_aliases() {
        assert_eq!(
            "Recombination-Coeff".parse::<PropertyKind>().unwrap(),
            PropertyKind::RecombinationCoeff
        );
        assert_eq!(
            "solubilities".parse::<PropertyKind>().unwrap(),
            PropertyKind::Solubility
        );
        assert!("viscosity".parse::<PropertyKind>().is_err());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(PropertyKind::Diffusivity.pre_exp_label(), "D_0");
        assert_eq!(PropertyKind::RecombinationCoeff.act_energy_label(), "E_Kr");
        for kind in PropertyKind::ALL {
            assert_eq!(kind.name().parse::<PropertyKind>().unwrap(), kind);
        }
    }
}
