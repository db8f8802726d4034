//! # 过滤参数 CLI 定义
//!
//! 各查看/导出子命令共用的过滤参数和枚举选项。
//!
//! ## 依赖关系
//! - 被 `cli/view.rs`, `cli/export.rs`, `cli/session.rs` 使用
//! - 由 `commands/mod.rs` 解析为 `FilterSelection`

use crate::analysis::{ColourBy, MeanMethod};
use crate::models::PropertyKind;

use clap::{Args, ValueEnum};

// ─────────────────────────────────────────────────────────────
// 枚举选项
// ─────────────────────────────────────────────────────────────

/// 属性类型
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PropertyArg {
    /// Diffusivity D (m²/s)
    Diffusivity,
    /// Solubility S
    Solubility,
    /// Permeability P
    Permeability,
    /// Recombination coefficient Kr
    RecombinationCoeff,
    /// Dissociation coefficient Kd
    DissociationCoeff,
}

impl From<PropertyArg> for PropertyKind {
    fn from(arg: PropertyArg) -> Self {
        match arg {
            PropertyArg::Diffusivity => PropertyKind::Diffusivity,
            PropertyArg::Solubility => PropertyKind::Solubility,
            PropertyArg::Permeability => PropertyKind::Permeability,
            PropertyArg::RecombinationCoeff => PropertyKind::RecombinationCoeff,
            PropertyArg::DissociationCoeff => PropertyKind::DissociationCoeff,
        }
    }
}

impl std::fmt::Display for PropertyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PropertyKind::from(*self))
    }
}

/// 曲线着色依据
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ColourByArg {
    /// One colour per property
    #[default]
    Property,
    /// Same colour for the same material
    Material,
    /// Same colour for the same author
    Author,
    /// Same colour for the same isotope
    Isotope,
}

impl From<ColourByArg> for ColourBy {
    fn from(arg: ColourByArg) -> Self {
        match arg {
            ColourByArg::Property => ColourBy::Property,
            ColourByArg::Material => ColourBy::Material,
            ColourByArg::Author => ColourBy::Author,
            ColourByArg::Isotope => ColourBy::Isotope,
        }
    }
}

/// 图片格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// 文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// 平均曲线计算方法
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum MeanMethodArg {
    /// Mean of ln(pre-exponential) and of activation energies
    #[default]
    LogAverage,
    /// Least-squares Arrhenius fit through sampled values
    Fit,
}

impl From<MeanMethodArg> for MeanMethod {
    fn from(arg: MeanMethodArg) -> Self {
        match arg {
            MeanMethodArg::LogAverage => MeanMethod::LogAverage,
            MeanMethodArg::Fit => MeanMethod::Fit,
        }
    }
}

impl std::fmt::Display for MeanMethodArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeanMethodArg::LogAverage => write!(f, "log-average"),
            MeanMethodArg::Fit => write!(f, "fit"),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// 过滤参数
// ─────────────────────────────────────────────────────────────

/// 过滤参数（未给出的维度使用仪表板初始值）
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Property type
    #[arg(short, long, value_enum, default_value_t = PropertyArg::Diffusivity)]
    pub property: PropertyArg,

    /// Materials to include, comma separated (default: tungsten)
    #[arg(short, long, value_delimiter = ',')]
    pub material: Vec<String>,

    /// Include every material in the database
    #[arg(long, default_value_t = false, conflicts_with = "material")]
    pub all_materials: bool,

    /// Isotopes to include, comma separated (default: H,D,T)
    #[arg(short, long, value_delimiter = ',')]
    pub isotope: Vec<String>,

    /// Authors to include, comma separated, case-insensitive
    /// (default: authors of the selected materials)
    #[arg(short, long, value_delimiter = ',')]
    pub author: Vec<String>,

    /// Include every author of the property type
    #[arg(long, default_value_t = false, conflicts_with = "author")]
    pub all_authors: bool,

    /// Inclusive year range, e.g. "1960-2010" (default: full span)
    #[arg(short, long)]
    pub years: Option<String>,
}

impl FilterArgs {
    pub fn kind(&self) -> PropertyKind {
        self.property.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_format_extension() {
        assert_eq!(ImageFormat::default().to_string(), "png");
        assert_eq!(ImageFormat::Svg.extension(), "svg");
        assert_eq!(ImageFormat::from_str("svg", true).unwrap(), ImageFormat::Svg);
        assert!(ImageFormat::from_str("pdf", true).is_err());
    }
}
