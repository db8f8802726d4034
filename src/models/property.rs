//! # 属性记录数据模型
//!
//! 一条 Arrhenius 型属性记录：`value(T) = pre_exp · exp(−act_energy / (k_B·T))`。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `database/`, `analysis/`, `export/` 使用
//! - 使用 `models/kind.rs`

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::kind::PropertyKind;
use crate::error::HtmError;

/// 玻尔兹曼常数 (eV/K)
pub const BOLTZMANN_EV: f64 = 8.617_333_262e-5;

/// 未给出温度范围时的默认范围 (K)
pub const DEFAULT_RANGE: TemperatureRange = TemperatureRange {
    low: 300.0,
    high: 1200.0,
};

/// 氢同位素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Isotope {
    #[serde(alias = "h")]
    H,
    #[serde(alias = "d")]
    D,
    #[serde(alias = "t")]
    T,
}

impl Isotope {
    /// 固定的全部同位素（饼图类别顺序）
    pub const ALL: [Isotope; 3] = [Isotope::H, Isotope::D, Isotope::T];

    pub fn symbol(&self) -> &'static str {
        match self {
            Isotope::H => "H",
            Isotope::D => "D",
            Isotope::T => "T",
        }
    }
}

impl std::fmt::Display for Isotope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 大小写不敏感
impl FromStr for Isotope {
    type Err = HtmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "h" | "hydrogen" | "protium" => Ok(Isotope::H),
            "d" | "deuterium" => Ok(Isotope::D),
            "t" | "tritium" => Ok(Isotope::T),
            _ => Err(HtmError::InvalidArgument(format!(
                "Unknown isotope '{}' (expected H, D or T)",
                s
            ))),
        }
    }
}

/// 材料（可带上级族类，例如 tungsten -> metal）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Material {
    /// 材料名，导入时统一小写
    pub name: String,
    /// 上级族类
    pub family: Option<String>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Material {
            name: name.into().trim().to_lowercase(),
            family: None,
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        let family = family.into().trim().to_lowercase();
        self.family = if family.is_empty() { None } else { Some(family) };
        self
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// 温度范围 (K)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub low: f64,
    pub high: f64,
}

impl TemperatureRange {
    pub fn new(low: f64, high: f64) -> Self {
        TemperatureRange { low, high }
    }

    /// 等间距采样 `n` 个温度点（含端点）
    pub fn linspace(&self, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![self.low],
            _ => {
                let step = (self.high - self.low) / (n - 1) as f64;
                (0..n).map(|i| self.low + i as f64 * step).collect()
            }
        }
    }
}

/// 原始实验数据点
#[derive(Debug, Clone, PartialEq)]
pub struct RawData {
    /// 温度 (K)
    pub temperatures: Vec<f64>,
    /// 对应测量值
    pub values: Vec<f64>,
}

impl RawData {
    /// 温度与数值长度必须一致且非空，温度必须为正
    pub fn new(temperatures: Vec<f64>, values: Vec<f64>) -> Result<Self, HtmError> {
        if temperatures.is_empty() || temperatures.len() != values.len() {
            return Err(HtmError::InvalidField {
                field: "data",
                reason: format!(
                    "{} temperatures and {} values (need equal, non-zero lengths)",
                    temperatures.len(),
                    values.len()
                ),
            });
        }
        if let Some(t) = temperatures.iter().find(|t| !(t.is_finite() && **t > 0.0)) {
            return Err(HtmError::InvalidField {
                field: "data",
                reason: format!("temperature {} K is not positive", t),
            });
        }
        Ok(RawData {
            temperatures,
            values,
        })
    }

    /// 数据点覆盖的温度范围
    pub fn span(&self) -> TemperatureRange {
        let low = self
            .temperatures
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let high = self
            .temperatures
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        TemperatureRange { low, high }
    }
}

/// 一条属性记录
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
    pub kind: PropertyKind,
    pub material: Material,
    pub isotope: Isotope,
    /// 作者（小写，去重键）
    pub author: String,
    pub year: i32,
    /// 指前因子，单位见 `units`
    pub pre_exp: f64,
    /// 激活能 (eV)
    pub act_energy: f64,
    /// 显式有效温度范围
    pub range: Option<TemperatureRange>,
    /// 原始测量点
    pub data: Option<RawData>,
    pub units: String,
    /// 文献来源（引用文本）
    pub source: Option<String>,
    pub doi: Option<String>,
    pub nb_citations: u32,
}

impl PropertyRecord {
    /// 以类型默认单位创建记录
    pub fn new(
        kind: PropertyKind,
        material: Material,
        isotope: Isotope,
        author: &str,
        year: i32,
        pre_exp: f64,
        act_energy: f64,
    ) -> Self {
        PropertyRecord {
            kind,
            material,
            isotope,
            author: author.trim().to_lowercase(),
            year,
            pre_exp,
            act_energy,
            range: None,
            data: None,
            units: kind.default_units().to_string(),
            source: None,
            doi: None,
            nb_citations: 0,
        }
    }

    pub fn with_range(mut self, low: f64, high: f64) -> Self {
        self.range = Some(TemperatureRange::new(low, high));
        self
    }

    pub fn with_data(mut self, data: RawData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    pub fn with_citations(mut self, nb_citations: u32) -> Self {
        self.nb_citations = nb_citations;
        self
    }

    /// 给定温度 (K) 下的属性值
    pub fn value(&self, temperature: f64) -> f64 {
        self.pre_exp * (-self.act_energy / (BOLTZMANN_EV * temperature)).exp()
    }

    /// 绘图用温度区间：显式范围 > 原始数据范围 > 默认 300–1200 K
    pub fn domain(&self) -> TemperatureRange {
        if let Some(range) = self.range {
            return range;
        }
        match &self.data {
            Some(data) => data.span(),
            None => DEFAULT_RANGE,
        }
    }

    /// 首字母大写的作者名
    pub fn author_display(&self) -> String {
        capitalize(&self.author)
    }

    /// 图例/引用标签，例如 `Frauenfelder (1969)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.author_display(), self.year)
    }
}

/// 首字母大写，其余小写
pub fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
