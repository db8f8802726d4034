//! # Arrhenius 曲线计算
//!
//! 在温度区间上采样 `value(T) = pre_exp · exp(−E / (k_B·T))`，
//! 输出以 1/T 为横轴的点列；并计算属性组的平均属性。
//!
//! ## 平均方法
//! - `LogAverage`: ln(指前因子) 的算术平均 + 激活能的算术平均
//! - `Fit`: 对各记录的采样点（或原始数据点）做 ln(value) 对 1/T 的最小二乘拟合
//!
//! ## 依赖关系
//! - 被 `dashboard/session.rs`, `export/plot.rs`, `commands/plot.rs` 使用
//! - 使用 `models/`

use crate::error::{HtmError, Result};
use crate::models::{
    PropertiesGroup, PropertyKind, PropertyRecord, TemperatureRange, BOLTZMANN_EV, DEFAULT_RANGE,
};

use serde::{Deserialize, Serialize};

/// 绘图采样点数
pub const CURVE_POINTS: usize = 500;

/// 拟合平均时每条记录的采样点数
pub const FIT_SAMPLES_PER_RECORD: usize = 5;

/// 曲线上的一点
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// 1/T (K⁻¹)
    pub inverse_temperature: f64,
    /// T (K)
    pub temperature: f64,
    pub value: f64,
}

/// 一条 Arrhenius 曲线
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrheniusCurve {
    /// 图例标签
    pub label: String,
    pub points: Vec<CurvePoint>,
}

/// 在区间上采样 Arrhenius 曲线
pub fn sample_arrhenius(
    pre_exp: f64,
    act_energy: f64,
    range: TemperatureRange,
    n: usize,
) -> Vec<CurvePoint> {
    range
        .linspace(n)
        .into_iter()
        .map(|t| CurvePoint {
            inverse_temperature: 1.0 / t,
            temperature: t,
            value: pre_exp * (-act_energy / (BOLTZMANN_EV * t)).exp(),
        })
        .collect()
}

/// 单条记录的曲线
pub fn record_curve(record: &PropertyRecord, n: usize) -> ArrheniusCurve {
    ArrheniusCurve {
        label: record.label(),
        points: sample_arrhenius(record.pre_exp, record.act_energy, record.domain(), n),
    }
}

/// 属性组中每条记录的曲线
pub fn group_curves(group: &PropertiesGroup, n: usize) -> Vec<ArrheniusCurve> {
    group.iter().map(|r| record_curve(r, n)).collect()
}

/// 平均方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanMethod {
    #[default]
    LogAverage,
    Fit,
}

/// 平均属性
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanProperty {
    pub kind: PropertyKind,
    pub pre_exp: f64,
    pub act_energy: f64,
    pub units: String,
    /// 参与平均的记录数
    pub count: usize,
}

impl MeanProperty {
    pub fn value(&self, temperature: f64) -> f64 {
        self.pre_exp * (-self.act_energy / (BOLTZMANN_EV * temperature)).exp()
    }

    /// 300–1200 K 上的平均曲线
    pub fn curve(&self, n: usize) -> ArrheniusCurve {
        ArrheniusCurve {
            label: "Mean value".to_string(),
            points: sample_arrhenius(self.pre_exp, self.act_energy, DEFAULT_RANGE, n),
        }
    }
}

/// 计算属性组的平均属性
pub fn mean_property(group: &PropertiesGroup, method: MeanMethod) -> Result<MeanProperty> {
    let first = group.records.first().ok_or_else(|| HtmError::EmptyGroup {
        kind: group.kind.to_string(),
    })?;

    let (pre_exp, act_energy) = match method {
        MeanMethod::LogAverage => log_average(group),
        MeanMethod::Fit => fit_average(group),
    };

    if !pre_exp.is_finite() || !act_energy.is_finite() {
        return Err(HtmError::NonFiniteMean {
            kind: group.kind.to_string(),
            pre_exp,
            act_energy,
        });
    }

    Ok(MeanProperty {
        kind: group.kind,
        pre_exp,
        act_energy,
        units: first.units.clone(),
        count: group.len(),
    })
}

fn log_average(group: &PropertiesGroup) -> (f64, f64) {
    let n = group.len() as f64;
    if group.iter().any(|r| r.pre_exp <= 0.0) {
        return (f64::NAN, f64::NAN);
    }
    let mean_ln = group.iter().map(|r| r.pre_exp.ln()).sum::<f64>() / n;
    let mean_e = group.iter().map(|r| r.act_energy).sum::<f64>() / n;
    (mean_ln.exp(), mean_e)
}

fn fit_average(group: &PropertiesGroup) -> (f64, f64) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();

    for record in group {
        match &record.data {
            Some(data) => {
                for (t, y) in data.temperatures.iter().zip(&data.values) {
                    xs.push(1.0 / t);
                    ys.push(*y);
                }
            }
            None => {
                for t in record.domain().linspace(FIT_SAMPLES_PER_RECORD) {
                    xs.push(1.0 / t);
                    ys.push(record.value(t));
                }
            }
        }
    }

    // ln(y) = ln(pre_exp) − E/k_B · (1/T)
    let pairs: Vec<(f64, f64)> = xs
        .into_iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && *y > 0.0 && y.is_finite())
        .map(|(x, y)| (x, y.ln()))
        .collect();

    match linear_fit(&pairs) {
        Some((slope, intercept)) => (intercept.exp(), -slope * BOLTZMANN_EV),
        None => (f64::NAN, f64::NAN),
    }
}

/// 最小二乘直线拟合，返回 (斜率, 截距)
fn linear_fit(pairs: &[(f64, f64)]) -> Option<(f64, f64)> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let sxx: f64 = pairs.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    if sxx <= 0.0 {
        return None;
    }
    let sxy: f64 = pairs
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}
