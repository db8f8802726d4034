//! # 图表生成
//!
//! 使用 `plotters` 渲染仪表板的四类图：
//! - Arrhenius 曲线（x = 1/T，y 为对数轴），可叠加平均曲线和原始数据点
//! - 年份直方图（选中年份的分箱着色，其余灰色）
//! - 引用数水平条形图
//! - 材料 / 同位素 / 作者饼图
//!
//! 根据输出文件扩展名选择 PNG 或 SVG 后端。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs`, `commands/citations.rs`, `commands/years.rs`,
//!   `commands/breakdown.rs`, `commands/report.rs` 调用
//! - 使用 `analysis/` 的曲线、统计和颜色分配
//! - 使用 `plotters` 渲染图表

use crate::analysis::colour::{ColourBy, ColourMap};
use crate::analysis::curve::{group_curves, ArrheniusCurve, MeanProperty, CURVE_POINTS};
use crate::analysis::stats::{share, CitationEntry, Slice, YearBin};
use crate::error::{HtmError, Result};
use crate::models::{PropertiesGroup, DEFAULT_RANGE};

use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;

/// 默认图像尺寸
pub const DEFAULT_SIZE: (u32, u32) = (1000, 700);

const GREY: RGBColor = RGBColor(0xB0, 0xB0, 0xB0);

fn plot_err<E: std::fmt::Debug>(e: E) -> HtmError {
    HtmError::PlotError(format!("{:?}", e))
}

/// 输出路径是否为 SVG；只接受 `.png` 和 `.svg`
pub fn is_svg(output_path: &Path) -> Result<bool> {
    let ext = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "svg" => Ok(true),
        "png" => Ok(false),
        other => Err(HtmError::UnsupportedFormat(format!(
            "Plot output must be .png or .svg, got '.{}'",
            other
        ))),
    }
}

/// 可在任意后端上绘制的图
trait Chart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static;
}

fn render<C: Chart>(chart: &C, output_path: &Path, size: (u32, u32)) -> Result<()> {
    if is_svg(output_path)? {
        let root = SVGBackend::new(output_path, size).into_drawing_area();
        chart.draw(&root)?;
        root.present().map_err(plot_err)?;
    } else {
        let root = BitMapBackend::new(output_path, size).into_drawing_area();
        chart.draw(&root)?;
        root.present().map_err(plot_err)?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────
// Arrhenius 曲线
// ─────────────────────────────────────────────────────────────

/// 所有曲线的 1/T 范围；无曲线时使用默认温度区间
pub fn inverse_temperature_bounds(curves: &[ArrheniusCurve]) -> (f64, f64) {
    let xs = curves
        .iter()
        .flat_map(|c| c.points.iter().map(|p| p.inverse_temperature));
    let (min, max) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    });
    if min.is_finite() && max.is_finite() && min < max {
        (min, max)
    } else {
        (1.0 / DEFAULT_RANGE.high, 1.0 / DEFAULT_RANGE.low)
    }
}

/// 正值的对数轴范围（上下各留半个数量级的余量）
pub fn log_value_bounds(curves: &[ArrheniusCurve]) -> (f64, f64) {
    let ys = curves
        .iter()
        .flat_map(|c| c.points.iter().map(|p| p.value))
        .filter(|v| v.is_finite() && *v > 0.0);
    let (min, max) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    if !min.is_finite() || !max.is_finite() {
        return (1e-10, 1.0);
    }
    let pad = 10f64.powf(0.5);
    if min == max {
        (min / 10.0, max * 10.0)
    } else {
        (min / pad, max * pad)
    }
}

struct ArrheniusChart<'a> {
    group: &'a PropertiesGroup,
    mean: Option<&'a MeanProperty>,
    colour_by: ColourBy,
}

impl Chart for ArrheniusChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(plot_err)?;

        let curves = group_curves(self.group, CURVE_POINTS);
        let mean_curve = self.mean.map(|m| m.curve(CURVE_POINTS));

        let mut all_curves = curves.clone();
        all_curves.extend(mean_curve.iter().cloned());
        let (x_min, x_max) = inverse_temperature_bounds(&all_curves);
        let (y_min, y_max) = log_value_bounds(&all_curves);

        let mut chart = ChartBuilder::on(root)
            .caption(self.group.kind.title(), ("sans-serif", 28).into_font())
            .margin(30)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())
            .map_err(plot_err)?;

        let y_desc = self.group.axis_label();
        chart
            .configure_mesh()
            .x_desc("1/T (K⁻¹)")
            .y_desc(y_desc.as_str())
            .x_label_formatter(&|x: &f64| format!("{:.1e}", x))
            .y_label_formatter(&|y: &f64| format!("{:.0e}", y))
            .x_label_style(("sans-serif", 16))
            .y_label_style(("sans-serif", 16))
            .axis_desc_style(("sans-serif", 18))
            .draw()
            .map_err(plot_err)?;

        let colours = ColourMap::new(self.group, self.colour_by);

        for (i, (record, curve)) in self.group.iter().zip(&curves).enumerate() {
            let (r, g, b) = colours.colour_of(record, i);
            let colour = RGBColor(r, g, b);

            chart
                .draw_series(LineSeries::new(
                    curve
                        .points
                        .iter()
                        .filter(|p| p.value > 0.0)
                        .map(|p| (p.inverse_temperature, p.value)),
                    colour.stroke_width(2),
                ))
                .map_err(plot_err)?
                .label(curve.label.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(2))
                });

            // 有原始数据时叠加散点
            if let Some(data) = &record.data {
                chart
                    .draw_series(
                        data.temperatures
                            .iter()
                            .zip(&data.values)
                            .filter(|(t, v)| **t > 0.0 && **v > 0.0)
                            .map(|(t, v)| Circle::new((1.0 / t, *v), 4, colour.filled())),
                    )
                    .map_err(plot_err)?;
            }
        }

        if let Some(mean) = &mean_curve {
            chart
                .draw_series(LineSeries::new(
                    mean.points
                        .iter()
                        .filter(|p| p.value > 0.0)
                        .map(|p| (p.inverse_temperature, p.value)),
                    BLACK.stroke_width(5),
                ))
                .map_err(plot_err)?
                .label(mean.label.clone())
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(5)));
        }

        if !curves.is_empty() || mean_curve.is_some() {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", 13))
                .draw()
                .map_err(plot_err)?;
        }

        Ok(())
    }
}

/// 绘制 Arrhenius 曲线图
pub fn plot_arrhenius(
    group: &PropertiesGroup,
    mean: Option<&MeanProperty>,
    colour_by: ColourBy,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let chart = ArrheniusChart {
        group,
        mean,
        colour_by,
    };
    render(&chart, output_path, size)
}

// ─────────────────────────────────────────────────────────────
// 年份直方图
// ─────────────────────────────────────────────────────────────

struct YearChart<'a> {
    bins: &'a [YearBin],
    title: String,
}

impl Chart for YearChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(plot_err)?;

        let x_min = self.bins.first().map(|b| b.start as f64).unwrap_or(0.0);
        let x_max = self.bins.last().map(|b| b.end as f64).unwrap_or(1.0);
        let y_max = self.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64 * 1.1;

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", 28).into_font())
            .margin(30)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)
            .map_err(plot_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Year")
            .y_desc("Number of properties")
            .x_label_formatter(&|x: &f64| format!("{:.0}", x))
            .y_label_formatter(&|y: &f64| format!("{:.0}", y))
            .x_label_style(("sans-serif", 16))
            .y_label_style(("sans-serif", 16))
            .axis_desc_style(("sans-serif", 18))
            .draw()
            .map_err(plot_err)?;

        let highlight = RGBColor(0x63, 0x6E, 0xFA);
        chart
            .draw_series(self.bins.iter().map(|bin| {
                let colour = if bin.selected { highlight } else { GREY };
                Rectangle::new(
                    [(bin.start as f64, 0.0), (bin.end as f64, bin.count as f64)],
                    colour.filled(),
                )
            }))
            .map_err(plot_err)?;

        Ok(())
    }
}

/// 绘制年份直方图
pub fn plot_year_histogram(
    bins: &[YearBin],
    group: &PropertiesGroup,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let chart = YearChart {
        bins,
        title: format!("{} by year", group.kind.title()),
    };
    render(&chart, output_path, size)
}

// ─────────────────────────────────────────────────────────────
// 引用数条形图
// ─────────────────────────────────────────────────────────────

struct CitationChart<'a> {
    entries: &'a [CitationEntry],
    per_year: bool,
}

impl Chart for CitationChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(plot_err)?;

        let n = self.entries.len().max(1);
        let x_max = self
            .entries
            .iter()
            .map(|e| e.citations)
            .fold(0.0, f64::max)
            .max(1.0)
            * 1.1;

        let x_desc = if self.per_year {
            "Citations per year"
        } else {
            "Citations"
        };

        let mut chart = ChartBuilder::on(root)
            .caption("Citations", ("sans-serif", 28).into_font())
            .margin(30)
            .x_label_area_size(50)
            .y_label_area_size(180)
            .build_cartesian_2d(0.0..x_max, -0.5..(n as f64 - 0.5))
            .map_err(plot_err)?;

        let labels: Vec<&str> = self.entries.iter().map(|e| e.label.as_str()).collect();
        let label_of = |y: &f64| {
            let i = y.round();
            if (y - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).map(|l| l.to_string()).unwrap_or_default()
        };

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&label_of)
            .x_desc(x_desc)
            .x_label_style(("sans-serif", 16))
            .y_label_style(("sans-serif", 14))
            .axis_desc_style(("sans-serif", 18))
            .draw()
            .map_err(plot_err)?;

        let bar = RGBColor(0x63, 0x6E, 0xFA);
        chart
            .draw_series(self.entries.iter().enumerate().map(|(i, e)| {
                let y = i as f64;
                Rectangle::new([(0.0, y - 0.4), (e.citations, y + 0.4)], bar.filled())
            }))
            .map_err(plot_err)?;

        Ok(())
    }
}

/// 绘制引用数水平条形图（数值最大的在最上方）
pub fn plot_citations(
    entries: &[CitationEntry],
    per_year: bool,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let chart = CitationChart { entries, per_year };
    render(&chart, output_path, size)
}

// ─────────────────────────────────────────────────────────────
// 饼图
// ─────────────────────────────────────────────────────────────

struct PieChart<'a> {
    title: &'a str,
    slices: &'a [Slice],
}

impl Chart for PieChart<'_> {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE).map_err(plot_err)?;
        let area = root
            .titled(self.title, ("sans-serif", 28).into_font())
            .map_err(plot_err)?;

        let (w, h) = area.dim_in_pixel();
        let centre = (w as i32 / 2, h as i32 / 2);

        // 空组没有可分配的扇区
        let visible: Vec<&Slice> = self.slices.iter().filter(|s| s.count > 0).collect();
        if visible.is_empty() {
            area.draw(&Text::new(
                "No data",
                centre,
                ("sans-serif", 20).into_font().color(&BLACK),
            ))
            .map_err(plot_err)?;
            return Ok(());
        }

        let radius = (w.min(h) as f64) * 0.35;
        let sizes: Vec<f64> = visible.iter().map(|s| s.count as f64).collect();
        let colours: Vec<RGBColor> = visible
            .iter()
            .map(|s| RGBColor(s.colour.0, s.colour.1, s.colour.2))
            .collect();
        let labels: Vec<String> = visible
            .iter()
            .map(|s| format!("{} ({:.0}%)", s.label, share(s, self.slices)))
            .collect();

        let mut pie = Pie::new(&centre, &radius, &sizes, &colours, &labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
        area.draw(&pie).map_err(plot_err)?;

        Ok(())
    }
}

/// 绘制饼图
pub fn plot_pie(title: &str, slices: &[Slice], output_path: &Path, size: (u32, u32)) -> Result<()> {
    let chart = PieChart { title, slices };
    render(&chart, output_path, size)
}
