//! # 聚合统计
//!
//! 属性组的派生统计：
//! - 按年份分箱的记录数直方图（标记选中年份）
//! - 引用数排名（按 "作者 (年份)" 去重，可按年归一化）
//! - 材料 / 同位素 / 作者的分类计数（饼图）
//!
//! ## 依赖关系
//! - 被 `dashboard/session.rs` 和 `commands/` 调用
//! - 使用 `analysis/colour.rs`, `models/`

use super::colour::{ColourBy, ColourMap};
use crate::error::{HtmError, Result};
use crate::models::{capitalize, Isotope, PropertiesGroup, YearRange};

use serde::Serialize;
use std::cmp::Ordering;

/// 直方图最早年份
pub const FIRST_YEAR: i32 = 1950;

/// 默认分箱宽度（年）
pub const DEFAULT_YEAR_STEP: usize = 5;

// ─────────────────────────────────────────────────────────────
// 年份直方图
// ─────────────────────────────────────────────────────────────

/// 一个年份分箱
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBin {
    pub start: i32,
    /// 右边界；除最后一个分箱外不包含
    pub end: i32,
    pub centre: f64,
    pub count: usize,
    /// 分箱中心是否落在选中年份内
    pub selected: bool,
}

/// 统计每个年份分箱内的记录数
///
/// 分箱覆盖 `[min(1950, 最早年份), max(current_year, 最晚年份)]`，
/// 最后一个分箱始终延伸到该上界且包含右端点。
pub fn year_histogram(
    group: &PropertiesGroup,
    step: usize,
    current_year: i32,
    selected: Option<YearRange>,
) -> Result<Vec<YearBin>> {
    if step == 0 {
        return Err(HtmError::InvalidArgument(
            "Histogram step must be at least one year".to_string(),
        ));
    }

    let first = group.iter().map(|r| r.year).fold(FIRST_YEAR, i32::min);
    let last = group.iter().map(|r| r.year).fold(current_year, i32::max);

    let mut edges: Vec<i32> = (first..last).step_by(step).collect();
    if edges.is_empty() {
        edges.push(first);
    }
    edges.push(last);

    let n_bins = edges.len() - 1;
    let bins = edges
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (start, end) = (pair[0], pair[1]);
            let is_last = i == n_bins - 1;
            let count = group
                .iter()
                .filter(|r| r.year >= start && (r.year < end || (is_last && r.year == end)))
                .count();
            let centre = (start + end) as f64 / 2.0;
            let selected = selected
                .map_or(true, |range| range.min as f64 <= centre && centre <= range.max as f64);
            YearBin {
                start,
                end,
                centre,
                count,
                selected,
            }
        })
        .collect();

    Ok(bins)
}

// ─────────────────────────────────────────────────────────────
// 引用数排名
// ─────────────────────────────────────────────────────────────

/// 一条引用数条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationEntry {
    /// `Author (year)`
    pub label: String,
    pub citations: f64,
    /// DOI，缺失时为 "none"
    pub doi: String,
}

/// 引用数排名，按数值升序（水平条形图自下而上）
///
/// 同一 "作者 (年份)" 只保留数据库顺序中的第一条。
/// `per_year` 时除以发表至今的年数，至少按一年计。
pub fn citation_ranking(
    group: &PropertiesGroup,
    per_year: bool,
    current_year: i32,
) -> Vec<CitationEntry> {
    let mut entries: Vec<CitationEntry> = Vec::new();

    for record in group {
        let label = record.label();
        if entries.iter().any(|e| e.label == label) {
            continue;
        }

        let total = record.nb_citations as f64;
        let citations = if per_year {
            total / current_year.saturating_sub(record.year).max(1) as f64
        } else {
            total
        };

        entries.push(CitationEntry {
            label,
            citations,
            doi: record.doi.clone().unwrap_or_else(|| "none".to_string()),
        });
    }

    entries.sort_by(|a, b| {
        a.citations
            .partial_cmp(&b.citations)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    entries
}

// ─────────────────────────────────────────────────────────────
// 分类计数
// ─────────────────────────────────────────────────────────────

/// 饼图的一块
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub count: usize,
    pub colour: (u8, u8, u8),
}

/// 占比 (%)
pub fn share(slice: &Slice, slices: &[Slice]) -> f64 {
    let total: usize = slices.iter().map(|s| s.count).sum();
    if total == 0 {
        0.0
    } else {
        slice.count as f64 * 100.0 / total as f64
    }
}

/// 材料计数（标签排序；颜色与按材料着色的曲线一致）
pub fn material_breakdown(group: &PropertiesGroup) -> Vec<Slice> {
    let colours = ColourMap::new(group, ColourBy::Material);
    let mut labels: Vec<String> = group.iter().map(|r| r.material.name.clone()).collect();
    labels.sort();
    labels.dedup();

    labels
        .into_iter()
        .map(|label| Slice {
            count: group.iter().filter(|r| r.material.name == label).count(),
            colour: colours.colour_of_key(&label),
            label,
        })
        .collect()
}

/// 同位素计数，类别固定为 H、D、T（颜色与按同位素着色的曲线一致）
pub fn isotope_breakdown(group: &PropertiesGroup) -> Vec<Slice> {
    let colours = ColourMap::new(group, ColourBy::Isotope);
    Isotope::ALL
        .iter()
        .map(|isotope| {
            let label = isotope.to_string();
            Slice {
                count: group.iter().filter(|r| r.isotope == *isotope).count(),
                colour: colours.colour_of_key(&label),
                label,
            }
        })
        .collect()
}

/// 作者计数（标签首字母大写、排序；颜色与按作者着色的曲线一致）
pub fn author_breakdown(group: &PropertiesGroup) -> Vec<Slice> {
    let colours = ColourMap::new(group, ColourBy::Author);
    let mut authors: Vec<String> = group.iter().map(|r| r.author.to_lowercase()).collect();
    authors.sort();
    authors.dedup();

    authors
        .into_iter()
        .map(|author| Slice {
            label: capitalize(&author),
            count: group
                .iter()
                .filter(|r| r.author.to_lowercase() == author)
                .count(),
            colour: colours.colour_of_key(&author),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Material, PropertyKind, PropertyRecord};

    fn record(material: &str, isotope: Isotope, author: &str, year: i32) -> PropertyRecord {
        PropertyRecord::new(
            PropertyKind::Diffusivity,
            Material::new(material),
            isotope,
            author,
            year,
            1.0e-7,
            0.3,
        )
    }

    fn group(records: Vec<PropertyRecord>) -> PropertiesGroup {
        PropertiesGroup::new(PropertyKind::Diffusivity, records)
    }

    #[test]
    fn test_histogram_counts_sum_to_total() {
        let g = group(vec![
            record("w", Isotope::H, "a", 1940),
            record("w", Isotope::H, "b", 1950),
            record("w", Isotope::H, "c", 1969),
            record("w", Isotope::H, "d", 2023),
            record("w", Isotope::H, "e", 2026),
        ]);
        let bins = year_histogram(&g, 5, 2026, None).unwrap();
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, g.len());
        assert_eq!(bins.first().unwrap().start, 1940);
        assert_eq!(bins.last().unwrap().end, 2026);
        assert!(bins.iter().all(|b| b.selected));
    }

    #[test]
    fn test_histogram_final_edge_reaches_current_year() {
        let g = group(vec![record("w", Isotope::H, "a", 2000)]);
        let bins = year_histogram(&g, 7, 2026, None).unwrap();
        assert_eq!(bins.last().unwrap().end, 2026);
        // 1950 + 7k 不会恰好落在 2026 上
        assert!(bins.iter().rev().nth(1).unwrap().end < 2026);
    }

    #[test]
    fn test_histogram_highlights_selected_years() {
        let g = group(vec![]);
        let selected = YearRange::new(1960, 1975).unwrap();
        let bins = year_histogram(&g, 5, 2025, Some(selected)).unwrap();
        let highlighted: Vec<f64> = bins.iter().filter(|b| b.selected).map(|b| b.centre).collect();
        assert_eq!(highlighted, vec![1962.5, 1967.5, 1972.5]);
    }

    #[test]
    fn test_histogram_zero_step_is_error() {
        assert!(year_histogram(&group(vec![]), 0, 2025, None).is_err());
    }

    #[test]
    fn test_citations_dedup_first_wins_and_sorted() {
        let g = group(vec![
            record("w", Isotope::H, "frauenfelder", 1969)
                .with_citations(800)
                .with_doi("10.1/first"),
            record("w", Isotope::D, "frauenfelder", 1969)
                .with_citations(5)
                .with_doi("10.1/second"),
            record("cu", Isotope::H, "heinola", 2010).with_citations(100),
        ]);
        let ranking = citation_ranking(&g, false, 2026);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].label, "Heinola (2010)");
        assert_eq!(ranking[0].doi, "none");
        assert_eq!(ranking[1].label, "Frauenfelder (1969)");
        assert_eq!(ranking[1].doi, "10.1/first");
        assert!((ranking[1].citations - 800.0).abs() < 1e-12);
    }

    #[test]
    fn test_citations_per_year_guards_current_year() {
        let g = group(vec![
            record("w", Isotope::H, "new", 2026).with_citations(12),
            record("w", Isotope::H, "old", 2016).with_citations(100),
        ]);
        let ranking = citation_ranking(&g, true, 2026);
        for entry in &ranking {
            assert!(entry.citations.is_finite());
        }
        let new = ranking.iter().find(|e| e.label == "New (2026)").unwrap();
        assert!((new.citations - 12.0).abs() < 1e-12);
        let old = ranking.iter().find(|e| e.label == "Old (2016)").unwrap();
        assert!((old.citations - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_isotope_breakdown_fixed_categories() {
        let g = group(vec![record("w", Isotope::D, "a", 2000)]);
        let slices = isotope_breakdown(&g);
        let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["H", "D", "T"]);
        assert_eq!(slices[1].count, 1);
        assert_eq!(slices[0].count, 0);
        assert!(isotope_breakdown(&group(vec![])).iter().all(|s| s.count == 0));
    }

    #[test]
    fn test_isotope_pie_matches_curve_colours() {
        let g = group(vec![
            record("w", Isotope::D, "a", 2000),
            record("w", Isotope::T, "b", 2001),
        ]);
        let curves = ColourMap::new(&g, ColourBy::Isotope);
        let slices = isotope_breakdown(&g);
        for (i, r) in g.iter().enumerate() {
            let slice = slices.iter().find(|s| s.label == r.isotope.to_string()).unwrap();
            assert_eq!(slice.colour, curves.colour_of(r, i));
        }
    }

    #[test]
    fn test_citations_per_year_absurd_year_does_not_overflow() {
        let g = group(vec![record("w", Isotope::H, "ancient", i32::MIN).with_citations(10)]);
        let ranking = citation_ranking(&g, true, 2026);
        assert!(ranking[0].citations.is_finite());
        assert!(ranking[0].citations >= 0.0);
    }

    #[test]
    fn test_material_and_author_breakdowns() {
        let g = group(vec![
            record("w", Isotope::H, "frauenfelder", 1969),
            record("cu", Isotope::H, "heinola", 2010),
            record("w", Isotope::D, "heinola", 2010),
        ]);
        let materials = material_breakdown(&g);
        assert_eq!(materials.len(), 2);
        assert_eq!(materials[0].label, "cu");
        assert_eq!(materials[1].count, 2);
        assert!((share(&materials[1], &materials) - 200.0 / 3.0).abs() < 1e-9);

        let authors = author_breakdown(&g);
        assert_eq!(authors[0].label, "Frauenfelder");
        assert_eq!(authors[1].label, "Heinola");
        assert_eq!(authors[1].count, 2);

        // 饼图颜色与按作者着色的曲线一致
        let map = ColourMap::new(&g, ColourBy::Author);
        assert_eq!(authors[1].colour, map.colour_of(&g.records[1], 1));
    }
}
