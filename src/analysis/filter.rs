//! # 过滤引擎
//!
//! 将四维过滤选择与数据库求交，得到属性组。
//!
//! ## 规则
//! - 各维度之间取交集；任一维度为空时结果为空
//! - 作者、同位素大小写不敏感；材料大小写敏感
//!   （记录导入时与过滤选择进入系统时均已统一小写）
//! - 年份区间两端均包含
//!
//! ## 依赖关系
//! - 被 `dashboard/session.rs` 和 `commands/` 调用
//! - 使用 `database/store.rs`, `models/`

use crate::database::PropertyStore;
use crate::models::{FilterSelection, PropertiesGroup, PropertyKind, PropertyRecord};

/// 单条记录是否满足全部维度
pub fn matches(record: &PropertyRecord, selection: &FilterSelection, authors_lower: &[String]) -> bool {
    selection.materials.contains(&record.material.name)
        && selection.isotopes.contains(&record.isotope)
        && authors_lower.contains(&record.author.to_lowercase())
        && selection.years.map_or(true, |range| range.contains(record.year))
}

/// 按选择过滤 `kind` 类型的记录，保持数据库顺序
pub fn filter_properties(
    store: &PropertyStore,
    kind: PropertyKind,
    selection: &FilterSelection,
) -> PropertiesGroup {
    if selection.has_empty_facet() {
        return PropertiesGroup::empty(kind);
    }

    let authors_lower: Vec<String> = selection.authors.iter().map(|a| a.to_lowercase()).collect();

    let records = store
        .records(kind)
        .filter(|r| matches(r, selection, &authors_lower))
        .cloned()
        .collect();

    PropertiesGroup::new(kind, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Isotope, Material, YearRange};

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

    fn store() -> PropertyStore {
        PropertyStore::from_records(vec![
            record("W", Isotope::H, "Frauenfelder", 1968),
            record("W", Isotope::D, "Frauenfelder", 1968),
            record("Cu", Isotope::H, "Heinola", 2010),
        ])
    }

    fn selection(
        materials: &[&str],
        isotopes: &[Isotope],
        authors: &[&str],
        years: Option<(i32, i32)>,
    ) -> FilterSelection {
        FilterSelection::new(
            materials.iter().map(|s| s.to_string()).collect(),
            isotopes.to_vec(),
            authors.iter().map(|s| s.to_string()).collect(),
            years.map(|(a, b)| YearRange::new(a, b).unwrap()),
        )
    }

    #[test]
    fn test_worked_example() {
        let store = store();
        let sel = selection(
            &["W"],
            &[Isotope::H, Isotope::D],
            &["Frauenfelder"],
            Some((1960, 1970)),
        );
        let group = filter_properties(&store, PropertyKind::Diffusivity, &sel);
        assert_eq!(group.len(), 2);
        assert_eq!(group.records[0].isotope, Isotope::H);
        assert_eq!(group.records[1].isotope, Isotope::D);
    }

    #[test]
    fn test_empty_facet_gives_empty_group() {
        let store = store();
        let full = selection(
            &["w", "cu"],
            &Isotope::ALL,
            &["frauenfelder", "heinola"],
            Some((1900, 2100)),
        );
        assert_eq!(filter_properties(&store, PropertyKind::Diffusivity, &full).len(), 3);

        for empty in [
            FilterSelection { materials: vec![], ..full.clone() },
            FilterSelection { isotopes: vec![], ..full.clone() },
            FilterSelection { authors: vec![], ..full.clone() },
        ] {
            assert!(filter_properties(&store, PropertyKind::Diffusivity, &empty).is_empty());
        }
    }

    #[test]
    fn test_results_satisfy_every_facet() {
        let store = store();
        let sel = selection(&["w", "cu"], &[Isotope::H], &["HEINOLA"], None);
        let group = filter_properties(&store, PropertyKind::Diffusivity, &sel);
        assert_eq!(group.len(), 1);
        for r in &group {
            assert!(sel.materials.contains(&r.material.name));
            assert_eq!(r.isotope, Isotope::H);
            assert_eq!(r.author, "heinola");
        }
    }

    #[test]
    fn test_year_bounds_inclusive() {
        let store = store();
        let upper = selection(&["cu"], &Isotope::ALL, &["heinola"], Some((2000, 2010)));
        assert_eq!(filter_properties(&store, PropertyKind::Diffusivity, &upper).len(), 1);

        let lower = selection(&["cu"], &Isotope::ALL, &["heinola"], Some((2010, 2020)));
        assert_eq!(filter_properties(&store, PropertyKind::Diffusivity, &lower).len(), 1);

        let outside = selection(&["cu"], &Isotope::ALL, &["heinola"], Some((2000, 2009)));
        assert!(filter_properties(&store, PropertyKind::Diffusivity, &outside).is_empty());
    }

    #[test]
    fn test_material_compared_after_normalisation() {
        let store = store();
        let sel = selection(&["W"], &Isotope::ALL, &["frauenfelder"], None);
        assert_eq!(filter_properties(&store, PropertyKind::Diffusivity, &sel).len(), 2);

        // 引擎本身按原样比较，不做大小写折叠
        let raw = FilterSelection {
            materials: vec!["W".to_string()],
            ..sel
        };
        assert!(filter_properties(&store, PropertyKind::Diffusivity, &raw).is_empty());
    }

    #[test]
    fn test_other_kind_not_returned() {
        let store = store();
        let sel = selection(&["w"], &Isotope::ALL, &["frauenfelder"], None);
        assert!(filter_properties(&store, PropertyKind::Solubility, &sel).is_empty());
    }
}
