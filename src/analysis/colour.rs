//! # 颜色分配
//!
//! 按类别（材料/作者/同位素，或逐条记录）为属性分配颜色，
//! 曲线图和饼图共用同一分配，保证同一类别颜色一致。
//!
//! ## 依赖关系
//! - 被 `analysis/stats.rs`, `export/plot.rs`, `dashboard/session.rs` 使用
//! - 使用 `models/`

use crate::models::{Isotope, PropertiesGroup, PropertyRecord};

use serde::Deserialize;

/// 定性色板（与常见 Web 图表库默认色板一致）
pub const COLOUR_CYCLE: [(u8, u8, u8); 10] = [
    (0x63, 0x6E, 0xFA),
    (0xEF, 0x55, 0x3B),
    (0x00, 0xCC, 0x96),
    (0xAB, 0x63, 0xFA),
    (0xFF, 0xA1, 0x5A),
    (0x19, 0xD3, 0xF3),
    (0xFF, 0x66, 0x92),
    (0xB6, 0xE8, 0x80),
    (0xFF, 0x97, 0xFF),
    (0xFE, 0xCB, 0x52),
];

/// 着色依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColourBy {
    /// 每条记录一种颜色
    #[default]
    Property,
    Material,
    Author,
    Isotope,
}

impl ColourBy {
    /// 记录在该着色依据下的类别键
    pub fn key(&self, record: &PropertyRecord, index: usize) -> String {
        match self {
            ColourBy::Property => index.to_string(),
            ColourBy::Material => record.material.name.clone(),
            ColourBy::Author => record.author.to_lowercase(),
            ColourBy::Isotope => record.isotope.to_string(),
        }
    }
}

/// 类别 -> 颜色（按首次出现顺序循环取色）
#[derive(Debug, Clone)]
pub struct ColourMap {
    colour_by: ColourBy,
    keys: Vec<String>,
}

impl ColourMap {
    pub fn new(group: &PropertiesGroup, colour_by: ColourBy) -> Self {
        // 同位素类别固定为 H、D、T，颜色不随出现顺序变化
        if colour_by == ColourBy::Isotope {
            let keys = Isotope::ALL.iter().map(|i| i.to_string()).collect();
            return ColourMap { colour_by, keys };
        }

        let mut keys: Vec<String> = Vec::new();
        for (i, record) in group.iter().enumerate() {
            let key = colour_by.key(record, i);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        ColourMap { colour_by, keys }
    }

    /// 类别键对应的颜色
    pub fn colour_of_key(&self, key: &str) -> (u8, u8, u8) {
        let index = self.keys.iter().position(|k| k == key).unwrap_or(0);
        COLOUR_CYCLE[index % COLOUR_CYCLE.len()]
    }

    /// 组内第 `index` 条记录的颜色
    pub fn colour_of(&self, record: &PropertyRecord, index: usize) -> (u8, u8, u8) {
        self.colour_of_key(&self.colour_by.key(record, index))
    }
}

/// `#RRGGBB` 形式
pub fn to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Isotope, Material, PropertyKind};

    fn group() -> PropertiesGroup {
        let rec = |m: &str, a: &str| {
            PropertyRecord::new(
                PropertyKind::Diffusivity,
                Material::new(m),
                Isotope::H,
                a,
                2000,
                1.0,
                0.1,
            )
        };
        PropertiesGroup::new(
            PropertyKind::Diffusivity,
            vec![rec("tungsten", "a"), rec("copper", "b"), rec("tungsten", "c")],
        )
    }

    #[test]
    fn test_same_category_same_colour() {
        let group = group();
        let map = ColourMap::new(&group, ColourBy::Material);
        let c0 = map.colour_of(&group.records[0], 0);
        let c1 = map.colour_of(&group.records[1], 1);
        let c2 = map.colour_of(&group.records[2], 2);
        assert_eq!(c0, c2);
        assert_ne!(c0, c1);
        assert_eq!(map.colour_of_key("tungsten"), c0);
    }

    #[test]
    fn test_colour_by_property_distinct() {
        let group = group();
        let map = ColourMap::new(&group, ColourBy::Property);
        assert_ne!(
            map.colour_of(&group.records[0], 0),
            map.colour_of(&group.records[2], 2)
        );
    }

    #[test]
    fn test_isotope_colours_fixed_order() {
        let rec = |isotope| {
            PropertyRecord::new(
                PropertyKind::Diffusivity,
                Material::new("tungsten"),
                isotope,
                "a",
                2000,
                1.0,
                0.1,
            )
        };
        let group = PropertiesGroup::new(
            PropertyKind::Diffusivity,
            vec![rec(Isotope::D), rec(Isotope::H)],
        );
        let map = ColourMap::new(&group, ColourBy::Isotope);
        assert_eq!(map.colour_of(&group.records[0], 0), COLOUR_CYCLE[1]);
        assert_eq!(map.colour_of(&group.records[1], 1), COLOUR_CYCLE[0]);
        assert_eq!(map.colour_of_key("T"), COLOUR_CYCLE[2]);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(COLOUR_CYCLE[0]), "#636EFA");
    }
}
