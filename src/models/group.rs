//! # 属性组
//!
//! 满足当前过滤选择的有序记录集合，顺序与数据库顺序一致。
//!
//! ## 依赖关系
//! - 被 `analysis/`, `export/`, `dashboard/` 使用

use super::kind::PropertyKind;
use super::property::PropertyRecord;

/// 过滤后的属性组（每次过滤变化时重新计算）
#[derive(Debug, Clone, PartialEq)]
pub struct PropertiesGroup {
    pub kind: PropertyKind,
    pub records: Vec<PropertyRecord>,
}

impl PropertiesGroup {
    pub fn new(kind: PropertyKind, records: Vec<PropertyRecord>) -> Self {
        PropertiesGroup { kind, records }
    }

    pub fn empty(kind: PropertyKind) -> Self {
        PropertiesGroup {
            kind,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyRecord> {
        self.records.iter()
    }

    /// 组内出现的全部单位（去重，保持出现顺序）
    pub fn units(&self) -> Vec<&str> {
        let mut units: Vec<&str> = Vec::new();
        for record in &self.records {
            if !units.contains(&record.units.as_str()) {
                units.push(&record.units);
            }
        }
        units
    }

    /// y 轴标签；溶解度单位不一致时标注 mixed units
    pub fn axis_label(&self) -> String {
        let units = self.units();
        match units.as_slice() {
            [] => self.kind.title().to_string(),
            [single] => format!("{} ({})", self.kind.title(), single),
            _ => format!("{} (mixed units)", self.kind.title()),
        }
    }
}

impl<'a> IntoIterator for &'a PropertiesGroup {
    type Item = &'a PropertyRecord;
    type IntoIter = std::slice::Iter<'a, PropertyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
