//! # 属性存储
//!
//! 内存中的属性数据库，按加载顺序保存全部记录，只追加不删除。
//! 由调用方显式持有并以引用传入各操作；新增记录仅在进程生命周期内有效。
//!
//! ## 依赖关系
//! - 被 `analysis/filter.rs`, `dashboard/session.rs`, `commands/` 使用
//! - 使用 `parsers/` 加载内置样例数据库

use crate::error::Result;
use crate::models::{capitalize, PropertyKind, PropertyRecord, YearRange};
use crate::parsers::json_db;

/// 内置样例数据库
const BUNDLED_DATABASE: &str = include_str!("../../data/htm_sample.json");

/// 属性存储
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    records: Vec<PropertyRecord>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<PropertyRecord>) -> Self {
        PropertyStore { records }
    }

    /// 加载内置样例数据库
    pub fn bundled() -> Result<Self> {
        let records = json_db::parse_json_str(BUNDLED_DATABASE, "<bundled>", None)?;
        Ok(Self::from_records(records))
    }

    /// 追加一条记录
    pub fn append(&mut self, record: PropertyRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = PropertyRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 全部记录（所有类型）
    pub fn all(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub(crate) fn all_mut(&mut self) -> &mut [PropertyRecord] {
        &mut self.records
    }

    /// 某一类型的记录，保持数据库顺序
    pub fn records(&self, kind: PropertyKind) -> impl Iterator<Item = &PropertyRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    pub fn count(&self, kind: PropertyKind) -> usize {
        self.records(kind).count()
    }

    /// 所有类型中出现过的材料（去重排序）
    pub fn material_options(&self) -> Vec<String> {
        unique_sorted(self.records.iter().map(|r| r.material.name.clone()))
    }

    /// 某一类型中出现过的材料（去重排序）
    pub fn materials(&self, kind: PropertyKind) -> Vec<String> {
        unique_sorted(self.records(kind).map(|r| r.material.name.to_lowercase()))
    }

    /// 某一类型的作者选项（首字母大写，去重排序）；
    /// 给出 `materials` 时只保留这些材料的作者
    pub fn authors(&self, kind: PropertyKind, materials: Option<&[String]>) -> Vec<String> {
        unique_sorted(
            self.records(kind)
                .filter(|r| materials.map_or(true, |m| m.contains(&r.material.name)))
                .map(|r| capitalize(&r.author)),
        )
    }

    /// 某一类型的年份跨度
    pub fn year_bounds(&self, kind: PropertyKind) -> Option<YearRange> {
        let mut years = self.records(kind).map(|r| r.year);
        let first = years.next()?;
        let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Some(YearRange { min, max })
    }
}

fn unique_sorted(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut items: Vec<String> = items.collect();
    items.sort();
    items.dedup();
    items
}
