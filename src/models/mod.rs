//! # 数据模型模块
//!
//! 定义属性记录、属性类型、过滤选择和属性组。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`database/`、`analysis/` 和 `commands/` 使用
//! - 子模块: kind, property, selection, group

pub mod group;
pub mod kind;
pub mod property;
pub mod selection;

pub use group::PropertiesGroup;
pub use kind::PropertyKind;
pub use property::{
    capitalize, Isotope, Material, PropertyRecord, RawData, TemperatureRange, BOLTZMANN_EV,
    DEFAULT_RANGE,
};
pub use selection::{normalise_materials, parse_year_range, FilterSelection, YearRange};
