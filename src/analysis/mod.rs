//! # 分析模块
//!
//! 过滤、曲线计算和聚合统计流水线。
//!
//! ## 子模块
//! - `filter`: 四维过滤引擎
//! - `curve`: Arrhenius 曲线采样与平均属性
//! - `stats`: 年份直方图、引用数排名、分类计数
//! - `colour`: 类别颜色分配
//! - `table`: 数据表行
//!
//! ## 依赖关系
//! - 被 `dashboard/`, `export/`, `commands/` 使用
//! - 使用 `models/`, `database/`

pub mod colour;
pub mod curve;
pub mod filter;
pub mod stats;
pub mod table;

pub use colour::{ColourBy, ColourMap};
pub use curve::{mean_property, ArrheniusCurve, MeanMethod, MeanProperty, CURVE_POINTS};
pub use filter::filter_properties;
pub use stats::{CitationEntry, Slice, YearBin, DEFAULT_YEAR_STEP};
pub use table::TableRow;
