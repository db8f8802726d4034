//! # 仪表板模块
//!
//! 无界面的仪表板核心：显式事件类型 + 会话状态机。
//! 每个事件触发受影响属性组及其全部派生视图的完整重新计算。
//!
//! ## 子模块
//! - `event`: 带标签的事件枚举
//! - `session`: 标签页状态与事件分派
//!
//! ## 依赖关系
//! - 被 `commands/session.rs` 使用
//! - 使用 `analysis/`, `export/`, `database/`

pub mod event;
pub mod session;

pub use event::{read_events, Event};
pub use session::{default_years, DashboardView, Outcome, Session, INITIAL_MATERIAL};
