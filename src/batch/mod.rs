//! # 批量处理模块
//!
//! 提供统一的文件收集与并行批处理能力。
//!
//! ## 功能
//! - 自动检测输入类型（文件/目录）
//! - 收集匹配的数据库文件
//! - 并行处理（加载多个文件、多类型报告）
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `database/loader.rs`, `commands/report.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::{FileCollector, DATABASE_PATTERN};
pub use runner::{BatchResult, BatchRunner, ProcessResult};
