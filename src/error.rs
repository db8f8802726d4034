//! # 统一错误处理模块
//!
//! 定义 htmdash 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// htmdash 统一错误类型
#[derive(Error, Debug)]
pub enum HtmError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // 新属性表单校验
    // ─────────────────────────────────────────────────────────────
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 计算错误
    // ─────────────────────────────────────────────────────────────
    #[error("No {kind} matches the current filters")]
    EmptyGroup { kind: String },

    #[error("Mean {kind} is not finite (pre-exp = {pre_exp}, E = {act_energy})")]
    NonFiniteMean {
        kind: String,
        pre_exp: f64,
        act_energy: f64,
    },

    // ─────────────────────────────────────────────────────────────
    // 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("Plot error: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, HtmError>;
