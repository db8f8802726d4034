//! # 数据库模块
//!
//! 内存属性存储、数据库加载、新属性表单校验和引用数缓存。
//!
//! ## 依赖关系
//! - 被 `analysis/`, `dashboard/`, `commands/` 使用
//! - 使用 `parsers/`, `models/`, `batch/`
//! - 子模块: store, loader, form, citations

pub mod citations;
pub mod form;
pub mod loader;
pub mod store;

pub use citations::CitationCache;
pub use form::NewPropertyForm;
pub use loader::load_database;
pub use store::PropertyStore;
