//! # 引用数缓存
//!
//! 按 DOI 缓存引用数，避免每次启动重新查询：
//! `{ "date": "YYYY-MM-DD", "dois": { "<doi>": <count> } }`
//!
//! ## 依赖关系
//! - 被 `commands/cache_citations.rs` 和 `commands/mod.rs` 使用
//! - 使用 `database/store.rs`
//! - 使用 `serde_json` 读写、`chrono` 记录日期

use crate::database::PropertyStore;
use crate::error::{HtmError, Result};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 引用数缓存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationCache {
    /// 生成日期
    pub date: NaiveDate,
    /// DOI -> 引用数
    pub dois: BTreeMap<String, u32>,
}

impl CitationCache {
    /// 从存储生成缓存，同一 DOI 以第一次出现的记录为准
    pub fn from_store(store: &PropertyStore, date: NaiveDate) -> Self {
        let mut dois = BTreeMap::new();
        for record in store.all() {
            if let Some(doi) = &record.doi {
                dois.entry(doi.clone()).or_insert(record.nb_citations);
            }
        }
        CitationCache { date, dois }
    }

    /// 将缓存中的引用数写入存储，返回更新的记录数
    pub fn apply(&self, store: &mut PropertyStore) -> usize {
        let mut updated = 0;
        for record in store.all_mut() {
            if let Some(count) = record.doi.as_ref().and_then(|doi| self.dois.get(doi)) {
                record.nb_citations = *count;
                updated += 1;
            }
        }
        updated
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| HtmError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| HtmError::ParseError {
            format: "citations JSON".to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| HtmError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })
    }
}
