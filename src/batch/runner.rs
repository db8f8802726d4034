//! # 批量执行器
//!
//! 并行执行批量任务（加载多个数据库文件、逐属性类型生成报告）。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果顺序与输入顺序一致
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `database/loader.rs`, `commands/report.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{HtmError, Result};
use crate::utils::progress;

use rayon::prelude::*;

/// 单个任务处理结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如属性组为空）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (任务名, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(name, err) => {
                self.failed += 1;
                self.failures.push((name, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// `jobs` 为 0 时使用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行映射，输出顺序与输入一致
    pub fn map<T, R, F>(&self, items: &[T], message: &str, f: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, message);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| HtmError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<R> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = f(item);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();
        Ok(results)
    }

    /// 并行处理任务列表并汇总
    pub fn run<T, F>(&self, items: &[T], message: &str, processor: F) -> Result<BatchResult>
    where
        T: Sync,
        F: Fn(&T) -> ProcessResult + Sync + Send,
    {
        let mut batch_result = BatchResult::default();
        for result in self.map(items, message, processor)? {
            batch_result.merge(result);
        }
        Ok(batch_result)
    }
}
