// Phase 7: 全ジョブ実行

use rayon::prelude::*;

use crate::pipeline::job_runner::{JobConfig, JobResult, run_job};

/// Run multiple jobs, collecting results in input order.
/// One job failure does NOT prevent other jobs from running.
///
/// `parallel_workers` が 0 なら rayon のデフォルト (CPU数) を使う。
/// 各ジョブは専用の一時ディレクトリを持つので並列に実行できる。
pub fn run_all_jobs(
    jobs: &[JobConfig],
    parallel_workers: usize,
) -> crate::error::Result<Vec<crate::error::Result<JobResult>>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel_workers)
        .build()
        .map_err(|e| crate::error::PdfFillError::config(format!("thread pool: {e}")))?;

    Ok(pool.install(|| jobs.par_iter().map(run_job).collect()))
}
