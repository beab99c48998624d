// Phase 6: ジョブ単位: 入力検証 -> pdftk 実行 -> 出力配置

use std::path::{Path, PathBuf};

use crate::config::job::Job;
use crate::config::merged::MergedConfig;
use crate::config::settings::Settings;
use crate::error::PdfFillError;
use crate::fdf::{CheckboxLabels, FieldMap};
use crate::pdftk::{Pdftk, paths};

/// Operation-specific part of a resolved job.
#[derive(Debug, Clone)]
pub enum JobTask {
    Fill {
        input_path: PathBuf,
        fields: FieldMap,
        labels: CheckboxLabels,
    },
    Stamp {
        input_path: PathBuf,
        stamp_path: PathBuf,
    },
    Merge {
        input_paths: Vec<PathBuf>,
    },
}

impl JobTask {
    pub fn op_name(&self) -> &'static str {
        match self {
            JobTask::Fill { .. } => "fill",
            JobTask::Stamp { .. } => "stamp",
            JobTask::Merge { .. } => "merge",
        }
    }
}

/// Configuration for a single job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub task: JobTask,
    pub output_path: PathBuf,
    pub overwrite: bool,
    /// pdftk の名前またはパス。None なら `PATH` から探す。
    pub pdftk_path: Option<PathBuf>,
    pub scratch_root: Option<PathBuf>,
}

impl JobConfig {
    /// ジョブファイルの1件を設定とマージして実行可能な形にする。
    ///
    /// 相対パスは `job_dir` (ジョブファイルのディレクトリ) 基準で解決する。
    /// Fill ジョブでラベルが決まらない場合は暗黙の既定値を使わずエラーにする。
    pub fn from_job(job_dir: &Path, job: &Job, settings: &Settings) -> crate::error::Result<Self> {
        let merged = MergedConfig::new(settings, job);

        let task = match job {
            Job::Fill(fill) => {
                let labels = merged.labels.clone().ok_or_else(|| {
                    PdfFillError::config(format!(
                        "fill job for '{}' needs both checked_label and unchecked_label \
                         (set them on the job or in settings.yaml)",
                        fill.output
                    ))
                })?;
                JobTask::Fill {
                    input_path: resolve_path(job_dir, &fill.input),
                    fields: fill.fields.clone(),
                    labels,
                }
            }
            Job::Stamp(stamp) => JobTask::Stamp {
                input_path: resolve_path(job_dir, &stamp.input),
                stamp_path: resolve_path(job_dir, &stamp.stamp),
            },
            Job::Merge(merge) => JobTask::Merge {
                input_paths: merge
                    .inputs
                    .iter()
                    .map(|p| resolve_path(job_dir, p))
                    .collect(),
            },
        };

        Ok(JobConfig {
            task,
            output_path: resolve_path(job_dir, job.output()),
            overwrite: merged.overwrite,
            pdftk_path: merged.pdftk_path,
            scratch_root: merged.scratch_root,
        })
    }
}

/// Result of processing a single job.
#[derive(Debug)]
pub struct JobResult {
    pub op: &'static str,
    pub output_path: PathBuf,
}

/// 1ジョブを実行し、出力先にPDFを配置する。
pub fn run_job(config: &JobConfig) -> crate::error::Result<JobResult> {
    let mut pdftk = match &config.pdftk_path {
        Some(program) => Pdftk::with_program(program)?,
        None => Pdftk::locate()?,
    };
    if let Some(root) = &config.scratch_root {
        pdftk = pdftk.with_scratch_root(root);
    }

    match &config.task {
        JobTask::Fill {
            input_path,
            fields,
            labels,
        } => {
            pdftk.fill(
                fields,
                labels,
                input_path,
                &config.output_path,
                config.overwrite,
            )?;
        }
        JobTask::Stamp {
            input_path,
            stamp_path,
        } => {
            let bytes = pdftk.stamp(input_path, stamp_path)?;
            paths::install_bytes(&bytes, &config.output_path, config.overwrite)?;
        }
        JobTask::Merge { input_paths } => {
            let bytes = pdftk.merge(input_paths.as_slice())?;
            paths::install_bytes(&bytes, &config.output_path, config.overwrite)?;
        }
    }

    Ok(JobResult {
        op: config.task.op_name(),
        output_path: config.output_path.clone(),
    })
}

/// Resolve a potentially relative path against a base directory.
/// If the path is already absolute, return it as-is.
pub fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
