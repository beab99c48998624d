use std::path::PathBuf;

use super::job::Job;
use super::settings::Settings;
use crate::fdf::CheckboxLabels;

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub pdftk_path: Option<PathBuf>,
    pub scratch_root: Option<PathBuf>,
    pub overwrite: bool,
    /// checked/unchecked の両方が決まった場合のみ Some。
    pub labels: Option<CheckboxLabels>,
}

impl MergedConfig {
    /// JobのOption値がSomeならJobの値を、NoneならSettingsの値を使用する。
    ///
    /// ラベルは片方ずつ上書きできる (checked だけ Job で指定する等)。
    pub fn new(settings: &Settings, job: &Job) -> Self {
        let (job_checked, job_unchecked) = match job {
            Job::Fill(fill) => (fill.checked_label.as_ref(), fill.unchecked_label.as_ref()),
            Job::Stamp(_) | Job::Merge(_) => (None, None),
        };
        let checked = job_checked.or(settings.checked_label.as_ref());
        let unchecked = job_unchecked.or(settings.unchecked_label.as_ref());
        let labels = match (checked, unchecked) {
            (Some(c), Some(u)) => Some(CheckboxLabels::new(c.as_str(), u.as_str())),
            _ => None,
        };

        MergedConfig {
            pdftk_path: settings.pdftk_path.clone(),
            scratch_root: settings.scratch_root.clone(),
            overwrite: job.overwrite().unwrap_or(settings.overwrite),
            labels,
        }
    }
}
