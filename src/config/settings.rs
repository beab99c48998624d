use std::path::{Path, PathBuf};

use serde::Deserialize;

/// `settings.yaml` の内容。全項目省略可能。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// pdftk の名前またはパス。None なら `PATH` から探す。
    pub pdftk_path: Option<PathBuf>,
    /// 一時ディレクトリを作る場所。None ならシステムの一時ディレクトリ。
    pub scratch_root: Option<PathBuf>,
    pub checked_label: Option<String>,
    pub unchecked_label: Option<String>,
    pub overwrite: bool,
    /// 並列実行するジョブ数。0 は CPU 数に合わせる。
    pub parallel_workers: usize,
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::PdfFillError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}
