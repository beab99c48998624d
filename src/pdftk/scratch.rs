// Phase 3: 作業用一時ディレクトリ
//
// 1操作ごとに専用ディレクトリを作り、Drop で必ず削除する。
// 削除失敗はログに残すだけで呼び出し元には伝播しない。

use std::path::{Path, PathBuf};

use tempfile::TempDir;

const SCRATCH_PREFIX: &str = "fillpdf-";

/// Exclusively-owned scratch directory for a single pdftk invocation.
pub struct ScratchDir {
    dir: Option<TempDir>,
}

impl ScratchDir {
    /// `root` が指定されればその下に、なければシステムの一時ディレクトリに作成する。
    pub fn create(root: Option<&Path>) -> crate::error::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        tracing::debug!(path = %dir.path().display(), "created scratch directory");
        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        // only None while being dropped
        self.dir.as_ref().map_or(Path::new(""), TempDir::path)
    }

    /// ディレクトリ内のファイルパスを返す。
    pub fn join(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to remove temporary directory"
                );
            }
        }
    }
}
