// Phase 5: pdftk ラッパー (fill / multistamp / cat)
//
// PDF の処理はすべて外部の pdftk に委譲する。ここでは入力の検証、
// 作業ディレクトリの用意、コマンドライン組立、出力の回収だけを行う。

pub mod command;
pub mod paths;
pub mod scratch;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::PdfFillError;
use crate::fdf::writer::write_fdf_file;
use crate::fdf::{CheckboxLabels, FieldMap};
use scratch::ScratchDir;

/// Program name looked up on `PATH` by [`Pdftk::locate`].
pub const PDFTK_PROGRAM: &str = "pdftk";

const DATA_FILE: &str = "data.fdf";
const OUTPUT_FILE: &str = "output.pdf";

/// A resolved pdftk executable plus where its scratch directories live.
#[derive(Debug, Clone)]
pub struct Pdftk {
    program: PathBuf,
    scratch_root: Option<PathBuf>,
}

impl Pdftk {
    /// `PATH` から pdftk を探す。
    pub fn locate() -> crate::error::Result<Self> {
        Self::with_program(PDFTK_PROGRAM)
    }

    /// 指定された名前またはパスの実行ファイルを使う。
    ///
    /// 名前だけなら `PATH` から、パスならそのファイルを解決する。
    pub fn with_program(program: impl AsRef<Path>) -> crate::error::Result<Self> {
        let program = program.as_ref();
        let resolved = which::which(program).map_err(|e| {
            PdfFillError::tool_not_found(format!("'{}': {e}", program.display()))
        })?;
        Ok(Self {
            program: resolved,
            scratch_root: None,
        })
    }

    /// 一時ディレクトリを `root` の下に作るようにする。
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    /// Absolute path of the executable that will be run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// フォームに値を埋めて flatten した PDF を `dest` に作成する。
    ///
    /// `dest` が既に存在し `overwrite` が false の場合は
    /// [`PdfFillError::DestinationExists`] を返す。
    pub fn fill(
        &self,
        fields: &FieldMap,
        labels: &CheckboxLabels,
        source: &Path,
        dest: &Path,
        overwrite: bool,
    ) -> crate::error::Result<()> {
        let source = paths::resolve_input(source)?;
        let dest = std::path::absolute(dest)?;
        if !overwrite && paths::exists(&dest)? {
            return Err(PdfFillError::DestinationExists(dest));
        }

        let scratch = self.scratch()?;
        let data_file = scratch.join(DATA_FILE);
        let output_file = scratch.join(OUTPUT_FILE);
        write_fdf_file(&data_file, fields, labels)?;

        let args: [OsString; 6] = [
            source.clone().into(),
            "fill_form".into(),
            data_file.into(),
            "output".into(),
            output_file.clone().into(),
            "flatten".into(),
        ];
        command::run_in_dir(scratch.path(), &self.program, args)?;

        paths::install_output(&output_file, &dest, overwrite)?;

        tracing::info!(
            source = %source.display(),
            dest = %dest.display(),
            fields = fields.len(),
            "filled PDF form"
        );
        Ok(())
    }

    /// フォームに値を埋めた PDF をファイルを介さずバイト列で返す。
    ///
    /// FDF は呼び出し元が用意した `scratch_dir` に書き、pdftk の出力先は
    /// 標準出力 (`output -`) にする。作成した FDF は最後に削除するが、
    /// ディレクトリ自体は呼び出し元の管理とする。`scratch_dir` が存在しなければ
    /// `NotFound` の [`PdfFillError::IoError`] を返す。
    pub fn fill_to_bytes(
        &self,
        fields: &FieldMap,
        labels: &CheckboxLabels,
        source: &Path,
        scratch_dir: &Path,
    ) -> crate::error::Result<Vec<u8>> {
        let source = paths::resolve_input(source)?;
        let scratch_dir = std::path::absolute(scratch_dir)?;
        if !paths::exists(&scratch_dir)? {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("scratch directory does not exist: '{}'", scratch_dir.display()),
            )
            .into());
        }

        let data_file = tempfile::Builder::new()
            .prefix("fillpdf-")
            .suffix(".fdf")
            .tempfile_in(&scratch_dir)?
            .into_temp_path();
        write_fdf_file(&data_file, fields, labels)?;

        let args: [OsString; 6] = [
            source.clone().into(),
            "fill_form".into(),
            data_file.to_path_buf().into(),
            "output".into(),
            "-".into(),
            "flatten".into(),
        ];
        let result = command::run_with_output(&scratch_dir, &self.program, args);

        let data_path = data_file.to_path_buf();
        if let Err(e) = data_file.close() {
            tracing::warn!(
                path = %data_path.display(),
                error = %e,
                "failed to remove FDF data file"
            );
        }

        let bytes = result?;
        tracing::info!(
            source = %source.display(),
            fields = fields.len(),
            bytes = bytes.len(),
            "filled PDF form to memory"
        );
        Ok(bytes)
    }

    /// `stamp` の各ページを `base` の対応ページに重ねた PDF を返す (multistamp)。
    pub fn stamp(&self, base: &Path, stamp: &Path) -> crate::error::Result<Vec<u8>> {
        let base = paths::resolve_input(base)?;
        let stamp = paths::resolve_input(stamp)?;

        let scratch = self.scratch()?;
        let output_file = scratch.join(OUTPUT_FILE);

        let args: [OsString; 5] = [
            base.clone().into(),
            "multistamp".into(),
            stamp.clone().into(),
            "output".into(),
            output_file.clone().into(),
        ];
        command::run_in_dir(scratch.path(), &self.program, args)?;

        let bytes = std::fs::read(&output_file)?;
        tracing::info!(
            base = %base.display(),
            stamp = %stamp.display(),
            bytes = bytes.len(),
            "stamped PDF"
        );
        Ok(bytes)
    }

    /// Concatenate `documents` in order into a single PDF (`cat`).
    pub fn merge<P: AsRef<Path>>(&self, documents: &[P]) -> crate::error::Result<Vec<u8>> {
        if documents.is_empty() {
            return Err(PdfFillError::invalid_argument(
                "merge requires at least one input document",
            ));
        }

        let mut args: Vec<OsString> = Vec::with_capacity(documents.len() + 3);
        for doc in documents {
            args.push(paths::resolve_input(doc.as_ref())?.into());
        }

        let scratch = self.scratch()?;
        let output_name = format!("{}.pdf", unix_seconds());
        let output_file = scratch.join(&output_name);
        args.push("cat".into());
        args.push("output".into());
        args.push(output_file.clone().into());

        command::run_in_dir(scratch.path(), &self.program, args)?;

        let bytes = std::fs::read(&output_file)?;
        tracing::info!(
            documents = documents.len(),
            bytes = bytes.len(),
            "merged PDFs"
        );
        Ok(bytes)
    }

    fn scratch(&self) -> crate::error::Result<ScratchDir> {
        ScratchDir::create(self.scratch_root.as_deref())
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
