// Phase 3: 入力パス解決と出力ファイル配置

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::PdfFillError;

/// Resolve an input document to an absolute path, verifying that it exists.
///
/// pdftk runs with its working directory set to the scratch directory, so
/// relative paths must be made absolute against the caller's cwd first.
pub fn resolve_input(path: &Path) -> crate::error::Result<PathBuf> {
    let abs = std::path::absolute(path)?;
    if !exists(&abs)? {
        return Err(PdfFillError::InputNotFound(path.to_path_buf()));
    }
    Ok(abs)
}

/// ファイルまたはディレクトリが存在するかを返す。NotFound 以外のエラーは伝播する。
pub fn exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// 出力先が既に存在する場合の扱いを決める。
///
/// `overwrite` が false なら [`PdfFillError::DestinationExists`]、
/// true なら既存ファイルを削除する。
pub fn prepare_destination(dest: &Path, overwrite: bool) -> crate::error::Result<()> {
    if exists(dest)? {
        if !overwrite {
            return Err(PdfFillError::DestinationExists(dest.to_path_buf()));
        }
        fs::remove_file(dest)?;
    }
    Ok(())
}

/// 一時出力ファイルを最終的な出力先にコピーする。
///
/// rename ではなく読み込み→書き込み→sync のコピーなので、
/// 一時ディレクトリと出力先が別ボリュームでも動作する。
pub fn install_output(src: &Path, dest: &Path, overwrite: bool) -> crate::error::Result<()> {
    prepare_destination(dest, overwrite)?;
    copy_file(src, dest)?;
    tracing::debug!(src = %src.display(), dest = %dest.display(), "installed output");
    Ok(())
}

/// メモリ上の出力を出力先に書き込む。
///
/// 同じディレクトリの一時ファイルに書き切ってから persist するため、
/// 途中まで書かれた出力先が見えることはない。
pub fn install_bytes(bytes: &[u8], dest: &Path, overwrite: bool) -> crate::error::Result<()> {
    prepare_destination(dest, overwrite)?;

    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(parent)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;

    let persisted = if overwrite {
        staged.persist(dest)
    } else {
        staged.persist_noclobber(dest)
    };
    persisted.map_err(|e| e.error)?;

    tracing::debug!(dest = %dest.display(), bytes = bytes.len(), "installed output");
    Ok(())
}

/// `src` の内容を `dst` にコピーする。`dst` は作成または切り詰められる。
fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    let mut input = File::open(src)?;
    let mut output = File::create(dst)?;
    io::copy(&mut input, &mut output)?;
    output.flush()?;
    output.sync_all()
}
