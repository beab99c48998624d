// Phase 4: pdftk サブプロセス実行

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::PdfFillError;

/// Run `program` with `args` in `dir` and wait for it to exit.
///
/// On failure the trimmed stderr text becomes the error detail.
pub fn run_in_dir<I, S>(dir: &Path, program: &Path, args: I) -> crate::error::Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    execute(dir, program, args, Stdio::null()).map(|_| ())
}

/// [`run_in_dir`] と同じだが、標準出力を取り込んで返す。
pub fn run_with_output<I, S>(
    dir: &Path,
    program: &Path,
    args: I,
) -> crate::error::Result<Vec<u8>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    execute(dir, program, args, Stdio::piped()).map(|output| output.stdout)
}

fn execute<I, S>(
    dir: &Path,
    program: &Path,
    args: I,
    stdout: Stdio,
) -> crate::error::Result<Output>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(Stdio::piped());

    tracing::debug!(command = ?cmd, dir = %dir.display(), "running pdftk");

    let output = cmd.output()?;
    if output.status.success() {
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = stderr.trim();
    if message.is_empty() {
        Err(PdfFillError::tool_failed(format!("exited with {}", output.status)))
    } else {
        Err(PdfFillError::tool_failed(message))
    }
}
