// Phase 6-7: ジョブ実行のテスト (偽の pdftk を使用)
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use pdf_fill::pipeline::job_runner::{JobConfig, JobTask, run_job};
use pdf_fill::pipeline::orchestrator::run_all_jobs;
use pdf_fill::{CheckboxLabels, FieldMap, PdfFillError};
use tempfile::tempdir;

/// `output` 引数の先に固定内容を書く偽の pdftk。
fn fake_pdftk(dir: &Path, payload: &str) -> PathBuf {
    let script = format!(
        r#"#!/bin/sh
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "output" ]; then out="$a"; fi
  prev="$a"
done
printf '%s' "{payload}" > "$out"
"#
    );
    let path = dir.join("fake-pdftk");
    fs::write(&path, script).expect("write fake pdftk");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake pdftk");
    path
}

fn touch(path: &Path) {
    fs::write(path, b"%PDF-1.4\n").expect("create input");
}

fn job(task: JobTask, output_path: PathBuf, pdftk: &Path) -> JobConfig {
    JobConfig {
        task,
        output_path,
        overwrite: false,
        pdftk_path: Some(pdftk.to_path_buf()),
        scratch_root: None,
    }
}

#[test]
fn test_run_job_merge_writes_output() {
    let dir = tempdir().expect("create temp dir");
    let pdftk = fake_pdftk(dir.path(), "MERGED");
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    touch(&a);
    touch(&b);
    let output = dir.path().join("merged.pdf");

    let result = run_job(&job(
        JobTask::Merge {
            input_paths: vec![a, b],
        },
        output.clone(),
        &pdftk,
    ))
    .expect("merge job should succeed");

    assert_eq!(result.op, "merge");
    assert_eq!(result.output_path, output);
    assert_eq!(fs::read(&output).unwrap(), b"MERGED");
}

#[test]
fn test_run_job_stamp_respects_overwrite_flag() {
    let dir = tempdir().expect("create temp dir");
    let pdftk = fake_pdftk(dir.path(), "STAMPED");
    let base = dir.path().join("base.pdf");
    let stamp = dir.path().join("stamp.pdf");
    touch(&base);
    touch(&stamp);
    let output = dir.path().join("stamped.pdf");
    fs::write(&output, b"old").unwrap();

    let mut config = job(
        JobTask::Stamp {
            input_path: base,
            stamp_path: stamp,
        },
        output.clone(),
        &pdftk,
    );

    let err = run_job(&config).expect_err("existing output without overwrite");
    assert!(matches!(err, PdfFillError::DestinationExists(_)));
    assert_eq!(fs::read(&output).unwrap(), b"old");

    config.overwrite = true;
    run_job(&config).expect("overwrite should succeed");
    assert_eq!(fs::read(&output).unwrap(), b"STAMPED");
}

#[test]
fn test_run_job_fill_writes_output() {
    let dir = tempdir().expect("create temp dir");
    let pdftk = fake_pdftk(dir.path(), "FILLED");
    let form = dir.path().join("form.pdf");
    touch(&form);
    let output = dir.path().join("filled.pdf");

    let mut fields = FieldMap::new();
    fields.insert("name".into(), "Ann".into());
    let result = run_job(&job(
        JobTask::Fill {
            input_path: form,
            fields,
            labels: CheckboxLabels::new("Yes", "Off"),
        },
        output.clone(),
        &pdftk,
    ))
    .expect("fill job should succeed");

    assert_eq!(result.op, "fill");
    assert_eq!(fs::read(&output).unwrap(), b"FILLED");
}

#[test]
fn test_run_job_unknown_tool_path() {
    let dir = tempdir().expect("create temp dir");
    let a = dir.path().join("a.pdf");
    touch(&a);

    let err = run_job(&job(
        JobTask::Merge {
            input_paths: vec![a],
        },
        dir.path().join("out.pdf"),
        &dir.path().join("no-such-pdftk"),
    ))
    .expect_err("missing tool should fail");
    assert!(matches!(err, PdfFillError::ToolNotFound(_)));
}

#[test]
fn test_run_all_jobs_continues_after_failure() {
    let dir = tempdir().expect("create temp dir");
    let pdftk = fake_pdftk(dir.path(), "OUT");
    let a = dir.path().join("a.pdf");
    touch(&a);

    let jobs = vec![
        job(
            JobTask::Merge {
                input_paths: vec![dir.path().join("missing.pdf")],
            },
            dir.path().join("first.pdf"),
            &pdftk,
        ),
        job(
            JobTask::Merge {
                input_paths: vec![a],
            },
            dir.path().join("second.pdf"),
            &pdftk,
        ),
    ];

    let results = run_all_jobs(&jobs, 2).expect("thread pool should build");

    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Err(PdfFillError::InputNotFound(_))));
    assert!(results[1].is_ok());
    assert_eq!(fs::read(dir.path().join("second.pdf")).unwrap(), b"OUT");
}
