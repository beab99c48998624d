use std::path::Path;
use std::process::ExitCode;

use pdf_fill::config::job::JobFile;
use pdf_fill::config::{self};
use pdf_fill::pipeline::job_runner::JobConfig;
use pdf_fill::pipeline::orchestrator::run_all_jobs;

const USAGE: &str = "Usage: pdf_fill <jobs.yaml>...
  Fill, stamp and merge PDF files with pdftk according to job specifications.
  Set RUST_LOG (e.g. RUST_LOG=pdf_fill=debug) to control log output.";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_fill=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("{USAGE}");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("pdf_fill {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let mut job_configs: Vec<JobConfig> = Vec::new();
    let mut parallel_workers = 0;

    for job_file_arg in &args {
        let job_file_path = Path::new(job_file_arg);

        // Load settings from the same directory as the job file.
        let settings = match config::load_settings_for_job(job_file_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("ERROR: Failed to load settings for {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };
        parallel_workers = parallel_workers.max(settings.parallel_workers);

        let yaml_content = match std::fs::read_to_string(job_file_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("ERROR: Failed to read job file {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let job_file: JobFile = match serde_yml::from_str(&yaml_content) {
            Ok(jf) => jf,
            Err(e) => {
                eprintln!("ERROR: Failed to parse job file {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        // Resolve job file directory for relative paths.
        let job_dir = job_file_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        for job in &job_file.jobs {
            match JobConfig::from_job(&job_dir, job, &settings) {
                Ok(jc) => job_configs.push(jc),
                Err(e) => {
                    eprintln!("ERROR: {job_file_arg}: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    let results = match run_all_jobs(&job_configs, parallel_workers) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut has_error = false;
    for (job, result) in job_configs.iter().zip(&results) {
        match result {
            Ok(job_result) => {
                eprintln!(
                    "OK: {} -> {}",
                    job_result.op,
                    job_result.output_path.display()
                );
            }
            Err(e) => {
                eprintln!(
                    "ERROR: {} -> {}: {e}",
                    job.task.op_name(),
                    job.output_path.display()
                );
                has_error = true;
            }
        }
    }

    if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
