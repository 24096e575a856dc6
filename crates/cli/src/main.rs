use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use fastq_samplesheet_core::{build_samplesheet, SamplesheetOptions};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "fastq-samplesheet",
    version,
    about = "Create a sample,fastq_1,fastq_2 samplesheet from a directory of paired-end FASTQ files."
)]
struct Cli {
    /// Directory searched recursively for *.f*q.gz files.
    #[arg(short = 'i', long, value_name = "DIR")]
    input: PathBuf,

    /// Output samplesheet CSV (overwritten if it exists).
    #[arg(short = 'o', long, value_name = "FILE")]
    output: PathBuf,
}

impl From<Cli> for SamplesheetOptions {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            output: cli.output,
        }
    }
}

const FAILURE_CODE: u8 = 1;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(confirmation) => {
            println!("{confirmation}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", error_line(&err));
            ExitCode::from(FAILURE_CODE)
        }
    }
}

/// Builds the samplesheet and returns the confirmation line for stdout.
fn run(cli: Cli) -> Result<String> {
    let options = SamplesheetOptions::from(cli);
    let summary = build_samplesheet(&options)?;
    Ok(format!("Samplesheet written to {}", summary.output.display()))
}

fn error_line(err: &anyhow::Error) -> String {
    format!("ERROR: {err:#}")
}

// Diagnostics go to stderr; stdout carries only the confirmation line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use std::fs;

    use clap::{CommandFactory, Parser};
    use tempfile::TempDir;

    use super::{error_line, run, Cli, FAILURE_CODE};

    fn cli(input: PathBuf, output: PathBuf) -> Cli {
        Cli { input, output }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_and_long_flags_parse() {
        let short = Cli::try_parse_from(["fastq-samplesheet", "-i", "reads", "-o", "s.csv"])
            .expect("short flags");
        assert_eq!(short.input, PathBuf::from("reads"));
        assert_eq!(short.output, PathBuf::from("s.csv"));

        let long = Cli::try_parse_from([
            "fastq-samplesheet",
            "--input",
            "reads",
            "--output",
            "s.csv",
        ])
        .expect("long flags");
        assert_eq!(long.input, PathBuf::from("reads"));
    }

    #[test]
    fn both_flags_are_required() {
        assert!(Cli::try_parse_from(["fastq-samplesheet", "-i", "reads"]).is_err());
        assert!(Cli::try_parse_from(["fastq-samplesheet", "-o", "s.csv"]).is_err());
    }

    #[test]
    fn successful_run_confirms_the_output_path() {
        let reads = TempDir::new().expect("tempdir");
        fs::write(reads.path().join("s1_R1.fastq.gz"), b"").expect("write r1");
        fs::write(reads.path().join("s1_R2.fastq.gz"), b"").expect("write r2");
        let output = reads.path().join("samplesheet.csv");

        let confirmation = run(cli(reads.path().to_path_buf(), output.clone())).expect("run");

        assert_eq!(
            confirmation,
            format!("Samplesheet written to {}", output.display())
        );
        let content = fs::read_to_string(&output).expect("read samplesheet");
        assert_eq!(content.lines().count(), 2);
        assert!(content.starts_with("sample,fastq_1,fastq_2\ns1,"));
    }

    #[test]
    fn reverse_only_sample_reports_one_error_line() {
        let reads = TempDir::new().expect("tempdir");
        fs::write(reads.path().join("orphan_R2.fastq.gz"), b"").expect("write r2");
        let output = reads.path().join("samplesheet.csv");

        let err = run(cli(reads.path().to_path_buf(), output.clone())).expect_err("orphan R2");
        let line = error_line(&err);

        assert_eq!(line, "ERROR: Missing R1 for sample orphan");
        assert!(!line.contains('\n'));
        assert_eq!(FAILURE_CODE, 1);
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_reports_the_directory() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("absent");

        let err = run(cli(missing.clone(), temp.path().join("s.csv"))).expect_err("missing dir");

        assert_eq!(
            error_line(&err),
            format!("ERROR: Directory not found: {}", missing.display())
        );
    }
}
