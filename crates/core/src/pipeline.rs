use std::path::PathBuf;

use tracing::info;

use crate::classify::classify_files;
use crate::error::Result;
use crate::manifest::{build_rows, write_manifest};
use crate::scan::discover_fastq_files;

#[derive(Debug, Clone)]
pub struct SamplesheetOptions {
    /// Directory scanned recursively for FASTQ files.
    pub input: PathBuf,
    /// Destination CSV, replaced if it exists.
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplesheetSummary {
    pub output: PathBuf,
    pub files_discovered: usize,
    pub samples: usize,
    pub paired_samples: usize,
    pub skipped: Vec<String>,
}

/// Scans `options.input`, groups reads by sample and writes the samplesheet.
///
/// Every check runs before the output is touched, so a failed run leaves any
/// existing file at `options.output` as it was.
pub fn build_samplesheet(options: &SamplesheetOptions) -> Result<SamplesheetSummary> {
    let files = discover_fastq_files(&options.input)?;
    let classified = classify_files(&files)?;
    let rows = build_rows(&classified.sheet)?;
    write_manifest(&rows, &options.output)?;

    let summary = SamplesheetSummary {
        output: options.output.clone(),
        files_discovered: files.len(),
        samples: classified.sheet.len(),
        paired_samples: classified.sheet.paired_count(),
        skipped: classified.skipped,
    };
    info!(
        "samplesheet: {} sample(s), {} paired, {} file(s) skipped",
        summary.samples,
        summary.paired_samples,
        summary.skipped.len()
    );
    Ok(summary)
}
