use std::io;
use std::path::PathBuf;

/// Fatal conditions that abort a samplesheet run.
///
/// Unrecognised file names are not errors; they are reported as warnings and
/// skipped by the classifier.
#[derive(Debug, thiserror::Error)]
pub enum SamplesheetError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No FASTQ files found under {}", .0.display())]
    NoFilesFound(PathBuf),

    #[error("No valid FASTQ pairs found")]
    NoSamplesClassified,

    #[error("Missing R1 for sample {sample}")]
    MissingForwardRead { sample: String },

    #[error("failed to resolve {}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write samplesheet to {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode samplesheet")]
    Csv(#[from] csv::Error),

    #[error("invalid FASTQ discovery pattern")]
    InvalidPattern(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, SamplesheetError>;
