use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{Result, SamplesheetError};
use crate::model::{ReadDirection, SampleSheet};

static FORWARD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)(_R?1)(_001)?\.f(ast)?q\.gz$").expect("forward read pattern compiles")
});

static REVERSE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)(_R?2)(_001)?\.f(ast)?q\.gz$").expect("reverse read pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub sample: String,
    pub direction: ReadDirection,
}

/// Infers sample identifier and read direction from a FASTQ file name.
///
/// The forward pattern is tried first, so a name matching both is forward.
pub fn classify_file_name(name: &str) -> Option<Classification> {
    [
        (&*FORWARD_PATTERN, ReadDirection::Forward),
        (&*REVERSE_PATTERN, ReadDirection::Reverse),
    ]
    .into_iter()
    .find_map(|(pattern, direction)| {
        pattern.captures(name).map(|captures| Classification {
            sample: captures[1].to_string(),
            direction,
        })
    })
}

#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub sheet: SampleSheet,
    /// File names that matched neither read pattern.
    pub skipped: Vec<String>,
}

/// Groups discovered files by sample, storing canonical absolute paths.
pub fn classify_files<P: AsRef<Path>>(files: &[P]) -> Result<Classified> {
    let mut classified = Classified::default();

    for file in files {
        let path = file.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let classification = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(classify_file_name);
        let Some(Classification { sample, direction }) = classification else {
            warn!("Skipping unrecognised file: {name}");
            classified.skipped.push(name);
            continue;
        };

        let resolved = resolve(path)?;
        debug!(
            "{} -> sample {} ({})",
            resolved.display(),
            sample,
            direction.column()
        );
        if let Some(previous) = classified.sheet.assign(&sample, direction, resolved) {
            debug!(
                "sample {} {} replaced {}",
                sample,
                direction.column(),
                previous.display()
            );
        }
    }

    if classified.sheet.is_empty() {
        return Err(SamplesheetError::NoSamplesClassified);
    }

    info!(
        "classified {} sample(s), skipped {} file(s)",
        classified.sheet.len(),
        classified.skipped.len()
    );
    Ok(classified)
}

fn resolve(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|source| SamplesheetError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}
