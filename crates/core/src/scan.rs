use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, SamplesheetError};

/// Case-sensitive file-name pattern for gzip-compressed FASTQ candidates.
pub const FASTQ_GLOB: &str = "*.f*q.gz";

/// Matches file names against [`FASTQ_GLOB`].
pub struct FastqMatcher {
    globset: GlobSet,
}

impl FastqMatcher {
    pub fn new() -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        builder.add(Glob::new(FASTQ_GLOB)?);
        Ok(Self {
            globset: builder.build()?,
        })
    }

    /// Only the final path component is considered.
    pub fn is_match(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.globset.is_match(Path::new(name)))
    }
}

/// Recursively collects FASTQ candidates below `root`.
///
/// Entries are visited in file-name order within each directory. Unreadable
/// subdirectories are reported and skipped.
pub fn discover_fastq_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(SamplesheetError::DirectoryNotFound(root.to_path_buf()));
    }

    let matcher = FastqMatcher::new()?;
    let mut files = Vec::new();
    let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                warn!("walk error under {}: {}", root.display(), err);
                continue;
            }
        };
        if entry.depth() == 0 || entry.file_type().is_dir() || !matcher.is_match(entry.path()) {
            continue;
        }
        if !is_file_like(&entry) {
            warn!(
                "Skipping {}: not a regular file or a link to one",
                entry.path().display()
            );
            continue;
        }
        debug!("found FASTQ candidate {}", entry.path().display());
        files.push(entry.into_path());
    }

    if files.is_empty() {
        return Err(SamplesheetError::NoFilesFound(root.to_path_buf()));
    }

    info!(
        "discovered {} FASTQ file(s) under {}",
        files.len(),
        root.display()
    );
    Ok(files)
}

// Symlinks count when their target is a regular file.
fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}
