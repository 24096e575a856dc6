use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use tempfile::{Builder, NamedTempFile};
use tracing::info;

use crate::error::{Result, SamplesheetError};
use crate::model::{path_field, ManifestRow, SampleSheet, MANIFEST_HEADER};

/// Turns the sheet into output rows, failing on the first sample (in sorted
/// order) that has no forward read.
pub fn build_rows(sheet: &SampleSheet) -> Result<Vec<ManifestRow>> {
    sheet
        .iter()
        .map(|(sample, record)| -> Result<ManifestRow> {
            let Some(forward) = record.forward.as_deref() else {
                return Err(SamplesheetError::MissingForwardRead {
                    sample: sample.to_string(),
                });
            };
            Ok(ManifestRow {
                sample: sample.to_string(),
                fastq_1: path_field(forward),
                fastq_2: record.reverse.as_deref().map(path_field).unwrap_or_default(),
            })
        })
        .collect()
}

/// Writes the header and rows as CSV with `\n` line endings.
pub fn render_manifest<W: Write>(rows: &[ManifestRow], writer: W) -> Result<()> {
    let mut csv = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    csv.write_record(MANIFEST_HEADER)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Replaces `output` with the rendered manifest. The file only appears once
/// it is complete. A symlinked `output` is written through to its target, and
/// the file keeps the mode a plain create (or the file it replaces) would have.
pub fn write_manifest(rows: &[ManifestRow], output: &Path) -> Result<()> {
    let write_err = |source| SamplesheetError::Write {
        path: output.to_path_buf(),
        source,
    };

    let mut encoded = Vec::new();
    render_manifest(rows, &mut encoded)?;

    let target = resolve_output(output).map_err(write_err)?;
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = stage_file(parent, &target).map_err(write_err)?;
    staged.write_all(&encoded).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;
    staged
        .persist(&target)
        .map_err(|err| write_err(err.error))?;

    info!("wrote {} row(s) to {}", rows.len(), output.display());
    Ok(())
}

// Follows a symlinked output to the file it points at, including a dangling
// link whose target does not exist yet.
fn resolve_output(output: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(output) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            match fs::canonicalize(output) {
                Ok(target) => Ok(target),
                Err(_) => {
                    let link = fs::read_link(output)?;
                    Ok(output.parent().map_or(link.clone(), |parent| parent.join(&link)))
                }
            }
        }
        _ => Ok(output.to_path_buf()),
    }
}

fn stage_file(dir: &Path, target: &Path) -> io::Result<NamedTempFile> {
    let existing = fs::metadata(target).ok().map(|metadata| metadata.permissions());

    let mut builder = Builder::new();
    builder.prefix(".samplesheet");
    if existing.is_none() {
        default_create_mode(&mut builder);
    }
    let staged = builder.tempfile_in(dir)?;
    if let Some(permissions) = existing {
        staged.as_file().set_permissions(permissions)?;
    }
    Ok(staged)
}

// open(2) masks the requested mode with the umask, as File::create does.
#[cfg(unix)]
fn default_create_mode(builder: &mut Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(fs::Permissions::from_mode(0o666));
}

#[cfg(not(unix))]
fn default_create_mode(_builder: &mut Builder<'_, '_>) {}
