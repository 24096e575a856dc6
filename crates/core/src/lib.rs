pub mod classify;
pub mod error;
pub mod manifest;
pub mod model;
pub mod pipeline;
pub mod scan;

pub use classify::{classify_file_name, classify_files, Classification, Classified};
pub use error::{Result, SamplesheetError};
pub use manifest::{build_rows, render_manifest, write_manifest};
pub use model::{ManifestRow, ReadDirection, SampleRecord, SampleSheet, MANIFEST_HEADER};
pub use pipeline::{build_samplesheet, SamplesheetOptions, SamplesheetSummary};
pub use scan::{discover_fastq_files, FastqMatcher, FASTQ_GLOB};
