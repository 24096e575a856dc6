use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Column names of the emitted samplesheet, in order.
pub const MANIFEST_HEADER: [&str; 3] = ["sample", "fastq_1", "fastq_2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadDirection {
    Forward,
    Reverse,
}

impl ReadDirection {
    pub fn column(self) -> &'static str {
        match self {
            ReadDirection::Forward => MANIFEST_HEADER[1],
            ReadDirection::Reverse => MANIFEST_HEADER[2],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleRecord {
    pub forward: Option<PathBuf>,
    pub reverse: Option<PathBuf>,
}

impl SampleRecord {
    /// Stores `path` in the slot for `direction`, returning whatever it replaced.
    pub fn assign(&mut self, direction: ReadDirection, path: PathBuf) -> Option<PathBuf> {
        let slot = match direction {
            ReadDirection::Forward => &mut self.forward,
            ReadDirection::Reverse => &mut self.reverse,
        };
        slot.replace(path)
    }

    pub fn is_paired(&self) -> bool {
        self.forward.is_some() && self.reverse.is_some()
    }
}

/// Samples keyed by identifier. Iteration order is lexicographic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSheet {
    samples: BTreeMap<String, SampleRecord>,
}

impl SampleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(
        &mut self,
        sample: &str,
        direction: ReadDirection,
        path: PathBuf,
    ) -> Option<PathBuf> {
        self.samples
            .entry(sample.to_string())
            .or_default()
            .assign(direction, path)
    }

    pub fn get(&self, sample: &str) -> Option<&SampleRecord> {
        self.samples.get(sample)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SampleRecord)> {
        self.samples
            .iter()
            .map(|(sample, record)| (sample.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn paired_count(&self) -> usize {
        self.samples.values().filter(|record| record.is_paired()).count()
    }
}

/// One output line of the samplesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRow {
    pub sample: String,
    pub fastq_1: String,
    pub fastq_2: String,
}

pub(crate) fn path_field(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{ReadDirection, SampleSheet};

    #[test]
    fn sheet_iterates_in_lexicographic_order() {
        let mut sheet = SampleSheet::new();
        sheet.assign("s2", ReadDirection::Forward, PathBuf::from("/d/s2_1.fq.gz"));
        sheet.assign("S1", ReadDirection::Forward, PathBuf::from("/d/S1_1.fq.gz"));
        sheet.assign("s10", ReadDirection::Forward, PathBuf::from("/d/s10_1.fq.gz"));

        let order: Vec<&str> = sheet.iter().map(|(sample, _)| sample).collect();
        assert_eq!(order, vec!["S1", "s10", "s2"]);
    }

    #[test]
    fn later_assignment_replaces_earlier_one() {
        let mut sheet = SampleSheet::new();
        assert!(sheet
            .assign("a", ReadDirection::Reverse, PathBuf::from("/x/a_2.fq.gz"))
            .is_none());
        let replaced = sheet.assign("a", ReadDirection::Reverse, PathBuf::from("/y/a_2.fq.gz"));

        assert_eq!(replaced, Some(PathBuf::from("/x/a_2.fq.gz")));
        let record = sheet.get("a").expect("sample a");
        assert_eq!(record.reverse, Some(PathBuf::from("/y/a_2.fq.gz")));
        assert!(record.forward.is_none());
        assert_eq!(sheet.paired_count(), 0);
    }
}
