use super::types::{AlignmentResult, FingerprintSet};
use crate::errors::{IoError, SubsyncResult};
use crate::subtitles::format_timestamp;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// A landmark time in both machine and SRT form
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Landmark {
    pub ms: u64,
    pub timestamp: String,
}

impl Landmark {
    pub fn new(ms: u64) -> Self {
        Self {
            ms,
            timestamp: format_timestamp(ms),
        }
    }
}

/// Landmarks the winning hypothesis anchored on
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Anchors {
    pub synced: [Landmark; 2],
    pub target: [Landmark; 2],
}

/// Everything needed to audit an alignment decision without re-running it
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AlignmentReport {
    pub synced_landmarks: Vec<Landmark>,
    pub target_landmarks: Vec<Landmark>,
    pub anchors: Anchors,
    pub alignment: AlignmentResult,
}

impl AlignmentReport {
    pub fn new(synced: &FingerprintSet, target: &FingerprintSet, alignment: AlignmentResult) -> Self {
        let (i, j) = alignment.correspondence.synced;
        let (n, m) = alignment.correspondence.target;
        let at = |set: &FingerprintSet, idx: usize| Landmark::new(set.get(idx).unwrap_or_default());

        Self {
            synced_landmarks: synced.as_slice().iter().copied().map(Landmark::new).collect(),
            target_landmarks: target.as_slice().iter().copied().map(Landmark::new).collect(),
            anchors: Anchors {
                synced: [at(synced, i), at(synced, j)],
                target: [at(target, n), at(target, m)],
            },
            alignment,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report as pretty JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> SubsyncResult<()> {
        let path = path.as_ref();
        let json = self
            .to_json()
            .map_err(|e| IoError::new(path, io::Error::from(e)))?;
        fs::write(path, json).map_err(|e| IoError::new(path, e))?;
        Ok(())
    }
}
