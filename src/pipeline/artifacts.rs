//! Deterministic names for per-segment files.
//!
//! Concatenation order comes from segment indices, never from listing the
//! output directory, so names only have to be unique per `(index, stage)`.

use std::path::{Path, PathBuf};

/// Which step produced a segment file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactStage {
    /// Stream-copied slice of the source audio.
    RawCut,
    /// The raw cut after the tempo change (or a copy of it at tempo 1).
    TempoAdjusted,
}

/// A file written for one segment. Never modified after it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentArtifact {
    pub index: usize,
    pub stage: ArtifactStage,
    pub path: PathBuf,
}

/// Naming scheme for one run: `{index}.{ext}` and `{index}_{suffix}.{ext}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNaming {
    extension: String,
    tempo_suffix: String,
}

impl ArtifactNaming {
    pub fn new(extension: impl Into<String>, tempo_suffix: impl Into<String>) -> Self {
        Self {
            extension: extension.into().trim_start_matches('.').to_string(),
            tempo_suffix: tempo_suffix.into(),
        }
    }

    /// Take the extension from the source audio file (`track.aac` -> `aac`).
    pub fn for_audio(audio: &Path, tempo_suffix: impl Into<String>) -> Self {
        let extension = audio
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::new(extension, tempo_suffix)
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name of a segment artifact.
    pub fn file_name(&self, index: usize, stage: ArtifactStage) -> String {
        match stage {
            ArtifactStage::RawCut => self.with_extension(index.to_string()),
            ArtifactStage::TempoAdjusted => {
                self.with_extension(format!("{}_{}", index, self.tempo_suffix))
            }
        }
    }

    /// File name of any other audio file of the run, e.g. the concatenation.
    pub fn with_extension(&self, stem: impl Into<String>) -> String {
        let mut name = stem.into();
        if !self.extension.is_empty() {
            name.push('.');
            name.push_str(&self.extension);
        }
        name
    }
}
