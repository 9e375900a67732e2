//! Timeline reconstruction: concatenate the adjusted segments and remux.

use super::artifacts::{ArtifactNaming, ArtifactStage, SegmentArtifact};
use crate::error::Result;
use std::path::{Path, PathBuf};
use temposync_av::{ConcatManifest, MediaTool, OutputDir};

/// Joins tempo-adjusted segments back into one track.
pub struct Reconstructor<'a, T: MediaTool> {
    tool: &'a T,
    dir: &'a OutputDir,
    naming: &'a ArtifactNaming,
}

impl<'a, T: MediaTool> Reconstructor<'a, T> {
    pub fn new(tool: &'a T, dir: &'a OutputDir, naming: &'a ArtifactNaming) -> Self {
        Self { tool, dir, naming }
    }

    /// Manifest listing the adjusted segments in ascending index order.
    ///
    /// Entries are relative to the output directory, where the manifest lives.
    pub fn manifest(&self, adjusted: &[SegmentArtifact]) -> ConcatManifest {
        let mut ordered: Vec<&SegmentArtifact> = adjusted
            .iter()
            .filter(|a| a.stage == ArtifactStage::TempoAdjusted)
            .collect();
        ordered.sort_by_key(|a| a.index);

        ordered
            .into_iter()
            .map(|a| Path::new(".").join(self.naming.file_name(a.index, a.stage)))
            .collect()
    }

    /// Write the manifest and concatenate into `{concat_stem}.{ext}`.
    pub fn concatenate(
        &self,
        adjusted: &[SegmentArtifact],
        manifest_name: &str,
        concat_stem: &str,
    ) -> Result<PathBuf> {
        let manifest_path = self.dir.file(manifest_name);
        let manifest = self.manifest(adjusted);
        manifest.write_to(&manifest_path)?;

        let output = self.dir.file(&self.naming.with_extension(concat_stem));
        tracing::debug!(
            "Concatenating {} segments into {:?}",
            manifest.len(),
            output
        );
        self.tool.concat(&manifest_path, &output)?;

        Ok(output)
    }

    /// Pair the concatenated audio with the source picture track.
    ///
    /// The output is named after the source video and written to the
    /// output directory.
    pub fn mux(&self, audio: &Path, video: &Path) -> Result<PathBuf> {
        let file_name = video
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        let output = self.dir.file(&file_name);

        tracing::debug!("Muxing {:?} with picture of {:?} into {:?}", audio, video, output);
        self.tool.mux(audio, video, &output)?;

        Ok(output)
    }
}
