//! Per-run output directory management.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// What to do when the output directory is already there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingOutput {
    /// Refuse to run.
    #[default]
    Reject,
    /// Delete it and start from an empty directory.
    Replace,
}

/// Directory that receives every artifact of one run.
///
/// Unlike a temporary workspace, the directory is left in place after the
/// run (and after a failure) so intermediate files can be inspected.
///
/// # Example
///
/// ```no_run
/// use temposync_av::{ExistingOutput, OutputDir};
///
/// let dir = OutputDir::for_video("/videos/clip.mp4", "-output")?;
/// dir.check(ExistingOutput::Reject)?;
/// dir.prepare(ExistingOutput::Reject)?;
/// let part = dir.file("0.aac");
/// # Ok::<(), temposync_av::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Use an explicit directory path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `<video dir>/<video file name><suffix>`.
    pub fn for_video<P: AsRef<Path>>(video: P, suffix: &str) -> Result<Self> {
        let video = video.as_ref();
        let file_name = video
            .file_name()
            .ok_or_else(|| Error::InvalidInput(format!("Invalid video file path: {:?}", video)))?;

        let mut dir_name = file_name.to_os_string();
        dir_name.push(suffix);

        let parent = video.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self::new(parent.join(dir_name)))
    }

    /// The directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A file path inside the directory.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Whether anything exists at the directory path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Enforce the policy without touching the filesystem.
    pub fn check(&self, policy: ExistingOutput) -> Result<()> {
        if policy == ExistingOutput::Reject && self.exists() {
            return Err(Error::OutputExists {
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    /// Enforce the policy, clear a stale directory if allowed, and create it.
    pub fn prepare(&self, policy: ExistingOutput) -> Result<()> {
        self.check(policy)?;

        if self.exists() {
            #[cfg(feature = "tracing")]
            tracing::info!("Removing existing output directory {:?}", self.path);

            let removed = if self.path.is_dir() {
                std::fs::remove_dir_all(&self.path)
            } else {
                std::fs::remove_file(&self.path)
            };
            removed.map_err(|e| {
                Error::Workspace(format!("Failed to remove {:?}: {}", self.path, e))
            })?;
        }

        std::fs::create_dir_all(&self.path)
            .map_err(|e| Error::Workspace(format!("Failed to create {:?}: {}", self.path, e)))?;

        #[cfg(feature = "tracing")]
        tracing::debug!("Created output directory {:?}", self.path);

        Ok(())
    }
}
