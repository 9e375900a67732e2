//! The media tool capability.
//!
//! Everything temposync does to media goes through [`MediaTool`]: sub-range
//! extraction, tempo stretching, gap-free concatenation and remuxing. The
//! planning code never sees command lines or codecs, so any backend that
//! can perform these five calls can be swapped in.

use crate::Result;
use std::path::Path;
use std::time::Duration;

/// Which elementary streams a [`MediaTool::cut`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSelector {
    /// Audio streams only.
    Audio,
    /// Picture streams only.
    Video,
}

/// A sub-range of a media file, measured from its start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutRange {
    /// Where the cut starts.
    pub start: Duration,
    /// How much to keep. `None` runs to the end of the input.
    pub length: Option<Duration>,
}

impl CutRange {
    /// The whole input.
    pub fn full() -> Self {
        Self {
            start: Duration::ZERO,
            length: None,
        }
    }

    /// `[start, start + length)`.
    pub fn bounded(start: Duration, length: Duration) -> Self {
        Self {
            start,
            length: Some(length),
        }
    }

    /// `[start, end of input)`.
    pub fn open_ended(start: Duration) -> Self {
        Self {
            start,
            length: None,
        }
    }
}

/// Logical operations the re-timing pipeline needs from a media backend.
///
/// Every call is synchronous and blocking. Implementations must not
/// re-encode in `cut`, `concat` and `mux`.
pub trait MediaTool {
    /// Name used in diagnostics.
    fn name(&self) -> String {
        "media tool".to_string()
    }

    /// Whether the backend can be used at all.
    fn probe(&self) -> bool;

    /// Stream-copy `range` of the selected streams of `input` into `output`.
    fn cut(
        &self,
        input: &Path,
        range: CutRange,
        streams: StreamSelector,
        output: &Path,
    ) -> Result<()>;

    /// Time-stretch the audio of `input` by `factor` (2.0 plays twice as fast).
    fn change_tempo(&self, input: &Path, factor: f64, output: &Path) -> Result<()>;

    /// Concatenate the files listed in `manifest`, in listed order, without gaps.
    fn concat(&self, manifest: &Path, output: &Path) -> Result<()>;

    /// Pair the audio of `audio` with the picture of `video`, copying both.
    fn mux(&self, audio: &Path, video: &Path, output: &Path) -> Result<()>;
}

impl<T: MediaTool + ?Sized> MediaTool for &T {
    fn name(&self) -> String {
        (**self).name()
    }

    fn probe(&self) -> bool {
        (**self).probe()
    }

    fn cut(
        &self,
        input: &Path,
        range: CutRange,
        streams: StreamSelector,
        output: &Path,
    ) -> Result<()> {
        (**self).cut(input, range, streams, output)
    }

    fn change_tempo(&self, input: &Path, factor: f64, output: &Path) -> Result<()> {
        (**self).change_tempo(input, factor, output)
    }

    fn concat(&self, manifest: &Path, output: &Path) -> Result<()> {
        (**self).concat(manifest, output)
    }

    fn mux(&self, audio: &Path, video: &Path, output: &Path) -> Result<()> {
        (**self).mux(audio, video, output)
    }
}
