//! Shared test harness for integration tests.
//!
//! Provides [`RecordingTool`], a [`MediaTool`] that records every call and
//! writes small placeholder files instead of running ffmpeg, and
//! [`Fixture`], a scratch directory with a video, an audio track and a
//! points document.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use temposync_av::{CutRange, Error, MediaTool, Result, StreamSelector};

/// One logical call made against the tool.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Probe,
    Cut {
        input: PathBuf,
        range: CutRange,
        streams: StreamSelector,
        output: PathBuf,
    },
    ChangeTempo {
        input: PathBuf,
        factor: f64,
        output: PathBuf,
    },
    Concat {
        manifest: PathBuf,
        output: PathBuf,
    },
    Mux {
        audio: PathBuf,
        video: PathBuf,
        output: PathBuf,
    },
}

/// Fake media backend.
///
/// Cuts write `cut <start> <length>`, tempo changes prefix the input with
/// `tempo <factor>`, concatenation joins the listed files and mux writes
/// the audio contents prefixed with `mux`.
#[derive(Debug, Default)]
pub struct RecordingTool {
    calls: RefCell<Vec<Call>>,
    unavailable: bool,
    fail_on_tempo: Cell<bool>,
}

impl RecordingTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Make every `change_tempo` call fail.
    pub fn failing_tempo(self) -> Self {
        self.fail_on_tempo.set(true);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls other than `Probe`.
    pub fn media_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| *c != Call::Probe)
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl MediaTool for RecordingTool {
    fn name(&self) -> String {
        "recording-tool".to_string()
    }

    fn probe(&self) -> bool {
        self.record(Call::Probe);
        !self.unavailable
    }

    fn cut(
        &self,
        input: &Path,
        range: CutRange,
        streams: StreamSelector,
        output: &Path,
    ) -> Result<()> {
        self.record(Call::Cut {
            input: input.to_path_buf(),
            range,
            streams,
            output: output.to_path_buf(),
        });
        std::fs::write(
            output,
            format!("cut {:?} {:?}\n", range.start, range.length),
        )?;
        Ok(())
    }

    fn change_tempo(&self, input: &Path, factor: f64, output: &Path) -> Result<()> {
        self.record(Call::ChangeTempo {
            input: input.to_path_buf(),
            factor,
            output: output.to_path_buf(),
        });
        if self.fail_on_tempo.get() {
            return Err(Error::tool_failed("recording-tool", "atempo rejected"));
        }
        let contents = std::fs::read_to_string(input)?;
        std::fs::write(output, format!("tempo {}\n{}", factor, contents))?;
        Ok(())
    }

    fn concat(&self, manifest: &Path, output: &Path) -> Result<()> {
        self.record(Call::Concat {
            manifest: manifest.to_path_buf(),
            output: output.to_path_buf(),
        });
        let base = manifest.parent().unwrap_or_else(|| Path::new("."));
        let mut joined = String::new();
        for entry in manifest_entries(manifest) {
            joined.push_str(&std::fs::read_to_string(base.join(entry))?);
        }
        std::fs::write(output, joined)?;
        Ok(())
    }

    fn mux(&self, audio: &Path, video: &Path, output: &Path) -> Result<()> {
        self.record(Call::Mux {
            audio: audio.to_path_buf(),
            video: video.to_path_buf(),
            output: output.to_path_buf(),
        });
        let contents = std::fs::read_to_string(audio)?;
        std::fs::write(output, format!("mux\n{}", contents))?;
        Ok(())
    }
}

/// File paths listed in a concat manifest, in listed order.
pub fn manifest_entries(manifest: &Path) -> Vec<String> {
    std::fs::read_to_string(manifest)
        .unwrap()
        .lines()
        .map(|line| {
            line.trim_start_matches("file '")
                .trim_end_matches('\'')
                .to_string()
        })
        .collect()
}

/// Scratch directory holding `clip.mp4`, `clip_audio.aac` and `points.json`.
pub struct Fixture {
    pub dir: TempDir,
    pub video: PathBuf,
    pub audio: PathBuf,
    pub points: PathBuf,
}

impl Fixture {
    pub fn new(points_json: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        let audio = dir.path().join("clip_audio.aac");
        let points = dir.path().join("points.json");
        std::fs::write(&video, b"video").unwrap();
        std::fs::write(&audio, b"audio").unwrap();
        std::fs::write(&points, points_json).unwrap();
        Self {
            dir,
            video,
            audio,
            points,
        }
    }

    /// Where a sync run writes its artifacts.
    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("clip.mp4-output")
    }
}
