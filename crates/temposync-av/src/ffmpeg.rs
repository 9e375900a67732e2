//! [`MediaTool`] backed by the ffmpeg command line.

use crate::media_tool::{CutRange, MediaTool, StreamSelector};
use crate::tools::check_tool_with_arg;
use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

/// Flags shared by every ffmpeg invocation.
#[derive(Debug, Clone)]
pub struct FfmpegOptions {
    /// Pass `-strict experimental` so older builds accept experimental encoders.
    pub strict_experimental: bool,
    /// Value for `-loglevel`.
    pub loglevel: String,
}

impl Default for FfmpegOptions {
    fn default() -> Self {
        Self {
            strict_experimental: true,
            loglevel: "error".to_string(),
        }
    }
}

/// Runs ffmpeg as a child process, one blocking invocation per call.
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    program: PathBuf,
    options: FfmpegOptions,
}

impl FfmpegTool {
    /// Create a tool for the given ffmpeg executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            options: FfmpegOptions::default(),
        }
    }

    /// Replace the shared flags.
    pub fn with_options(mut self, options: FfmpegOptions) -> Self {
        self.options = options;
        self
    }

    /// Path (or bare name) of the executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn base_args(&self) -> Vec<OsString> {
        vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-y".into(),
            "-loglevel".into(),
            self.options.loglevel.clone().into(),
        ]
    }

    fn finish_args(&self, args: &mut Vec<OsString>, output: &Path) {
        if self.options.strict_experimental {
            args.push("-strict".into());
            args.push("experimental".into());
        }
        args.push(output.into());
    }

    /// Arguments for a stream-copy cut.
    pub fn cut_args(
        &self,
        input: &Path,
        range: CutRange,
        streams: StreamSelector,
        output: &Path,
    ) -> Vec<OsString> {
        let mut args = self.base_args();
        args.push("-i".into());
        args.push(input.into());

        if range.start > Duration::ZERO {
            args.push("-ss".into());
            args.push(seconds(range.start).into());
        }
        if let Some(length) = range.length {
            args.push("-t".into());
            args.push(seconds(length).into());
        }

        match streams {
            StreamSelector::Audio => {
                args.extend(["-vn", "-c:a", "copy"].map(OsString::from));
            }
            StreamSelector::Video => {
                args.extend(["-an", "-c:v", "copy"].map(OsString::from));
            }
        }

        self.finish_args(&mut args, output);
        args
    }

    /// Arguments for an `atempo` stretch.
    pub fn tempo_args(&self, input: &Path, factor: f64, output: &Path) -> Vec<OsString> {
        let mut args = self.base_args();
        args.push("-i".into());
        args.push(input.into());
        args.push("-vn".into());
        args.push("-filter:a".into());
        args.push(format!("atempo={}", factor).into());
        self.finish_args(&mut args, output);
        args
    }

    /// Arguments for concat-demuxer concatenation.
    pub fn concat_args(&self, manifest: &Path, output: &Path) -> Vec<OsString> {
        let mut args = self.base_args();
        args.extend(["-f", "concat", "-safe", "0", "-i"].map(OsString::from));
        args.push(manifest.into());
        args.extend(["-c", "copy"].map(OsString::from));
        self.finish_args(&mut args, output);
        args
    }

    /// Arguments for pairing new audio with the original picture.
    pub fn mux_args(&self, audio: &Path, video: &Path, output: &Path) -> Vec<OsString> {
        let mut args = self.base_args();
        args.push("-i".into());
        args.push(audio.into());
        args.push("-i".into());
        args.push(video.into());
        args.extend(["-map", "0:a:0", "-map", "1:v:0", "-c", "copy"].map(OsString::from));
        self.finish_args(&mut args, output);
        args
    }

    fn run(&self, args: Vec<OsString>) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!("Running {:?} {:?}", self.program, args);

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(self.program.to_string_lossy())
                } else {
                    Error::Io(e)
                }
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::tool_failed(
                "ffmpeg",
                format!("exited with status {}: {}", result.status, stderr.trim()),
            ));
        }

        Ok(())
    }
}

impl Default for FfmpegTool {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl MediaTool for FfmpegTool {
    fn name(&self) -> String {
        self.program.display().to_string()
    }

    fn probe(&self) -> bool {
        check_tool_with_arg(&self.program, "-version").available
    }

    fn cut(
        &self,
        input: &Path,
        range: CutRange,
        streams: StreamSelector,
        output: &Path,
    ) -> Result<()> {
        if !input.exists() {
            return Err(Error::file_not_found(input));
        }
        self.run(self.cut_args(input, range, streams, output))
    }

    fn change_tempo(&self, input: &Path, factor: f64, output: &Path) -> Result<()> {
        if !input.exists() {
            return Err(Error::file_not_found(input));
        }
        self.run(self.tempo_args(input, factor, output))
    }

    fn concat(&self, manifest: &Path, output: &Path) -> Result<()> {
        if !manifest.exists() {
            return Err(Error::file_not_found(manifest));
        }
        self.run(self.concat_args(manifest, output))
    }

    fn mux(&self, audio: &Path, video: &Path, output: &Path) -> Result<()> {
        for input in [audio, video] {
            if !input.exists() {
                return Err(Error::file_not_found(input));
            }
        }
        self.run(self.mux_args(audio, video, output))
    }
}

/// Seconds as ffmpeg's `-ss`/`-t` accept them.
fn seconds(d: Duration) -> String {
    d.as_secs_f64().to_string()
}
