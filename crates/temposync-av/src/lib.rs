//! # temposync-av
//!
//! Media tool plumbing for temposync.
//!
//! This crate provides:
//! - The [`MediaTool`] capability: cut, tempo change, concatenation and mux
//! - [`FfmpegTool`], the ffmpeg command-line implementation
//! - External tool detection ([`check_tool`], [`require_tool`])
//! - The per-run output directory ([`OutputDir`])
//! - Concat demuxer input lists ([`ConcatManifest`])
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use temposync_av::{CutRange, FfmpegTool, MediaTool, StreamSelector};
//!
//! let ffmpeg = FfmpegTool::default();
//! if ffmpeg.probe() {
//!     ffmpeg.cut(
//!         Path::new("movie.mp4"),
//!         CutRange::full(),
//!         StreamSelector::Audio,
//!         Path::new("movie_audio.aac"),
//!     )?;
//! }
//! # Ok::<(), temposync_av::Error>(())
//! ```

mod error;
pub mod ffmpeg;
pub mod manifest;
pub mod media_tool;
pub mod tools;
pub mod workspace;

// Re-exports
pub use error::{Error, Result};
pub use ffmpeg::{FfmpegOptions, FfmpegTool};
pub use manifest::ConcatManifest;
pub use media_tool::{CutRange, MediaTool, StreamSelector};
pub use tools::{check_tool, check_tools, get_tool_path, require_tool, ToolInfo};
pub use workspace::{ExistingOutput, OutputDir};
