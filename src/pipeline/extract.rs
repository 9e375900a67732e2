//! Splitting a video into a picture-only and an audio-only file.

use super::executor::{require_file, ProgressCallback};
use crate::error::{Result, SyncError};
use std::path::{Path, PathBuf};
use temposync_av::{CutRange, MediaTool, StreamSelector};

/// Files written by [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    pub video: PathBuf,
    pub audio: PathBuf,
}

/// `<base>_video.<ext>` and `<base>_audio.<audio_extension>` next to `video`.
pub fn extract_paths(video: &Path, audio_extension: &str) -> Result<ExtractReport> {
    let audio_extension = audio_extension.trim_start_matches('.');
    if audio_extension.is_empty() || audio_extension.contains(['/', '\\']) {
        return Err(SyncError::Usage(format!(
            "Expected an audio extension such as `aac` but got {:?}",
            audio_extension
        )));
    }

    let stem = video
        .file_stem()
        .ok_or_else(|| SyncError::MissingInputFile {
            path: video.to_path_buf(),
        })?
        .to_string_lossy();

    let mut video_name = format!("{}_video", stem);
    if let Some(ext) = video.extension() {
        video_name.push('.');
        video_name.push_str(&ext.to_string_lossy());
    }

    Ok(ExtractReport {
        video: video.with_file_name(video_name),
        audio: video.with_file_name(format!("{}_audio.{}", stem, audio_extension)),
    })
}

/// Stream-copy the picture and the audio of `video` into separate files.
///
/// Existing output files are only overwritten when `force` is set.
pub fn extract<T: MediaTool>(
    tool: &T,
    video: &Path,
    audio_extension: &str,
    force: bool,
    progress: Option<&ProgressCallback>,
) -> Result<ExtractReport> {
    let report_progress = |value: f32, step: &str| {
        if let Some(cb) = progress {
            cb(value, step);
        }
        tracing::info!("[{:.0}%] {}", value, step);
    };

    report_progress(0.0, "Validating");
    require_file(video)?;
    let report = extract_paths(video, audio_extension)?;

    if !force {
        for path in [&report.video, &report.audio] {
            if path.exists() {
                return Err(SyncError::OutputAlreadyExists { path: path.clone() });
            }
        }
    }

    if !tool.probe() {
        return Err(SyncError::ToolUnavailable { tool: tool.name() });
    }

    report_progress(33.0, "Extracting video");
    tool.cut(video, CutRange::full(), StreamSelector::Video, &report.video)?;

    report_progress(66.0, "Extracting audio");
    tool.cut(video, CutRange::full(), StreamSelector::Audio, &report.audio)?;

    report_progress(100.0, "Done");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_paths() {
        let report = extract_paths(Path::new("/videos/clip.mp4"), "aac").unwrap();
        assert_eq!(report.video, Path::new("/videos/clip_video.mp4"));
        assert_eq!(report.audio, Path::new("/videos/clip_audio.aac"));
    }

    #[test]
    fn test_extract_paths_accepts_dotted_extension() {
        let report = extract_paths(Path::new("clip.mkv"), ".opus").unwrap();
        assert_eq!(report.audio, Path::new("clip_audio.opus"));
    }

    #[test]
    fn test_extract_paths_rejects_empty_extension() {
        assert!(matches!(
            extract_paths(Path::new("clip.mp4"), ""),
            Err(SyncError::Usage(_))
        ));
    }
}
