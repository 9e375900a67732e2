use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub ffmpeg: FfmpegConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Explicit ffmpeg executable; looked up on PATH when unset
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Unit of the offsets in a points document
    #[serde(default)]
    pub offset_unit: OffsetUnit,

    /// Appended to the video file name to form the output directory
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Marks tempo-adjusted segment files: `{index}_{tempo_suffix}.{ext}`
    #[serde(default = "default_tempo_suffix")]
    pub tempo_suffix: String,

    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,

    /// File stem of the concatenated audio track
    #[serde(default = "default_concat_stem")]
    pub concat_stem: String,
}

fn default_output_suffix() -> String {
    "-output".to_string()
}
fn default_tempo_suffix() -> String {
    "tempo".to_string()
}
fn default_manifest_name() -> String {
    "concat_input.txt".to_string()
}
fn default_concat_stem() -> String {
    "concat".to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            offset_unit: OffsetUnit::default(),
            output_suffix: default_output_suffix(),
            tempo_suffix: default_tempo_suffix(),
            manifest_name: default_manifest_name(),
            concat_stem: default_concat_stem(),
        }
    }
}

/// How offsets in a points document map onto media time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    #[default]
    Milliseconds,
    Seconds,
}

impl OffsetUnit {
    /// Convert a validated (finite, non-negative) offset or length.
    ///
    /// `None` when the value does not fit in a `Duration`.
    pub fn to_duration(self, value: f64) -> Option<Duration> {
        let secs = match self {
            OffsetUnit::Milliseconds => value / 1000.0,
            OffsetUnit::Seconds => value,
        };
        Duration::try_from_secs_f64(secs).ok()
    }

    pub fn label(self) -> &'static str {
        match self {
            OffsetUnit::Milliseconds => "ms",
            OffsetUnit::Seconds => "s",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FfmpegConfig {
    #[serde(default = "default_strict_experimental")]
    pub strict_experimental: bool,

    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

fn default_strict_experimental() -> bool {
    true
}
fn default_loglevel() -> String {
    "error".to_string()
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self {
            strict_experimental: default_strict_experimental(),
            loglevel: default_loglevel(),
        }
    }
}

impl From<&FfmpegConfig> for temposync_av::FfmpegOptions {
    fn from(config: &FfmpegConfig) -> Self {
        Self {
            strict_experimental: config.strict_experimental,
            loglevel: config.loglevel.clone(),
        }
    }
}
