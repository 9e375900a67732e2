use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "temposync")]
#[command(author, version, about = "Re-time the audio of a video from tempo control points")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-time the audio track and remux it against the video's picture
    Sync {
        /// Video whose picture track is kept
        video: PathBuf,

        /// Audio track to re-time, usually extracted from the video
        audio: PathBuf,

        /// JSON document: {"points": [[offset, tempo], ...]}
        points: PathBuf,

        /// Replace an existing output directory
        #[arg(long)]
        force: bool,

        /// Validate and print the segment plan without running ffmpeg
        #[arg(long)]
        dry_run: bool,

        /// Print the dry-run plan as JSON
        #[arg(long, requires = "dry_run")]
        json: bool,
    },

    /// Split a video into a picture-only and an audio-only file
    Extract {
        /// Video to split
        video: PathBuf,

        /// Extension (and so container) of the audio file, e.g. aac
        audio_extension: String,

        /// Overwrite existing output files
        #[arg(long)]
        force: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        #[arg(value_name = "CONFIG")]
        file: Option<PathBuf>,
    },
}
