use super::artifacts::ArtifactNaming;
use super::materialize::{self, Materializer};
use super::reconstruct::Reconstructor;
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::plan::{self, Segment};
use crate::points;
use std::path::{Path, PathBuf};
use temposync_av::{ExistingOutput, MediaTool, OutputDir};

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(f32, &str) + Send + Sync>;

/// Inputs of one sync run.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub video: PathBuf,
    pub audio: PathBuf,
    pub points: PathBuf,
    pub existing_output: ExistingOutput,
    /// Validate and plan only.
    pub dry_run: bool,
}

impl SyncRequest {
    pub fn new(
        video: impl Into<PathBuf>,
        audio: impl Into<PathBuf>,
        points: impl Into<PathBuf>,
    ) -> Self {
        Self {
            video: video.into(),
            audio: audio.into(),
            points: points.into(),
            existing_output: ExistingOutput::Reject,
            dry_run: false,
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.existing_output = if force {
            ExistingOutput::Replace
        } else {
            ExistingOutput::Reject
        };
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub output_dir: PathBuf,
    /// Remuxed video inside `output_dir`.
    pub output: PathBuf,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// Dry run: the plan that would have been executed.
    Planned {
        output_dir: PathBuf,
        segments: Vec<Segment>,
    },
    Completed(SyncReport),
}

/// Validate, plan, materialize and reconstruct, strictly in that order.
pub struct SyncPipeline<T: MediaTool> {
    tool: T,
    config: SyncConfig,
    progress_callback: Option<ProgressCallback>,
}

impl<T: MediaTool> SyncPipeline<T> {
    pub fn new(tool: T, config: SyncConfig) -> Self {
        Self {
            tool,
            config,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn report_progress(&self, progress: f32, step: &str) {
        if let Some(ref cb) = self.progress_callback {
            cb(progress, step);
        }
        tracing::info!("[{:.0}%] {}", progress, step);
    }

    /// Run the whole pipeline.
    ///
    /// Nothing is written until every input has been validated and the
    /// plan exists. Failures after that point leave the partial artifacts
    /// in the output directory.
    pub fn run(&self, request: &SyncRequest) -> Result<SyncOutcome> {
        self.report_progress(0.0, "Validating");

        for path in [&request.video, &request.audio, &request.points] {
            require_file(path)?;
        }

        let dir = OutputDir::for_video(&request.video, &self.config.output_suffix)?;

        if !request.dry_run {
            dir.check(request.existing_output)?;

            if !self.tool.probe() {
                return Err(SyncError::ToolUnavailable {
                    tool: self.tool.name(),
                });
            }
        }

        let points = points::load_points(&request.points)?;
        let segments = plan::plan(&points);
        let ranges = materialize::cut_ranges(&points, &segments, self.config.offset_unit)
            .map_err(|source| SyncError::InvalidPoints {
                path: request.points.clone(),
                source,
            })?;

        if request.dry_run {
            tracing::info!("[DRY RUN] Would process {} segments", segments.len());
            return Ok(SyncOutcome::Planned {
                output_dir: dir.path().to_path_buf(),
                segments,
            });
        }

        if plan::changes_tempo(&segments) {
            tracing::warn!(
                "Only the audio track is re-timed; the video keeps its original speed and \
                 will drift from the new audio"
            );
        }

        dir.prepare(request.existing_output)?;

        let naming = ArtifactNaming::for_audio(&request.audio, self.config.tempo_suffix.clone());
        let materializer = Materializer::new(&self.tool, &dir, &naming);

        self.report_progress(20.0, "Cutting audio");
        let raw = materializer.cut_all(&request.audio, &segments, &ranges)?;

        self.report_progress(40.0, "Changing tempo");
        let adjusted = materializer.adjust_all(&segments, &raw)?;

        let reconstructor = Reconstructor::new(&self.tool, &dir, &naming);

        self.report_progress(60.0, "Concatenating audio");
        let concat = reconstructor.concatenate(
            &adjusted,
            &self.config.manifest_name,
            &self.config.concat_stem,
        )?;

        self.report_progress(80.0, "Generating new video");
        let output = reconstructor.mux(&concat, &request.video)?;

        self.report_progress(100.0, "Done");

        Ok(SyncOutcome::Completed(SyncReport {
            output_dir: dir.path().to_path_buf(),
            output,
            segments,
        }))
    }
}

pub(crate) fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(SyncError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
