pub mod artifacts;
pub mod executor;
pub mod extract;
pub mod materialize;
pub mod reconstruct;

pub use artifacts::{ArtifactNaming, ArtifactStage, SegmentArtifact};
pub use executor::{ProgressCallback, SyncOutcome, SyncPipeline, SyncReport, SyncRequest};
pub use extract::{extract, ExtractReport};
pub use materialize::{cut_ranges, Materializer};
pub use reconstruct::Reconstructor;
pub use temposync_av::{ExistingOutput, OutputDir};
