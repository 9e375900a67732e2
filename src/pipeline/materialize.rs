//! Segment materialization: one cut and one tempo change per segment.

use super::artifacts::{ArtifactNaming, ArtifactStage, SegmentArtifact};
use crate::config::OffsetUnit;
use crate::error::{Result, ValidationError};
use crate::plan::{self, Segment};
use crate::points::ControlPointSet;
use std::path::Path;
use temposync_av::{CutRange, MediaTool, OutputDir, StreamSelector};

/// Writes the per-segment files of a run into its output directory.
pub struct Materializer<'a, T: MediaTool> {
    tool: &'a T,
    dir: &'a OutputDir,
    naming: &'a ArtifactNaming,
}

impl<'a, T: MediaTool> Materializer<'a, T> {
    pub fn new(tool: &'a T, dir: &'a OutputDir, naming: &'a ArtifactNaming) -> Self {
        Self { tool, dir, naming }
    }

    fn artifact(&self, index: usize, stage: ArtifactStage) -> SegmentArtifact {
        SegmentArtifact {
            index,
            stage,
            path: self.dir.file(&self.naming.file_name(index, stage)),
        }
    }

    /// Stream-copy the audio of each segment into `{index}.{ext}`, in index order.
    ///
    /// `ranges` come from [`cut_ranges`], one per segment.
    pub fn cut_all(
        &self,
        audio: &Path,
        segments: &[Segment],
        ranges: &[CutRange],
    ) -> Result<Vec<SegmentArtifact>> {
        let mut artifacts = Vec::with_capacity(segments.len());

        for (segment, &range) in segments.iter().zip(ranges) {
            let artifact = self.artifact(segment.index, ArtifactStage::RawCut);

            tracing::debug!(
                "Cutting segment {} ({:?} + {:?}) to {:?}",
                segment.index,
                range.start,
                range.length,
                artifact.path
            );

            self.tool.cut(audio, range, StreamSelector::Audio, &artifact.path)?;
            artifacts.push(artifact);
        }

        Ok(artifacts)
    }

    /// Produce `{index}_{suffix}.{ext}` for each raw cut.
    ///
    /// Segments at tempo 1 are copied byte for byte instead of being
    /// re-encoded through the stretch filter.
    pub fn adjust_all(
        &self,
        segments: &[Segment],
        raw: &[SegmentArtifact],
    ) -> Result<Vec<SegmentArtifact>> {
        let mut artifacts = Vec::with_capacity(segments.len());

        for (segment, input) in segments.iter().zip(raw) {
            debug_assert_eq!(segment.index, input.index);
            let artifact = self.artifact(segment.index, ArtifactStage::TempoAdjusted);

            if segment.is_unchanged() {
                tracing::debug!("Segment {} keeps its tempo, copying", segment.index);
                std::fs::copy(&input.path, &artifact.path)?;
            } else {
                tracing::debug!(
                    "Changing tempo of segment {} by {}",
                    segment.index,
                    segment.tempo
                );
                self.tool.change_tempo(&input.path, segment.tempo, &artifact.path)?;
            }

            artifacts.push(artifact);
        }

        Ok(artifacts)
    }
}

/// Media ranges of the planned segments, in segment order.
///
/// Offsets only become `Duration`s here, so this is where a point that is
/// valid as a number can still fail: either its offset does not fit in a
/// `Duration`, or it sits so close to the previous point that the segment
/// between them is shorter than a nanosecond. Errors name the point as it
/// appears in the document.
pub fn cut_ranges(
    points: &ControlPointSet,
    segments: &[Segment],
    unit: OffsetUnit,
) -> std::result::Result<Vec<CutRange>, ValidationError> {
    let normalized = plan::normalize(points);
    let document_index = |position: usize| {
        normalized.get(position).map_or(0, |point| {
            points
                .points()
                .iter()
                .position(|p| p.offset == point.offset)
                .map_or(0, |i| i + 1)
        })
    };

    let mut ranges = Vec::with_capacity(segments.len());

    for (position, segment) in segments.iter().enumerate() {
        let start = unit
            .to_duration(segment.start)
            .ok_or(ValidationError::OffsetOutOfRange {
                index: document_index(position),
                value: segment.start,
            })?;

        let range = match segment.length {
            Some(length) => {
                let end = segment.end().unwrap_or(segment.start);
                let length = unit
                    .to_duration(length)
                    .ok_or(ValidationError::OffsetOutOfRange {
                        index: document_index(position + 1),
                        value: end,
                    })?;
                if length.is_zero() {
                    return Err(ValidationError::SegmentTooShort {
                        index: document_index(position + 1),
                        value: end,
                    });
                }
                CutRange::bounded(start, length)
            }
            None => CutRange::open_ended(start),
        };

        ranges.push(range);
    }

    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::ControlPoint;
    use std::time::Duration;

    fn ranges_for(
        points: &[(f64, f64)],
        unit: OffsetUnit,
    ) -> std::result::Result<Vec<CutRange>, ValidationError> {
        let set = ControlPointSet::new(
            points
                .iter()
                .map(|&(offset, tempo)| ControlPoint::new(offset, tempo))
                .collect(),
        )
        .unwrap();
        let segments = plan::plan(&set);
        cut_ranges(&set, &segments, unit)
    }

    #[test]
    fn test_cut_ranges_convert_offsets() {
        let ranges = ranges_for(&[(0.0, 1.0), (1500.0, 1.5)], OffsetUnit::Milliseconds).unwrap();
        assert_eq!(
            ranges,
            vec![
                CutRange::bounded(Duration::ZERO, Duration::from_millis(1500)),
                CutRange::open_ended(Duration::from_millis(1500)),
            ]
        );
    }

    #[test]
    fn test_cut_ranges_reject_offset_beyond_duration() {
        let err = ranges_for(&[(0.0, 1.0), (1e30, 1.5)], OffsetUnit::Milliseconds).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OffsetOutOfRange {
                index: 2,
                value: 1e30
            }
        );
    }

    #[test]
    fn test_cut_ranges_name_the_document_position() {
        let err = ranges_for(&[(1e30, 1.5), (0.0, 1.0)], OffsetUnit::Seconds).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OffsetOutOfRange {
                index: 1,
                value: 1e30
            }
        );
    }

    #[test]
    fn test_cut_ranges_reject_sub_nanosecond_segment() {
        let err = ranges_for(&[(0.0, 1.0), (1e-7, 1.5)], OffsetUnit::Milliseconds).unwrap_err();
        assert_eq!(
            err,
            ValidationError::SegmentTooShort {
                index: 2,
                value: 1e-7
            }
        );
    }
}
