//! Timeline planning.
//!
//! Turns a validated [`ControlPointSet`] into contiguous segments covering
//! `[0, end of media)`. Segment `i` runs from point `i` to point `i + 1` at
//! point `i`'s tempo; the last segment is open-ended.

use crate::points::{ControlPoint, ControlPointSet};
use serde::Serialize;

/// Point assumed at time zero when the caller does not set one.
pub const IMPLICIT_START: ControlPoint = ControlPoint {
    offset: 0.0,
    tempo: 1.0,
};

/// A span of the source timeline played at one constant tempo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// Position in the plan, 0-based. Also names the segment's artifacts.
    pub index: usize,
    pub start: f64,
    /// `None` only for the last segment: runs to the end of the media.
    pub length: Option<f64>,
    pub tempo: f64,
}

impl Segment {
    /// Exclusive end offset, if bounded.
    pub fn end(&self) -> Option<f64> {
        self.length.map(|length| self.start + length)
    }

    pub fn is_open_ended(&self) -> bool {
        self.length.is_none()
    }

    /// Whether the segment is copied instead of stretched.
    pub fn is_unchanged(&self) -> bool {
        self.tempo == 1.0
    }

    /// Length of this segment once stretched, if bounded.
    pub fn output_length(&self) -> Option<f64> {
        self.length.map(|length| length / self.tempo)
    }
}

/// Sort by offset and make sure the timeline starts at zero.
pub fn normalize(set: &ControlPointSet) -> Vec<ControlPoint> {
    let mut points = set.points().to_vec();
    points.sort_by(|a, b| a.offset.total_cmp(&b.offset));

    if points.first().map_or(true, |p| p.offset != 0.0) {
        points.insert(0, IMPLICIT_START);
    }

    points
}

/// Plan the segments for a validated set of control points.
pub fn plan(set: &ControlPointSet) -> Vec<Segment> {
    let points = normalize(set);
    let segments = segments_from(&points);

    tracing::debug!(
        "Planned {} segments from {} control points",
        segments.len(),
        set.len()
    );

    segments
}

/// Segments between consecutive points of an already sorted sequence.
fn segments_from(points: &[ControlPoint]) -> Vec<Segment> {
    let bounded = points.windows(2).enumerate().map(|(index, pair)| Segment {
        index,
        start: pair[0].offset,
        length: Some(pair[1].offset - pair[0].offset),
        tempo: pair[0].tempo,
    });

    let last = points.last().map(|p| Segment {
        index: points.len() - 1,
        start: p.offset,
        length: None,
        tempo: p.tempo,
    });

    bounded.chain(last).collect()
}

/// Predicted output length of the bounded segments, in offset units.
///
/// The open-ended last segment adds `remaining media / its tempo` on top.
pub fn bounded_output_length(segments: &[Segment]) -> f64 {
    segments.iter().filter_map(Segment::output_length).sum()
}

/// Whether any segment changes speed.
pub fn changes_tempo(segments: &[Segment]) -> bool {
    segments.iter().any(|s| !s.is_unchanged())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(points: &[(f64, f64)]) -> ControlPointSet {
        ControlPointSet::new(points.iter().map(|&(o, t)| ControlPoint::new(o, t)).collect())
            .unwrap()
    }

    #[test]
    fn test_normalize_sorts_and_prepends() {
        let points = normalize(&set(&[(20.0, 1.5), (5.0, 2.0)]));
        assert_eq!(
            points,
            [IMPLICIT_START, ControlPoint::new(5.0, 2.0), ControlPoint::new(20.0, 1.5)]
        );
    }

    #[test]
    fn test_normalize_keeps_explicit_zero() {
        let points = normalize(&set(&[(10.0, 1.0), (0.0, 0.75)]));
        assert_eq!(points[0], ControlPoint::new(0.0, 0.75));
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_single_point_at_zero_is_one_open_segment() {
        let segments = plan(&set(&[(0.0, 1.25)]));
        assert_eq!(
            segments,
            [Segment {
                index: 0,
                start: 0.0,
                length: None,
                tempo: 1.25
            }]
        );
    }

    #[test]
    fn test_segment_helpers() {
        let segment = Segment {
            index: 1,
            start: 10.0,
            length: Some(15.0),
            tempo: 1.5,
        };
        assert_eq!(segment.end(), Some(25.0));
        assert_eq!(segment.output_length(), Some(10.0));
        assert!(!segment.is_open_ended());
        assert!(!segment.is_unchanged());
    }

    #[test]
    fn test_bounded_output_length() {
        let segments = plan(&set(&[(0.0, 1.0), (10.0, 2.0), (30.0, 0.5)]));
        // 10 / 1 + 20 / 2; the open-ended tail is not counted.
        assert_eq!(bounded_output_length(&segments), 20.0);
        assert!(changes_tempo(&segments));
        assert!(!changes_tempo(&plan(&set(&[(0.0, 1.0)]))));
    }
}
