//! Control-point documents and their validation.
//!
//! A points document looks like `{"points": [[offset, tempo], ...]}`. Each
//! point asks for playback at `tempo` from `offset` onwards. Validation keeps
//! the document's order; sorting belongs to the planner.

use crate::error::{Result, SyncError, ValidationError};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Shown to the user when a point has the wrong shape.
pub const POINT_EXAMPLE: &str = "[123.45, 0.95]";

/// Shown to the user when the document has no points.
pub const DOCUMENT_EXAMPLE: &str = r#"{"points": [[123.45, 0.95]]}"#;

/// Slowest accepted tempo factor.
pub const MIN_TEMPO: f64 = 0.5;

/// Fastest accepted tempo factor.
pub const MAX_TEMPO: f64 = 2.0;

/// "From this offset on, play at this speed."
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlPoint {
    pub offset: f64,
    pub tempo: f64,
}

impl ControlPoint {
    pub fn new(offset: f64, tempo: f64) -> Self {
        Self { offset, tempo }
    }
}

/// A validated, non-empty set of control points with pairwise distinct offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointSet {
    points: Vec<ControlPoint>,
}

impl ControlPointSet {
    /// Validate already-typed points.
    pub fn new(points: Vec<ControlPoint>) -> std::result::Result<Self, ValidationError> {
        if points.is_empty() {
            return Err(ValidationError::MissingPoints {
                example: DOCUMENT_EXAMPLE,
            });
        }

        for (i, point) in points.iter().enumerate() {
            check_point(i, point, &points[..i])?;
        }

        Ok(Self { points })
    }

    /// Points in document order.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a validated set.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Validate the `points` member of a parsed document.
///
/// Checks run per point in a single pass and the first violation wins:
/// shape, offset, tempo, then uniqueness of the offset.
pub fn validate(document: &Value) -> std::result::Result<ControlPointSet, ValidationError> {
    let raw = match document.get("points").and_then(Value::as_array) {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            return Err(ValidationError::MissingPoints {
                example: DOCUMENT_EXAMPLE,
            })
        }
    };

    let mut points = Vec::with_capacity(raw.len());
    for (i, value) in raw.iter().enumerate() {
        let point = parse_point(value).ok_or_else(|| ValidationError::MalformedPoint {
            index: i + 1,
            example: POINT_EXAMPLE,
            actual: value.to_string(),
        })?;
        check_point(i, &point, &points)?;
        points.push(point);
    }

    Ok(ControlPointSet { points })
}

/// Parse a points document from text.
pub fn parse_document(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(text)
}

/// Read, parse and validate a points document.
pub fn load_points(path: &Path) -> Result<ControlPointSet> {
    let text = std::fs::read_to_string(path).map_err(|e| SyncError::MalformedDocument {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let document = parse_document(&text).map_err(|e| SyncError::MalformedDocument {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let points = validate(&document).map_err(|source| SyncError::InvalidPoints {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Loaded {} control points from {:?}", points.len(), path);
    Ok(points)
}

fn parse_point(value: &Value) -> Option<ControlPoint> {
    match value.as_array()?.as_slice() {
        [offset, tempo] => Some(ControlPoint::new(offset.as_f64()?, tempo.as_f64()?)),
        _ => None,
    }
}

fn check_point(
    i: usize,
    point: &ControlPoint,
    earlier: &[ControlPoint],
) -> std::result::Result<(), ValidationError> {
    let index = i + 1;

    if !point.offset.is_finite() || point.offset < 0.0 {
        return Err(ValidationError::InvalidOffset {
            index,
            value: point.offset,
        });
    }

    if !(MIN_TEMPO..=MAX_TEMPO).contains(&point.tempo) {
        return Err(ValidationError::InvalidTempo {
            index,
            value: point.tempo,
        });
    }

    if earlier.iter().any(|p| p.offset == point.offset) {
        return Err(ValidationError::DuplicateOffset {
            index,
            value: point.offset,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_document_keeps_input_order() {
        let set = validate(&json!({"points": [[25, 1], [0, 1], [10, 1.5]]})).unwrap();
        let offsets: Vec<f64> = set.points().iter().map(|p| p.offset).collect();
        assert_eq!(offsets, [25.0, 0.0, 10.0]);
    }

    #[test]
    fn test_missing_or_empty_points() {
        for doc in [
            json!({}),
            json!({"points": []}),
            json!({"points": {}}),
            json!(null),
            json!([]),
        ] {
            assert!(
                matches!(validate(&doc), Err(ValidationError::MissingPoints { .. })),
                "{doc}"
            );
        }
    }

    #[test]
    fn test_malformed_point_shapes() {
        for bad in [json!([1]), json!([1, 2, 3]), json!([true, 1]), json!([1, "1"]), json!(5)] {
            let err = validate(&json!({"points": [[0, 1], bad]})).unwrap_err();
            assert!(
                matches!(err, ValidationError::MalformedPoint { index: 2, .. }),
                "{err:?}"
            );
        }
    }

    #[test]
    fn test_negative_offset() {
        let err = validate(&json!({"points": [[-1, 1]]})).unwrap_err();
        assert_eq!(err, ValidationError::InvalidOffset { index: 1, value: -1.0 });
    }

    #[test]
    fn test_tempo_bounds_are_inclusive() {
        assert!(validate(&json!({"points": [[0, 0.5], [1, 2.0]]})).is_ok());

        let err = validate(&json!({"points": [[0, 1], [5, 2.01]]})).unwrap_err();
        assert_eq!(err, ValidationError::InvalidTempo { index: 2, value: 2.01 });
    }

    #[test]
    fn test_duplicate_offset_reports_second_occurrence() {
        let err = validate(&json!({"points": [[3, 1], [3, 1.2]]})).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateOffset { index: 2, value: 3.0 });
    }

    #[test]
    fn test_first_violation_wins() {
        // Point 1 has a bad tempo, point 2 is malformed: point 1 is reported.
        let err = validate(&json!({"points": [[0, 9], "x"]})).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTempo { index: 1, .. }));

        // Offset is checked before tempo within a point.
        let err = validate(&json!({"points": [[-2, 9]]})).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidOffset { index: 1, .. }));
    }

    #[test]
    fn test_control_point_set_new_applies_same_rules() {
        assert!(ControlPointSet::new(vec![]).is_err());
        assert!(ControlPointSet::new(vec![ControlPoint::new(0.0, 1.0)]).is_ok());
        assert!(matches!(
            ControlPointSet::new(vec![ControlPoint::new(1.0, 1.0), ControlPoint::new(1.0, 2.0)]),
            Err(ValidationError::DuplicateOffset { index: 2, .. })
        ));
    }

    #[test]
    fn test_load_points_malformed_json() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("points.json");
        std::fs::write(&path, "{\"points\": [[0, 1],").unwrap();
        assert!(matches!(
            load_points(&path),
            Err(SyncError::MalformedDocument { .. })
        ));
    }
}
