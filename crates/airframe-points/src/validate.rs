//! Schema validation of decoded point payloads.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{LoadError, SchemaError, SchemaErrorKind};
use crate::{Point, PointSet};

/// Decode and validate a raw JSON payload.
pub fn parse_points(bytes: &[u8]) -> Result<PointSet, LoadError> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(validate(&value)?)
}

/// Validate a decoded payload into a [`PointSet`].
///
/// Rules run in order: the payload must be an array; then, element by
/// element, the `id` must be a non-empty string and `x`, `y`, `z` must be
/// numbers; finally all ids must be distinct. The first violation wins and
/// nothing is returned on failure.
pub fn validate(value: &Value) -> Result<PointSet, SchemaError> {
    let elements = value
        .as_array()
        .ok_or_else(|| SchemaError::new(SchemaErrorKind::NotAnArray))?;

    let mut points = Vec::with_capacity(elements.len());
    for element in elements {
        let id = element
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SchemaError::new(SchemaErrorKind::InvalidId))?;

        let coord = |axis: &str| element.get(axis).and_then(Value::as_f64);
        let (Some(x), Some(y), Some(z)) = (coord("x"), coord("y"), coord("z")) else {
            return Err(SchemaError::for_point(
                SchemaErrorKind::InvalidCoordinates,
                id,
            ));
        };

        points.push(Point::new(id, x, y, z));
    }

    let mut seen = HashSet::with_capacity(points.len());
    if let Some(dup) = points.iter().find(|p| !seen.insert(p.id.as_str())) {
        return Err(SchemaError::for_point(SchemaErrorKind::DuplicateId, &dup.id));
    }

    Ok(PointSet { points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kind_of(value: Value) -> SchemaErrorKind {
        validate(&value).unwrap_err().kind
    }

    #[test]
    fn valid_dataset_round_trips() {
        let value = json!([
            {"id": "C11", "x": 0.0, "y": 0.5, "z": -1.25},
            {"id": "C21", "x": 1, "y": 0, "z": 0},
            {"id": "C31", "x": 2.0, "y": 0.0, "z": 0.0, "label": "tail"}
        ]);
        let set = validate(&value).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.points()[0], Point::new("C11", 0.0, 0.5, -1.25));
        assert_eq!(set.points()[1], Point::new("C21", 1.0, 0.0, 0.0));
        assert_eq!(set.points()[2].id, "C31");
    }

    #[test]
    fn empty_array_is_valid() {
        let set = validate(&json!([])).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn rejects_non_arrays() {
        assert_eq!(
            kind_of(json!({"id": "A", "x": 0, "y": 0, "z": 0})),
            SchemaErrorKind::NotAnArray
        );
        assert_eq!(kind_of(json!("points")), SchemaErrorKind::NotAnArray);
        assert_eq!(kind_of(Value::Null), SchemaErrorKind::NotAnArray);
    }

    #[test]
    fn rejects_missing_or_invalid_ids() {
        assert_eq!(
            kind_of(json!([{"x": 0, "y": 0, "z": 0}])),
            SchemaErrorKind::InvalidId
        );
        assert_eq!(
            kind_of(json!([{"id": "", "x": 0, "y": 0, "z": 0}])),
            SchemaErrorKind::InvalidId
        );
        assert_eq!(
            kind_of(json!([{"id": 7, "x": 0, "y": 0, "z": 0}])),
            SchemaErrorKind::InvalidId
        );
        assert_eq!(kind_of(json!([42])), SchemaErrorKind::InvalidId);
    }

    #[test]
    fn invalid_coordinates_name_the_point() {
        for bad in [
            json!([{"id": "P1", "x": 0, "y": 0}]),
            json!([{"id": "P1", "x": "0", "y": 0, "z": 0}]),
            json!([{"id": "P1", "x": 0, "y": null, "z": 0}]),
        ] {
            let err = validate(&bad).unwrap_err();
            assert_eq!(err.kind, SchemaErrorKind::InvalidCoordinates);
            assert_eq!(err.point_id.as_deref(), Some("P1"));
        }
    }

    #[test]
    fn rules_apply_element_by_element() {
        // The first element's bad coordinates are reported before the second's bad id.
        let err = validate(&json!([
            {"id": "A", "x": 0, "y": 0},
            {"x": 0, "y": 0, "z": 0}
        ]))
        .unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::InvalidCoordinates);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = validate(&json!([
            {"id": "A", "x": 0, "y": 0, "z": 0},
            {"id": "A", "x": 1, "y": 1, "z": 1}
        ]))
        .unwrap_err();
        assert_eq!(err.kind, SchemaErrorKind::DuplicateId);
        assert_eq!(err.point_id.as_deref(), Some("A"));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = parse_points(b"[{\"id\": \"A\",").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }

    #[test]
    fn parse_points_reports_schema_errors() {
        let err = parse_points(br#"{"points": []}"#).unwrap_err();
        assert_eq!(
            err.as_schema().map(|e| e.kind),
            Some(SchemaErrorKind::NotAnArray)
        );
    }
}
