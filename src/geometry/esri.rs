//! Convertisseur par défaut pour les géométries Esri JSON

use serde_json::{json, Value};

use crate::ConvertError;

use super::GeometryConverter;

/// Convertisseur des formes Esri JSON (x/y, points, paths, rings)
///
/// Conversion de format uniquement: pas de reprojection, pas d'orientation
/// d'anneaux. Les rings sont émis comme un Polygon dans l'ordre source,
/// refermés si le service les a laissés ouverts.
#[derive(Debug, Clone, Copy, Default)]
pub struct EsriJsonConverter;

impl GeometryConverter for EsriJsonConverter {
    fn convert(&self, geometry: &Value) -> Result<Value, ConvertError> {
        let obj = geometry
            .as_object()
            .ok_or_else(|| ConvertError::invalid_geometry("source geometry is not an object"))?;

        if obj.contains_key("x") || obj.contains_key("y") {
            let x = obj.get("x").and_then(Value::as_f64);
            let y = obj.get("y").and_then(Value::as_f64);
            return match (x, y) {
                (Some(x), Some(y)) => Ok(json!({"type": "Point", "coordinates": [x, y]})),
                _ => Err(ConvertError::invalid_geometry(
                    "point geometry with non-numeric x/y",
                )),
            };
        }

        if let Some(points) = obj.get("points") {
            return Ok(json!({"type": "MultiPoint", "coordinates": points}));
        }

        if let Some(paths) = obj.get("paths").and_then(Value::as_array) {
            return Ok(if paths.len() == 1 {
                json!({"type": "LineString", "coordinates": paths[0]})
            } else {
                json!({"type": "MultiLineString", "coordinates": paths})
            });
        }

        if let Some(rings) = obj.get("rings").and_then(Value::as_array) {
            let closed: Vec<Value> = rings.iter().map(close_ring).collect();
            return Ok(json!({"type": "Polygon", "coordinates": closed}));
        }

        Err(ConvertError::UnsupportedGeometry(format!(
            "unrecognized source geometry shape (keys: {})",
            obj.keys().cloned().collect::<Vec<_>>().join(", ")
        )))
    }
}

/// Referme un ring si sa première position diffère de la dernière
fn close_ring(ring: &Value) -> Value {
    let Some(positions) = ring.as_array() else {
        return ring.clone();
    };
    match (positions.first(), positions.last()) {
        (Some(first), Some(last)) if first != last => {
            let mut closed = positions.clone();
            closed.push(first.clone());
            Value::Array(closed)
        }
        _ => ring.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point() {
        let converted = EsriJsonConverter
            .convert(&json!({"x": 5.0, "y": 47.0, "spatialReference": {"wkid": 4326}}))
            .unwrap();
        assert_eq!(converted, json!({"type": "Point", "coordinates": [5.0, 47.0]}));
    }

    #[test]
    fn test_point_with_null_coordinate_fails() {
        let result = EsriJsonConverter.convert(&json!({"x": null, "y": 47.0}));
        assert!(result.is_err());
    }

    #[test]
    fn test_multipoint() {
        let converted = EsriJsonConverter
            .convert(&json!({"points": [[1.0, 2.0], [3.0, 4.0]]}))
            .unwrap();
        assert_eq!(
            converted,
            json!({"type": "MultiPoint", "coordinates": [[1.0, 2.0], [3.0, 4.0]]})
        );
    }

    #[test]
    fn test_single_path_becomes_linestring() {
        let converted = EsriJsonConverter
            .convert(&json!({"paths": [[[0.0, 0.0], [1.0, 1.0]]]}))
            .unwrap();
        assert_eq!(converted["type"], "LineString");
        assert_eq!(converted["coordinates"], json!([[0.0, 0.0], [1.0, 1.0]]));
    }

    #[test]
    fn test_multiple_paths_become_multilinestring() {
        let converted = EsriJsonConverter
            .convert(&json!({"paths": [
                [[0.0, 0.0], [1.0, 1.0]],
                [[2.0, 2.0], [3.0, 3.0]]
            ]}))
            .unwrap();
        assert_eq!(converted["type"], "MultiLineString");
    }

    #[test]
    fn test_open_ring_is_closed() {
        let converted = EsriJsonConverter
            .convert(&json!({"rings": [[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]]]}))
            .unwrap();
        assert_eq!(converted["type"], "Polygon");
        let ring = &converted["coordinates"][0];
        assert_eq!(ring[0], ring[3], "Ring should be closed");
    }

    #[test]
    fn test_closed_ring_stays_unchanged() {
        let ring = json!([[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]]);
        let converted = EsriJsonConverter.convert(&json!({"rings": [ring]})).unwrap();
        assert_eq!(converted["coordinates"][0], ring);
    }

    #[test]
    fn test_unknown_shape_fails() {
        let result = EsriJsonConverter.convert(&json!({"curves": []}));
        assert!(matches!(result, Err(ConvertError::UnsupportedGeometry(_))));
    }
}
