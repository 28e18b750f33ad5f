//! Conversion et validation des géométries

pub mod csv;
pub mod esri;

use geojson::Geometry;
use serde_json::Value;

use crate::ConvertError;

/// Capacité externe de conversion de géométrie source -> GeoJSON
///
/// L'interprétation des formes sources (rings, paths, points) appartient au
/// convertisseur; l'acceptation du résultat ([`into_valid_geometry`]) reste
/// du côté appelant, quel que soit le convertisseur branché.
pub trait GeometryConverter {
    /// Convertit une géométrie source en objet géométrie GeoJSON
    fn convert(&self, geometry: &Value) -> Result<Value, ConvertError>;
}

/// Valide et matérialise une géométrie GeoJSON candidate
///
/// Le candidat doit être un objet avec un `type` chaîne non vide et un
/// membre `coordinates`, et doit se désérialiser en géométrie GeoJSON.
pub(crate) fn into_valid_geometry(candidate: Value) -> Result<Geometry, ConvertError> {
    let obj = candidate
        .as_object()
        .ok_or_else(|| ConvertError::invalid_geometry("converted geometry is not an object"))?;

    match obj.get("type").and_then(Value::as_str) {
        Some(t) if !t.is_empty() => {}
        _ => {
            return Err(ConvertError::invalid_geometry(
                "converted geometry has no geometry type",
            ))
        }
    }
    if !obj.contains_key("coordinates") {
        return Err(ConvertError::invalid_geometry(
            "converted geometry has no coordinates",
        ));
    }

    Geometry::from_json_value(candidate)
        .map_err(|e| ConvertError::invalid_geometry(e.to_string()))
}
