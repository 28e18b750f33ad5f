//! Assemblage des features GeoJSON (sources Esri et CSV)

use geojson::{feature::Id, Feature, JsonObject};
use serde_json::Value;
use tracing::warn;

use crate::attributes::convert_attribute;
use crate::fields::{sanitize_field_name, FieldCatalog};
use crate::geometry::{self, GeometryConverter};
use crate::types::{Diagnostic, EsriFeature};

/// Assemble une feature GeoJSON depuis une feature source Esri
///
/// Retourne la feature avec les diagnostics qu'elle a produits; l'appelant
/// agrège. Un attribut sans entrée de catalogue est ignoré, une géométrie
/// inconvertible devient `null` — jamais d'erreur propagée.
pub(crate) fn esri_feature(
    source: &EsriFeature,
    catalog: &FieldCatalog,
    converter: &dyn GeometryConverter,
    index: usize,
) -> (Feature, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut properties = JsonObject::new();

    for (name, raw) in &source.attributes {
        match catalog.get(name) {
            Some(entry) => {
                properties.insert(entry.out_name.clone(), convert_attribute(raw, entry));
            }
            None => {
                warn!(feature_index = index, field = %name, "Attribute without field metadata, dropped");
                diagnostics.push(Diagnostic::missing_field(index, name));
            }
        }
    }

    let geometry = match source.geometry.as_ref().filter(|g| !g.is_null()) {
        None => None,
        Some(raw) => match converter
            .convert(raw)
            .and_then(geometry::into_valid_geometry)
        {
            Ok(geom) => Some(geom),
            Err(e) => {
                warn!(feature_index = index, error = %e, "Geometry conversion failed, geometry set to null");
                diagnostics.push(Diagnostic::geometry(index, e.to_string()));
                None
            }
        },
    };

    let feature = Feature {
        bbox: None,
        geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    };
    (feature, diagnostics)
}

/// Assemble une feature GeoJSON depuis une ligne CSV
///
/// `row_index` est 1-based (première ligne de données = 1); il sert d'`id`
/// et d'`OBJECTID` synthétique quand le CSV n'en fournit pas.
pub(crate) fn csv_feature(headers: &[String], row: &[String], row_index: usize) -> Feature {
    let mut properties = JsonObject::new();

    for (col, header) in headers.iter().enumerate() {
        // Lignes plus courtes tolérées: cellule absente -> propriété absente
        let Some(cell) = row.get(col) else {
            continue;
        };
        properties.insert(sanitize_field_name(header), coerce_cell(cell));
    }

    // OBJECTID synthétique, sans jamais écraser une colonne existante
    if !headers.iter().any(|h| h == "OBJECTID") {
        properties.insert("OBJECTID".to_string(), Value::from(row_index));
    }

    Feature {
        bbox: None,
        geometry: geometry::csv::point_from_row(headers, row),
        id: Some(Id::Number(row_index.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Coerce une cellule CSV: nombre si elle parse proprement, sinon chaîne
///
/// Les virgules de séparation des milliers sont retirées avant le parsing.
/// Les nombres à valeur entière sont émis comme entiers JSON.
fn coerce_cell(cell: &str) -> Value {
    let cleaned = cell.trim().replace(',', "");
    if cleaned.is_empty() {
        return Value::String(cell.to_string());
    }
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => {
            if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                Value::from(n as i64)
            } else {
                Value::from(n)
            }
        }
        _ => Value::String(cell.to_string()),
    }
}
