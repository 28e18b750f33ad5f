//! # esri2geojson
//!
//! Conversion de deux formats tabulaires — le format de features JSON des
//! services Esri (ArcGIS) et des lignes CSV déjà tokenisées — vers des
//! FeatureCollections GeoJSON.
//!
//! ## Features
//!
//! - Assainissement des noms de champs (`name.Says` -> `nameSays`)
//! - Décodage des domaines de valeurs codées
//! - Normalisation des dates en ISO-8601 UTC
//! - Détection heuristique des colonnes latitude/longitude d'un CSV
//! - Conversion best-effort: une feature malformée dégrade localement,
//!   les problèmes sont accumulés dans le résultat
//!
//! ## Usage
//!
//! ```rust,ignore
//! use esri2geojson::{from_esri_json, from_csv};
//!
//! let output = from_esri_json(&payload_json, None)?;
//! println!("{} features", output.collection.features.len());
//! for diag in &output.diagnostics {
//!     println!("{:?}", diag);
//! }
//!
//! let rows: Vec<Vec<String>> = tokenize(csv_text); // tokenizer externe
//! let output = from_csv(&rows);
//! ```

pub mod attributes;
pub mod error;
mod feature;
pub mod fields;
pub mod geometry;
pub mod types;

pub use error::ConvertError;
pub use fields::{sanitize_field_name, CodedDomain, CodedValue, EsriField, EsriFieldType, FieldCatalog};
pub use geometry::{esri::EsriJsonConverter, GeometryConverter};
pub use types::{ConvertOutput, Diagnostic, DiagnosticKind, EsriFeature, EsriPayload};

use geojson::FeatureCollection;

/// Convertit un payload Esri en FeatureCollection GeoJSON
///
/// `fields` prioritaire s'il est fourni et non vide, sinon repli sur les
/// champs embarqués dans le payload. L'ordre des features est préservé.
pub fn from_esri(payload: &EsriPayload, fields: Option<&[EsriField]>) -> ConvertOutput {
    from_esri_with_converter(payload, fields, &EsriJsonConverter)
}

/// Comme [`from_esri`], avec un convertisseur de géométrie fourni par l'appelant
pub fn from_esri_with_converter(
    payload: &EsriPayload,
    fields: Option<&[EsriField]>,
    converter: &dyn GeometryConverter,
) -> ConvertOutput {
    let effective_fields = match fields {
        Some(f) if !f.is_empty() => f,
        _ => payload.fields.as_slice(),
    };
    let catalog = FieldCatalog::build(effective_fields);

    let mut diagnostics = Vec::new();
    let mut features = Vec::with_capacity(payload.features.len());

    for (index, source) in payload.features.iter().enumerate() {
        let (converted, feature_diagnostics) =
            feature::esri_feature(source, &catalog, converter, index);
        features.push(converted);
        diagnostics.extend(feature_diagnostics);
    }

    ConvertOutput {
        collection: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
        diagnostics,
    }
}

/// Parse un payload Esri JSON puis le convertit
///
/// # Errors
///
/// Retourne `ConvertError::Json` si le payload n'est pas désérialisable —
/// la seule erreur fatale du crate. Tout le reste dégrade localement.
pub fn from_esri_json(json: &str, fields: Option<&[EsriField]>) -> Result<ConvertOutput, ConvertError> {
    let payload: EsriPayload = serde_json::from_str(json)?;
    Ok(from_esri(&payload, fields))
}

/// Convertit des lignes CSV tokenisées en FeatureCollection GeoJSON
///
/// La ligne 0 porte les en-têtes, les suivantes les données, dans l'ordre.
/// Le tokenizing (délimiteurs, guillemets) est l'affaire d'un collaborateur
/// externe: ce crate reçoit des cellules déjà découpées.
pub fn from_csv(rows: &[Vec<String>]) -> ConvertOutput {
    let Some((headers, data_rows)) = rows.split_first() else {
        return ConvertOutput {
            collection: FeatureCollection {
                bbox: None,
                features: Vec::new(),
                foreign_members: None,
            },
            diagnostics: Vec::new(),
        };
    };

    let features = data_rows
        .iter()
        .enumerate()
        .map(|(i, row)| feature::csv_feature(headers, row, i + 1))
        .collect();

    ConvertOutput {
        collection: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
        diagnostics: Vec::new(),
    }
}
