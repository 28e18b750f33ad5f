//! Types de données pour le crate esri2geojson

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::EsriField;

/// Payload Esri (ArcGIS) tel que retourné par un service de features
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EsriPayload {
    /// Descripteurs des champs, si le service les embarque
    #[serde(default)]
    pub fields: Vec<EsriField>,

    /// Features sources, dans l'ordre du service
    #[serde(default)]
    pub features: Vec<EsriFeature>,
}

/// Une feature source Esri: attributs bruts + géométrie opaque
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EsriFeature {
    /// Attributs bruts (nom de champ -> valeur JSON)
    #[serde(default)]
    pub attributes: serde_json::Map<String, Value>,

    /// Géométrie source, laissée en JSON jusqu'au convertisseur
    #[serde(default)]
    pub geometry: Option<Value>,
}

/// Résultat d'une conversion de collection
///
/// La conversion est best-effort: une feature malformée dégrade localement
/// (géométrie à `null`, attribut ignoré) et le problème est accumulé ici
/// plutôt que propagé.
#[derive(Debug)]
pub struct ConvertOutput {
    /// FeatureCollection GeoJSON, dans l'ordre des features sources
    pub collection: FeatureCollection,

    /// Problèmes non fatals rencontrés pendant la conversion
    pub diagnostics: Vec<Diagnostic>,
}

impl ConvertOutput {
    /// Vrai si la conversion n'a rencontré aucun problème
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Nature d'un problème non fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Attribut présent sans descripteur de champ: attribut ignoré
    MissingFieldMetadata,
    /// Conversion de géométrie échouée: géométrie mise à `null`
    GeometryConversion,
}

/// Problème non fatal avec son contexte
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Nature du problème
    pub kind: DiagnosticKind,
    /// Index de la feature source concernée (0-based)
    pub feature_index: usize,
    /// Nom du champ concerné (optionnel)
    pub field: Option<String>,
    /// Message
    pub message: String,
}

impl Diagnostic {
    /// Attribut sans descripteur de champ
    pub(crate) fn missing_field(feature_index: usize, field: &str) -> Self {
        Self {
            kind: DiagnosticKind::MissingFieldMetadata,
            feature_index,
            field: Some(field.to_string()),
            message: format!("No field metadata for attribute '{field}', attribute dropped"),
        }
    }

    /// Échec de conversion de géométrie
    pub(crate) fn geometry(feature_index: usize, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::GeometryConversion,
            feature_index,
            field: None,
            message: message.into(),
        }
    }
}
