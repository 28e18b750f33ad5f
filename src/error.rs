//! Types d'erreurs pour le crate esri2geojson

use thiserror::Error;

/// Erreurs pouvant survenir lors d'une conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Payload JSON illisible (seule erreur fatale du crate, au point d'entrée)
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Géométrie source dont la forme n'est pas reconnue
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// Géométrie source reconnue mais invalide
    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },
}

impl ConvertError {
    /// Crée une erreur de géométrie invalide
    pub fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }
}
