//! Descripteurs de champs Esri et catalogue des noms assainis

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Type d'un champ Esri (tag `esriFieldType*`)
///
/// Seul `Date` déclenche un traitement particulier; les tags non reconnus
/// tombent sur `Other` et passent les valeurs telles quelles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EsriFieldType {
    ObjectId,
    String,
    Integer,
    SmallInteger,
    Double,
    Single,
    Date,
    Geometry,
    #[default]
    Other,
}

impl From<String> for EsriFieldType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "esriFieldTypeOID" => Self::ObjectId,
            "esriFieldTypeString" => Self::String,
            "esriFieldTypeInteger" => Self::Integer,
            "esriFieldTypeSmallInteger" => Self::SmallInteger,
            "esriFieldTypeDouble" => Self::Double,
            "esriFieldTypeSingle" => Self::Single,
            "esriFieldTypeDate" => Self::Date,
            "esriFieldTypeGeometry" => Self::Geometry,
            _ => Self::Other,
        }
    }
}

/// Un descripteur de champ source
#[derive(Debug, Clone, Deserialize)]
pub struct EsriField {
    /// Nom du champ dans les attributs sources
    pub name: String,

    /// Type déclaré du champ
    #[serde(rename = "type", default)]
    pub field_type: EsriFieldType,

    /// Alias d'affichage (non utilisé par la conversion)
    #[serde(default)]
    pub alias: Option<String>,

    /// Domaine de valeurs codées, si le champ en déclare un
    #[serde(default)]
    pub domain: Option<CodedDomain>,
}

/// Domaine de valeurs codées d'un champ
#[derive(Debug, Clone, Deserialize)]
pub struct CodedDomain {
    /// Type de domaine ("codedValue" pour les domaines décodables)
    #[serde(rename = "type")]
    pub domain_type: String,

    /// Paires code -> nom lisible, dans l'ordre du service
    #[serde(rename = "codedValues", default)]
    pub coded_values: Vec<CodedValue>,
}

impl CodedDomain {
    /// Vrai si le domaine est décodable (valeurs codées)
    pub fn is_coded(&self) -> bool {
        self.domain_type == "codedValue"
    }
}

/// Une valeur codée: code source -> nom lisible
#[derive(Debug, Clone, Deserialize)]
pub struct CodedValue {
    /// Nom lisible substitué au code
    pub name: String,

    /// Code source (nombre ou chaîne, comparé par égalité stricte)
    pub code: Value,
}

/// Entrée du catalogue: descripteur + nom de sortie dérivé une seule fois
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Descripteur source
    pub field: EsriField,

    /// Nom assaini, stable pour la durée de vie du catalogue
    pub out_name: String,
}

/// Catalogue immuable nom de champ -> entrée enrichie
///
/// Construit une fois par conversion; les descripteurs fournis par
/// l'appelant ne sont jamais modifiés en place.
#[derive(Debug, Default)]
pub struct FieldCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl FieldCatalog {
    /// Construit le catalogue depuis une liste ordonnée de descripteurs
    ///
    /// Pas de détection de collision: si deux champs produisent le même
    /// `out_name`, le dernier écrase silencieusement le premier dans les
    /// propriétés de sortie (comportement historique conservé).
    pub fn build(fields: &[EsriField]) -> Self {
        let mut entries = HashMap::with_capacity(fields.len());
        for field in fields {
            entries.insert(
                field.name.clone(),
                CatalogEntry {
                    field: field.clone(),
                    out_name: sanitize_field_name(&field.name),
                },
            );
        }
        Self { entries }
    }

    /// Retrouve l'entrée d'un champ par son nom source
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Nombre de champs catalogués
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Vrai si le catalogue est vide
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assainit un nom de champ pour en faire une clé de propriété GeoJSON
///
/// Supprime `.`, `(` et `)` partout, puis remplace chaque séquence
/// d'espacement par un seul `_`.
pub fn sanitize_field_name(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !matches!(c, '.' | '(' | ')'))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join("_")
}
