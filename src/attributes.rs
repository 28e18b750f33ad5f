//! Conversion des valeurs d'attributs (domaines codés, dates)

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::fields::{CatalogEntry, CodedDomain, EsriFieldType};

/// Convertit une valeur brute selon son descripteur de champ
///
/// - `null` passe tel quel, sans décodage de domaine ni normalisation de date
/// - domaine codé déclaré: premier code strictement égal -> nom lisible,
///   code inconnu -> valeur brute inchangée
/// - champ date: epoch-millisecondes ou chaîne parsable -> ISO-8601 UTC,
///   échec de parsing -> valeur brute inchangée (jamais d'erreur)
/// - sinon: valeur brute inchangée
pub fn convert_attribute(raw: &Value, entry: &CatalogEntry) -> Value {
    if raw.is_null() {
        return Value::Null;
    }

    if let Some(domain) = entry.field.domain.as_ref().filter(|d| d.is_coded()) {
        return decode_domain(raw, domain);
    }

    if entry.field.field_type == EsriFieldType::Date {
        if let Some(iso) = normalize_date(raw) {
            return Value::String(iso);
        }
    }

    raw.clone()
}

/// Décode une valeur via le domaine codé (premier code égal gagne)
fn decode_domain(raw: &Value, domain: &CodedDomain) -> Value {
    for coded in &domain.coded_values {
        if coded.code == *raw {
            return Value::String(coded.name.clone());
        }
    }
    raw.clone()
}

/// Normalise une valeur de date en chaîne ISO-8601 UTC (précision ms)
///
/// Accepte un nombre epoch-millisecondes (entier ou flottant), une chaîne
/// RFC 3339, ou une date `AAAA-MM-JJ`. Retourne `None` si rien ne parse.
fn normalize_date(raw: &Value) -> Option<String> {
    let datetime: DateTime<Utc> = match raw {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })?;
            DateTime::from_timestamp_millis(millis)?
        }
        Value::String(s) => parse_date_string(s)?,
        _ => return None,
    };

    Some(datetime.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Parse une chaîne de date (RFC 3339, puis date seule)
fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
