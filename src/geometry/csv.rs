//! Détection heuristique des colonnes latitude/longitude d'un CSV

use geojson::Geometry;

/// Axe de coordonnée reconnu dans un en-tête
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Lon,
    Lat,
}

/// Table statique des alias d'en-tête (minuscules, sans espaces autour)
fn axis_of(header: &str) -> Option<Axis> {
    match header.trim().to_ascii_lowercase().as_str() {
        "lon" | "longitude" | "longitude_deg" | "x" => Some(Axis::Lon),
        "lat" | "latitude" | "latitude_deg" | "y" => Some(Axis::Lat),
        _ => None,
    }
}

/// Construit un Point GeoJSON depuis une ligne CSV, si possible
///
/// La première colonne reconnue gagne pour chaque axe. La géométrie n'est
/// produite que si les deux cellules parsent en nombre non nul et non NaN.
/// Quirk historique conservé: une coordonnée valant exactement `0` est
/// traitée comme manquante et invalide la géométrie.
pub fn point_from_row(headers: &[String], row: &[String]) -> Option<Geometry> {
    let lon_col = find_axis_column(headers, Axis::Lon)?;
    let lat_col = find_axis_column(headers, Axis::Lat)?;

    let lon = coordinate(row.get(lon_col))?;
    let lat = coordinate(row.get(lat_col))?;

    Some(Geometry::new(geojson::Value::Point(vec![lon, lat])))
}

/// Première colonne dont l'en-tête correspond à l'axe demandé
fn find_axis_column(headers: &[String], axis: Axis) -> Option<usize> {
    headers.iter().position(|h| axis_of(h) == Some(axis))
}

/// Parse une cellule en coordonnée exploitable
fn coordinate(cell: Option<&String>) -> Option<f64> {
    let value: f64 = cell?.trim().parse().ok()?;
    if value.is_nan() || value == 0.0 {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn point_coords(geom: &Geometry) -> (f64, f64) {
        match &geom.value {
            geojson::Value::Point(coords) => (coords[0], coords[1]),
            other => panic!("Expected a Point, got {other:?}"),
        }
    }

    #[test]
    fn test_x_y_headers() {
        let geom = point_from_row(&headers(&["y", "x"]), &headers(&["-180", "90"])).unwrap();
        assert_eq!(point_coords(&geom), (90.0, -180.0));
    }

    #[test]
    fn test_header_aliases_are_equivalent() {
        for (lat_h, lon_h) in [
            ("lat", "lon"),
            ("latitude", "longitude"),
            ("latitude_deg", "longitude_deg"),
            ("y", "x"),
        ] {
            let geom = point_from_row(&headers(&[lat_h, lon_h]), &headers(&["45.5", "5.7"]))
                .unwrap_or_else(|| panic!("Headers {lat_h}/{lon_h} should be recognized"));
            assert_eq!(point_coords(&geom), (5.7, 45.5));
        }
    }

    #[test]
    fn test_header_matching_is_case_insensitive_and_trimmed() {
        let geom = point_from_row(&headers(&[" LAT ", "Longitude"]), &headers(&["45.5", "5.7"]));
        assert!(geom.is_some());
    }

    #[test]
    fn test_first_matching_column_wins() {
        let geom = point_from_row(
            &headers(&["lon", "lat", "x", "y"]),
            &headers(&["5.7", "45.5", "99.0", "99.0"]),
        )
        .unwrap();
        assert_eq!(point_coords(&geom), (5.7, 45.5));
    }

    #[test]
    fn test_no_recognized_headers_yields_none() {
        let geom = point_from_row(&headers(&["name", "value"]), &headers(&["a", "1"]));
        assert!(geom.is_none());
    }

    #[test]
    fn test_unparsable_coordinate_yields_none() {
        let geom = point_from_row(&headers(&["lat", "lon"]), &headers(&["45.5", "east"]));
        assert!(geom.is_none());
    }

    #[test]
    fn test_missing_cell_yields_none() {
        let geom = point_from_row(&headers(&["lat", "lon"]), &headers(&["45.5"]));
        assert!(geom.is_none());
    }

    // Quirk historique: 0 est traité comme coordonnée manquante, la
    // géométrie est donc nulle même si l'autre axe est valide.
    #[test]
    fn test_zero_coordinate_invalidates_geometry() {
        let geom = point_from_row(&headers(&["lon", "lat"]), &headers(&["0", "45.5"]));
        assert!(geom.is_none());

        let geom = point_from_row(&headers(&["lon", "lat"]), &headers(&["5.7", "0.0"]));
        assert!(geom.is_none());
    }
}
