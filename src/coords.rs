use geo::Point;

/// Reference coordinates for the 31 Colombian departments that appear in the
/// dataset, keyed by the exact (uppercase, unaccented) name the source uses.
/// Lookup is case- and accent-sensitive on purpose: a name that does not match
/// is simply left off the map.
static DEPARTMENTS: &[(&str, f64, f64)] = &[
    ("BOGOTA D.C.", 4.6097, -74.0817),
    ("ANTIOQUIA", 6.4889, -75.5700),
    ("VALLE", 3.9000, -76.9667),
    ("SANTANDER", 7.5000, -73.0000),
    ("CUNDINAMARCA", 4.5710, -74.1322),
    ("ATLANTICO", 10.4747, -74.9302),
    ("RISARALDA", 4.0933, -75.8480),
    ("CALDAS", 5.5000, -75.6667),
    ("NARINO", 1.2000, -77.0000),
    ("SUCRE", 9.2915, -75.1902),
    ("TOLIMA", 4.3333, -75.7500),
    ("BOYACA", 5.6633, -72.4810),
    ("BOLIVAR", 10.2500, -75.5000),
    ("MAGDALENA", 10.5042, -74.2274),
    ("CAUCA", 2.7050, -76.8260),
    ("SAN ANDRES Y PROVIDENCIA", 12.5833, -81.7000),
    ("CORDOBA", 8.4324, -75.8894),
    ("LA GUAJIRA", 11.3548, -72.5205),
    ("CAQUETA", 1.7479, -75.6102),
    ("META", 3.8833, -73.6333),
    ("HUILA", 2.7045, -75.9613),
    ("NORTE DE SANTANDER", 7.8833, -72.5000),
    ("CESAR", 10.0739, -73.6993),
    ("CASANARE", 5.8956, -71.7465),
    ("QUINDIO", 4.5352, -75.6095),
    ("PUTUMAYO", 1.8000, -76.5000),
    ("AMAZONAS", -1.4429, -71.5724),
    ("ARAUCA", 6.5489, -71.1730),
    ("CHOCO", 5.1500, -76.6500),
    ("GUAVIARE", 3.1316, -70.1783),
    ("GUAINIA", 3.3600, -67.2100),
];

/// Look up a department's plotting coordinates. Returns a `Point` with
/// x = longitude, y = latitude, or None for unknown names.
pub fn coordinates_of(department: &str) -> Option<Point<f64>> {
    DEPARTMENTS
        .iter()
        .find(|(name, _, _)| *name == department)
        .map(|&(_, lat, lon)| Point::new(lon, lat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_all_departments() {
        assert_eq!(DEPARTMENTS.len(), 31);
    }

    #[test]
    fn known_department_resolves() {
        let p = coordinates_of("ANTIOQUIA").unwrap();
        assert_eq!(p.y(), 6.4889);
        assert_eq!(p.x(), -75.5700);
    }

    #[test]
    fn lookup_is_exact_match_only() {
        assert!(coordinates_of("NOWHERE").is_none());
        // no normalization: case and accents must match the table key
        assert!(coordinates_of("antioquia").is_none());
        assert!(coordinates_of("NARIÑO").is_none());
    }
}
