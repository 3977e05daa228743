use std::collections::HashMap;

use crate::data::feeds::CountryRecord;

/// Names the status feeds use that the metadata feed does not (or that the
/// parenthetical strip makes ambiguous). Applied after the automatic
/// derivation, so these always win.
const OVERRIDES: &[(&str, &str)] = &[
    ("US", "USA"),
    ("United Kingdom", "GBR"),
    ("Korea, South", "KOR"),
    ("South Korea", "KOR"),
    ("Russia", "RUS"),
    ("Iran", "IRN"),
    ("Czechia", "CZE"),
    ("Vietnam", "VNM"),
    ("Laos", "LAO"),
    ("Syria", "SYR"),
    ("Venezuela", "VEN"),
    ("Bolivia", "BOL"),
    ("Brunei", "BRN"),
    ("Moldova", "MDA"),
    ("Tanzania", "TZA"),
    ("North Macedonia", "MKD"),
    ("Cote d'Ivoire", "CIV"),
    ("Burma", "MMR"),
    ("Taiwan*", "TWN"),
    // Both Congos strip to "Congo"; the feeds keep them apart like this.
    ("Congo (Brazzaville)", "COG"),
    ("Congo (Kinshasa)", "COD"),
];

/// Strip a parenthetical qualifier: "Korea (Republic of)" -> "Korea".
pub fn strip_qualifier(name: &str) -> &str {
    match name.split_once(" (") {
        Some((prefix, _)) => prefix,
        None => name,
    }
}

/// Build the canonical name -> alpha-3 code map from the metadata feed.
/// Duplicate derived names overwrite in feed order; overrides overlay last.
pub fn build_code_map(countries: &[CountryRecord]) -> HashMap<String, String> {
    let mut codes = HashMap::with_capacity(countries.len() + OVERRIDES.len());

    for country in countries {
        codes.insert(
            strip_qualifier(&country.name).to_string(),
            country.alpha3_code.clone(),
        );
    }
    for (name, code) in OVERRIDES {
        codes.insert((*name).to_string(), (*code).to_string());
    }

    codes
}

/// Build code -> neighboring codes from the metadata border lists,
/// preserving feed order.
pub fn build_neighbour_map(countries: &[CountryRecord]) -> HashMap<String, Vec<String>> {
    countries
        .iter()
        .map(|c| (c.alpha3_code.clone(), c.borders.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, code: &str, borders: &[&str]) -> CountryRecord {
        CountryRecord {
            name: name.to_string(),
            alpha3_code: code.to_string(),
            borders: borders.iter().map(|b| b.to_string()).collect(),
        }
    }

    #[test]
    fn test_strip_qualifier() {
        assert_eq!(strip_qualifier("Korea (Republic of)"), "Korea");
        assert_eq!(strip_qualifier("Finland"), "Finland");
        // Only the first " (" splits.
        assert_eq!(strip_qualifier("Saint Martin (French part) (x)"), "Saint Martin");
    }

    #[test]
    fn test_qualified_name_resolves_to_prefix() {
        let codes = build_code_map(&[record("Iran (Islamic Republic of)", "IRN", &[])]);
        assert_eq!(codes.get("Iran").map(String::as_str), Some("IRN"));
        assert!(!codes.contains_key("Iran (Islamic Republic of)"));
    }

    #[test]
    fn test_override_wins() {
        // Metadata calls it "Russian Federation"; the feeds say "Russia".
        let codes = build_code_map(&[record("Russian Federation", "RUS", &[])]);
        assert_eq!(codes.get("Russia").map(String::as_str), Some("RUS"));
        assert_eq!(codes.get("Russian Federation").map(String::as_str), Some("RUS"));
    }

    #[test]
    fn test_duplicate_derived_names_last_write_wins() {
        let codes = build_code_map(&[
            record("Congo (Brazzaville)", "COG", &[]),
            record("Congo (Kinshasa)", "COD", &[]),
        ]);
        assert_eq!(codes.get("Congo").map(String::as_str), Some("COD"));
        // The overrides keep both reachable under their feed spellings.
        assert_eq!(codes.get("Congo (Brazzaville)").map(String::as_str), Some("COG"));
    }

    #[test]
    fn test_neighbour_map_preserves_order() {
        let map = build_neighbour_map(&[record("Finland", "FIN", &["NOR", "SWE", "RUS"])]);
        assert_eq!(
            map.get("FIN"),
            Some(&vec!["NOR".to_string(), "SWE".to_string(), "RUS".to_string()])
        );
    }
}
