use std::collections::HashMap;

use crate::data::feeds::LocationRecord;

/// Current counts for one country, keyed by alpha-3 code in [`CurrentMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseCounts {
    /// Display name as the feed spelled it (underscores already replaced).
    pub name: String,
    pub confirmed: u64,
    pub deaths: u64,
    pub recovered: u64,
}

/// Code -> current counts for every location the code map recognizes.
pub type CurrentMetrics = HashMap<String, CaseCounts>;

/// Map the current-status feed onto codes. Locations with no code map
/// entry are dropped; downstream treats a missing entry as "no data".
pub fn normalize_current(
    records: &[LocationRecord],
    codes: &HashMap<String, String>,
) -> CurrentMetrics {
    let mut metrics = CurrentMetrics::with_capacity(records.len());

    for record in records {
        let name = record.location.replace('_', " ");
        if let Some(code) = codes.get(&name) {
            metrics.insert(
                code.clone(),
                CaseCounts {
                    name,
                    confirmed: record.confirmed,
                    deaths: record.deaths,
                    recovered: record.recovered,
                },
            );
        }
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(name: &str, confirmed: u64, deaths: u64, recovered: u64) -> LocationRecord {
        LocationRecord {
            location: name.to_string(),
            confirmed,
            deaths,
            recovered,
        }
    }

    fn codes() -> HashMap<String, String> {
        [("South Korea", "KOR"), ("Finland", "FIN")]
            .into_iter()
            .map(|(n, c)| (n.to_string(), c.to_string()))
            .collect()
    }

    #[test]
    fn test_underscores_become_spaces() {
        let metrics = normalize_current(&[location("South_Korea", 9, 1, 3)], &codes());
        let kor = metrics.get("KOR").expect("mapped entry");
        assert_eq!(kor.name, "South Korea");
        assert_eq!(kor.confirmed, 9);
        assert_eq!(kor.deaths, 1);
        assert_eq!(kor.recovered, 3);
    }

    #[test]
    fn test_unmapped_location_dropped() {
        let metrics = normalize_current(
            &[location("Atlantis", 100, 2, 0), location("Finland", 5, 0, 1)],
            &codes(),
        );
        assert_eq!(metrics.len(), 1);
        assert!(metrics.contains_key("FIN"));
        assert!(metrics.values().all(|c| c.name != "Atlantis"));
    }

    #[test]
    fn test_empty_feed_is_fine() {
        assert!(normalize_current(&[], &codes()).is_empty());
    }
}
