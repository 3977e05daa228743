use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::data::codes::strip_qualifier;
use crate::data::feeds::SeriesFeed;

/// One day's counts for one country. Sub-national splits are summed into
/// a single entry per (date, code).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyCount {
    pub confirmed: u64,
    pub deaths: u64,
}

/// Date -> (code -> counts), ascending by date.
pub type TimeSeriesTable = BTreeMap<NaiveDate, HashMap<String, DailyCount>>;

/// Map the historical feed onto codes. Feed keys are stripped of any
/// parenthetical qualifier before lookup; unmapped keys and unparseable
/// dates are dropped. When several feed keys resolve to the same code
/// (a sub-national split), their counts are summed per date, so the final
/// totals are independent of feed iteration order.
pub fn normalize_series(feed: &SeriesFeed, codes: &HashMap<String, String>) -> TimeSeriesTable {
    let mut table = TimeSeriesTable::new();

    for (key, records) in feed {
        let Some(code) = codes.get(strip_qualifier(key)) else {
            continue;
        };

        for record in records {
            let Ok(date) = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") else {
                continue;
            };
            let entry = table
                .entry(date)
                .or_default()
                .entry(code.clone())
                .or_default();
            entry.confirmed += record.confirmed;
            entry.deaths += record.deaths;
        }
    }

    table
}
