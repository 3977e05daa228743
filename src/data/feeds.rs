use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Country metadata + border lists (alpha-3 join keys for everything else).
pub const METADATA_URL: &str = "https://restcountries.com/v2/all?fields=name,alpha3Code,borders";
/// Current situation per location, plus the "statistics as of" date.
pub const CURRENT_URL: &str = "https://covid2019-api.herokuapp.com/v2/current";
/// Historical per-day counts keyed by country display name.
pub const SERIES_URL: &str = "https://pomber.github.io/covid19/timeseries.json";

const FETCH_ATTEMPTS: u32 = 3;
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// One entry of the metadata feed.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    #[serde(rename = "alpha3Code")]
    pub alpha3_code: String,
    #[serde(default)]
    pub borders: Vec<String>,
}

/// The current-status feed envelope.
#[derive(Debug, Deserialize)]
pub struct CurrentFeed {
    /// "YYYY-MM-DD" reporting date.
    pub dt: String,
    pub data: Vec<LocationRecord>,
}

/// One location row of the current-status feed. Location names use
/// underscores where the metadata feed uses spaces.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRecord {
    pub location: String,
    #[serde(default)]
    pub confirmed: u64,
    #[serde(default)]
    pub deaths: u64,
    #[serde(default)]
    pub recovered: u64,
}

/// One per-day row of the historical feed, ascending date order.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRecord {
    pub date: String,
    #[serde(default)]
    pub confirmed: u64,
    #[serde(default)]
    pub deaths: u64,
}

/// Historical feed: free-text name (possibly a sub-national split sharing
/// one country prefix) -> per-day rows.
pub type SeriesFeed = HashMap<String, Vec<SeriesRecord>>;

/// All three feeds, fetched sequentially at startup.
pub struct Feeds {
    pub countries: Vec<CountryRecord>,
    pub current: CurrentFeed,
    pub series: SeriesFeed,
}

/// Fetch every feed. Metadata comes first so the code map can be built
/// before either normalizer runs.
pub fn fetch_all() -> Result<Feeds> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("building http client")?;

    Ok(Feeds {
        countries: fetch_json(&client, METADATA_URL).context("fetching country metadata")?,
        current: fetch_json(&client, CURRENT_URL).context("fetching current situation")?,
        series: fetch_json(&client, SERIES_URL).context("fetching time series")?,
    })
}

/// GET a JSON body with a few retries. Each failed attempt doubles the
/// backoff before the next try.
fn fetch_json<T: DeserializeOwned>(client: &reqwest::blocking::Client, url: &str) -> Result<T> {
    let mut backoff = Duration::from_millis(500);
    let mut last_err = None;

    for attempt in 1..=FETCH_ATTEMPTS {
        match try_fetch(client, url) {
            Ok(value) => return Ok(value),
            Err(e) => {
                eprintln!("Warning: attempt {attempt} for {url} failed: {e}");
                last_err = Some(e);
                if attempt < FETCH_ATTEMPTS {
                    thread::sleep(backoff);
                    backoff *= 2;
                }
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("no attempts made")))
}

fn try_fetch<T: DeserializeOwned>(client: &reqwest::blocking::Client, url: &str) -> Result<T> {
    let response = client.get(url).send()?.error_for_status()?;
    let mut body = response.bytes()?.to_vec();
    Ok(simd_json::serde::from_slice(&mut body)?)
}
