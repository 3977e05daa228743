use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pandemap::color::severity_color;
use pandemap::data::codes::build_code_map;
use pandemap::data::feeds::{CountryRecord, SeriesFeed, SeriesRecord};
use pandemap::data::series::normalize_series;

/// 150 countries x 120 days, with a few sub-national splits thrown in.
fn synthetic_inputs() -> (SeriesFeed, Vec<CountryRecord>) {
    let mut countries = Vec::new();
    let mut feed = SeriesFeed::new();

    for i in 0..150u32 {
        let name = format!("Country{i:03}");
        let code = format!("C{i:02}");
        countries.push(CountryRecord {
            name: name.clone(),
            alpha3_code: code,
            borders: vec![],
        });

        let rows: Vec<SeriesRecord> = (0..120u32)
            .map(|day| SeriesRecord {
                date: format!("2020-{:02}-{:02}", 1 + day / 28, 1 + day % 28),
                confirmed: u64::from(i * day),
                deaths: u64::from(day / 7),
            })
            .collect();

        if i % 10 == 0 {
            // Sub-national split sharing the country prefix.
            feed.insert(format!("{name} (Province A)"), rows.clone());
            feed.insert(format!("{name} (Province B)"), rows.clone());
        }
        feed.insert(name, rows);
    }

    (feed, countries)
}

fn bench_normalize_series(c: &mut Criterion) {
    let (feed, countries) = synthetic_inputs();
    let codes = build_code_map(&countries);

    c.bench_function("normalize_series_150x120", |b| {
        b.iter(|| normalize_series(black_box(&feed), black_box(&codes)))
    });
}

fn bench_severity_color(c: &mut Criterion) {
    c.bench_function("severity_color_sweep", |b| {
        b.iter(|| {
            for confirmed in (0..100_000u64).step_by(997) {
                black_box(severity_color(Some(confirmed), Some(confirmed / 50)));
            }
        })
    });
}

criterion_group!(benches, bench_normalize_series, bench_severity_color);
criterion_main!(benches);
