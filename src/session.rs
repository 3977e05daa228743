use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::color::{severity_color, Hsl};
use crate::data::cases::{normalize_current, CaseCounts, CurrentMetrics};
use crate::data::codes::{build_code_map, build_neighbour_map};
use crate::data::feeds::Feeds;
use crate::data::series::{normalize_series, TimeSeriesTable};
use crate::map::PaintTarget;

/// One animation step: paint one date, then wait this long.
pub const TICK: Duration = Duration::from_millis(500);

pub const IDLE_LABEL: &str = "Time series";
pub const PLAYING_LABEL: &str = "Stop time series";

/// Time-series playback state. The search controller checks this before
/// repainting the map, and every tick checks it before continuing, which
/// keeps the two writers off the shared paint target at the same time.
enum Playback {
    Idle,
    Playing {
        dates: Vec<NaiveDate>,
        next: usize,
        last_tick: Option<Instant>,
    },
}

/// One row of the searched-countries table.
pub struct TableRow<'a> {
    pub name: &'a str,
    pub counts: Option<&'a CaseCounts>,
}

/// All session state: the normalized tables (immutable after construction)
/// and the two controllers' mutable state. Construction order is fixed:
/// code map first, then both normalizers against it.
pub struct Session {
    code_map: HashMap<String, String>,
    neighbours: HashMap<String, Vec<String>>,
    current: CurrentMetrics,
    series: TimeSeriesTable,
    /// All known country names, sorted, for the autocomplete input.
    names: Vec<String>,
    /// Reporting date of the current feed ("statistics as of").
    pub as_of: String,
    /// Date whose data is on the map right now.
    pub displayed_date: String,
    /// Countries looked up this session, insertion order, never cleared.
    searched: Vec<String>,
    /// Current table display order, most recent first.
    table_order: Vec<String>,
    playback: Playback,
}

impl Session {
    pub fn new(feeds: &Feeds) -> Self {
        let code_map = build_code_map(&feeds.countries);
        let neighbours = build_neighbour_map(&feeds.countries);
        let current = normalize_current(&feeds.current.data, &code_map);
        let series = normalize_series(&feeds.series, &code_map);

        let mut names: Vec<String> = code_map.keys().cloned().collect();
        names.sort();

        Self {
            code_map,
            neighbours,
            current,
            series,
            names,
            as_of: feeds.current.dt.clone(),
            displayed_date: feeds.current.dt.clone(),
            searched: Vec::new(),
            table_order: Vec::new(),
            playback: Playback::Idle,
        }
    }

    pub fn known_names(&self) -> &[String] {
        &self.names
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.playback, Playback::Playing { .. })
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.is_playing() {
            PLAYING_LABEL
        } else {
            IDLE_LABEL
        }
    }

    /// Full repaint from the current metrics: reset, one batch over every
    /// code with data, displayed date back to the feed's reporting date.
    pub fn paint_current_situation(&mut self, view: &mut dyn PaintTarget) {
        view.reset_paint();
        let batch: HashMap<String, Hsl> = self
            .current
            .iter()
            .map(|(code, counts)| {
                (
                    code.clone(),
                    severity_color(Some(counts.confirmed), Some(counts.deaths)),
                )
            })
            .collect();
        view.paint_batch(&batch);
        self.displayed_date = self.as_of.clone();
    }

    /// Start playback from the earliest date, or stop it and restore the
    /// current-situation view.
    pub fn toggle_playback(&mut self, view: &mut dyn PaintTarget) {
        if self.is_playing() {
            self.stop(view);
        } else if !self.series.is_empty() {
            self.playback = Playback::Playing {
                dates: self.series.keys().copied().collect(),
                next: 0,
                last_tick: None,
            };
        }
    }

    fn stop(&mut self, view: &mut dyn PaintTarget) {
        self.playback = Playback::Idle;
        self.paint_current_situation(view);
    }

    /// Advance playback if a tick is due. Called once per event-loop
    /// iteration; paints at most one date per elapsed tick, so stopping
    /// takes effect within one tick.
    pub fn tick(&mut self, now: Instant, view: &mut dyn PaintTarget) {
        let playback = std::mem::replace(&mut self.playback, Playback::Idle);
        let Playback::Playing { dates, next, last_tick } = playback else {
            return;
        };

        if let Some(last) = last_tick {
            if now.duration_since(last) < TICK {
                self.playback = Playback::Playing { dates, next, last_tick };
                return;
            }
        }

        let Some(&date) = dates.get(next) else {
            // Past the end of the range: back to the live view.
            self.stop(view);
            return;
        };

        let batch = self.color_batch_for(date);
        self.displayed_date = date.format("%Y-%m-%d").to_string();
        view.paint_batch(&batch);

        self.playback = Playback::Playing {
            dates,
            next: next + 1,
            last_tick: Some(now),
        };
    }

    fn color_batch_for(&self, date: NaiveDate) -> HashMap<String, Hsl> {
        self.series
            .get(&date)
            .map(|day| {
                day.iter()
                    .map(|(code, count)| {
                        (
                            code.clone(),
                            severity_color(Some(count.confirmed), Some(count.deaths)),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Handle a submitted search term. Unknown names are ignored. Known
    /// names update the table order (and the searched set on first
    /// lookup); the map is only repainted when no animation is running.
    /// Returns true when the term was accepted, so the caller clears the
    /// input.
    pub fn handle_search(&mut self, term: &str, view: &mut dyn PaintTarget) -> bool {
        let Some(code) = self.code_map.get(term).cloned() else {
            return false;
        };

        if self.searched.iter().any(|n| n == term) {
            // Repeat lookup: older entries end up alphabetical below the
            // current one. Each insert-at-top of the reversed sort lands
            // them back in ascending order.
            let mut others: Vec<String> = self
                .searched
                .iter()
                .filter(|n| n.as_str() != term)
                .cloned()
                .collect();
            others.sort();
            others.reverse();

            self.table_order.clear();
            for name in others {
                self.table_order.insert(0, name);
            }
            self.table_order.insert(0, term.to_string());
        } else {
            self.searched.push(term.to_string());
            self.table_order.insert(0, term.to_string());
        }

        if !self.is_playing() {
            view.reset_paint();

            let searched: HashMap<String, Hsl> =
                [(code.clone(), self.color_for_code(&code))].into_iter().collect();
            view.paint_batch(&searched);

            if let Some(neighbours) = self.neighbours.get(&code) {
                let batch: HashMap<String, Hsl> = neighbours
                    .iter()
                    .map(|n| (n.clone(), self.color_for_code(n)))
                    .collect();
                view.paint_batch(&batch);
            }
        }

        true
    }

    fn color_for_code(&self, code: &str) -> Hsl {
        match self.current.get(code) {
            Some(c) => severity_color(Some(c.confirmed), Some(c.deaths)),
            None => severity_color(None, None),
        }
    }

    /// Table rows in display order. Known names without current metrics
    /// get a row with no counts (rendered as dashes); names that stopped
    /// resolving contribute nothing.
    pub fn table_rows(&self) -> Vec<TableRow<'_>> {
        self.table_order
            .iter()
            .filter_map(|name| {
                let code = self.code_map.get(name)?;
                Some(TableRow {
                    name,
                    counts: self.current.get(code),
                })
            })
            .collect()
    }
}
