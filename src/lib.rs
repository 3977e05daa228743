//! Terminal COVID-19 choropleth world map.
//!
//! Three JSON feeds (country metadata/borders, current situation,
//! historical time series) are reconciled into one alpha-3-code-indexed
//! model; a severity color function maps counts onto the map fills; a
//! session state machine coordinates the time-series playback and the
//! country search so only one of them paints at a time.

pub mod app;
pub mod braille;
pub mod color;
pub mod data;
pub mod map;
pub mod session;
pub mod ui;
