use std::time::Instant;

use crate::map::{Viewport, WorldMap};
use crate::session::Session;

/// Character columns reserved for the searched-countries panel.
pub const SIDE_PANEL_WIDTH: u16 = 36;

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub world: WorldMap,
    pub session: Session,
    /// Current contents of the search input line.
    pub search_input: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(session: Session, world: WorldMap, width: usize, height: usize) -> Self {
        let (pixel_width, pixel_height) = map_pixels(width, height);
        let mut app = Self {
            viewport: Viewport::world(pixel_width, pixel_height),
            world,
            session,
            search_input: String::new(),
            should_quit: false,
        };
        // First paint: the live current-situation view.
        app.session.paint_current_situation(&mut app.world);
        app
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let (pixel_width, pixel_height) = map_pixels(width, height);
        self.viewport.width = pixel_width;
        self.viewport.height = pixel_height;
    }

    /// Pan the map
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn push_char(&mut self, c: char) {
        self.search_input.push(c);
    }

    pub fn backspace(&mut self) {
        self.search_input.pop();
    }

    pub fn clear_input(&mut self) {
        self.search_input.clear();
    }

    /// First known country name completing the current input, if any.
    pub fn suggestion(&self) -> Option<&str> {
        if self.search_input.is_empty() {
            return None;
        }
        let prefix = self.search_input.to_lowercase();
        self.session
            .known_names()
            .iter()
            .map(String::as_str)
            .find(|name| name.to_lowercase().starts_with(&prefix) && *name != self.search_input)
    }

    pub fn accept_suggestion(&mut self) {
        if let Some(name) = self.suggestion() {
            self.search_input = name.to_string();
        }
    }

    /// Submit the search input. The session ignores unknown names; the
    /// input only clears on an accepted lookup, like a form that keeps
    /// a typo around for correction.
    pub fn submit_search(&mut self) {
        let term = self.search_input.trim().to_string();
        if term.is_empty() {
            return;
        }
        if self.session.handle_search(&term, &mut self.world) {
            self.search_input.clear();
        }
    }

    pub fn toggle_animation(&mut self) {
        self.session.toggle_playback(&mut self.world);
    }

    /// Drive playback; called once per event-loop iteration.
    pub fn tick(&mut self, now: Instant) {
        self.session.tick(now, &mut self.world);
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }
}

/// Braille pixel dimensions of the map pane for a terminal size: the side
/// panel and the pane border come off first, then 2x4 dots per cell.
fn map_pixels(width: usize, height: usize) -> (usize, usize) {
    let inner_width = width
        .saturating_sub(SIDE_PANEL_WIDTH as usize)
        .saturating_sub(2);
    let inner_height = height.saturating_sub(3); // border + status bar
    (inner_width * 2, inner_height * 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feeds::{CountryRecord, CurrentFeed, Feeds};
    use std::collections::HashMap;

    fn app() -> App {
        let feeds = Feeds {
            countries: vec![
                CountryRecord {
                    name: "Finland".to_string(),
                    alpha3_code: "FIN".to_string(),
                    borders: vec![],
                },
                CountryRecord {
                    name: "France".to_string(),
                    alpha3_code: "FRA".to_string(),
                    borders: vec![],
                },
            ],
            current: CurrentFeed { dt: "2020-04-01".to_string(), data: vec![] },
            series: HashMap::new(),
        };
        App::new(Session::new(&feeds), WorldMap::new(), 120, 40)
    }

    #[test]
    fn test_suggestion_prefix_match() {
        let mut app = app();
        app.search_input = "fin".to_string();
        assert_eq!(app.suggestion(), Some("Finland"));
        app.accept_suggestion();
        assert_eq!(app.search_input, "Finland");
        // Exact match offers nothing further.
        assert_eq!(app.suggestion(), None);
    }

    #[test]
    fn test_submit_keeps_unknown_term() {
        let mut app = app();
        app.search_input = "Atlantis".to_string();
        app.submit_search();
        assert_eq!(app.search_input, "Atlantis");
    }

    #[test]
    fn test_submit_clears_known_term() {
        let mut app = app();
        app.search_input = "Finland".to_string();
        app.submit_search();
        assert!(app.search_input.is_empty());
        assert_eq!(app.session.table_rows().len(), 1);
    }
}
