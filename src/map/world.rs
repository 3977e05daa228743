use std::collections::HashMap;

use ratatui::style::Color;

use crate::braille::BrailleCanvas;
use crate::color::Hsl;
use crate::data::LineString;
use crate::map::geometry::draw_line;
use crate::map::projection::Viewport;
use crate::map::PaintTarget;

/// Outline color for countries nobody has painted yet.
const NEUTRAL: Color = Color::DarkGray;

struct Country {
    code: String,
    outlines: Vec<LineString>,
}

/// World map with per-country outline geometry and the current choropleth
/// fill assignment.
pub struct WorldMap {
    countries: Vec<Country>,
    fills: HashMap<String, Color>,
}

impl WorldMap {
    pub fn new() -> Self {
        Self {
            countries: Vec::new(),
            fills: HashMap::new(),
        }
    }

    /// Build from loaded shapes (alpha-3 code -> outlines).
    pub fn from_shapes(shapes: Vec<(String, Vec<LineString>)>) -> Self {
        Self {
            countries: shapes
                .into_iter()
                .map(|(code, outlines)| Country { code, outlines })
                .collect(),
            fills: HashMap::new(),
        }
    }

    /// Check if any geometry is loaded
    pub fn has_data(&self) -> bool {
        !self.countries.is_empty()
    }

    /// Render every country outline to a fresh canvas, each in its
    /// assigned fill color (neutral when unpainted).
    pub fn render(&self, char_width: usize, char_height: usize, viewport: &Viewport) -> BrailleCanvas {
        let mut canvas = BrailleCanvas::new(char_width, char_height);

        for country in &self.countries {
            let color = self.fills.get(&country.code).copied().unwrap_or(NEUTRAL);
            for line in &country.outlines {
                self.draw_linestring(&mut canvas, line, viewport, color);
            }
        }

        canvas
    }

    /// Draw a linestring with viewport culling
    fn draw_linestring(
        &self,
        canvas: &mut BrailleCanvas,
        line: &LineString,
        viewport: &Viewport,
        color: Color,
    ) {
        if line.len() < 2 {
            return;
        }

        let mut prev: Option<(i32, i32)> = None;

        for &(lon, lat) in line {
            let (px, py) = viewport.project(lon, lat);

            if let Some((prev_x, prev_y)) = prev {
                let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
                if dist < viewport.width && viewport.line_might_be_visible((prev_x, prev_y), (px, py)) {
                    draw_line(canvas, prev_x, prev_y, px, py, color);
                }
            }

            prev = Some((px, py));
        }
    }
}

impl PaintTarget for WorldMap {
    fn reset_paint(&mut self) {
        self.fills.clear();
    }

    fn paint_batch(&mut self, batch: &HashMap<String, Hsl>) {
        for (code, color) in batch {
            self.fills.insert(code.clone(), color.to_rgb());
        }
    }
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::severity_color;

    fn square(code: &str) -> (String, Vec<LineString>) {
        (
            code.to_string(),
            vec![vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]],
        )
    }

    #[test]
    fn test_paint_batch_merges() {
        let mut map = WorldMap::from_shapes(vec![square("FIN"), square("SWE")]);
        let batch: HashMap<String, Hsl> =
            [("FIN".to_string(), severity_color(Some(10), Some(1)))].into_iter().collect();
        map.paint_batch(&batch);
        assert!(map.fills.contains_key("FIN"));
        assert!(!map.fills.contains_key("SWE"));

        let batch2: HashMap<String, Hsl> =
            [("SWE".to_string(), severity_color(Some(5), None))].into_iter().collect();
        map.paint_batch(&batch2);
        // Partial batches merge, they do not replace.
        assert!(map.fills.contains_key("FIN"));
        assert!(map.fills.contains_key("SWE"));
    }

    #[test]
    fn test_reset_clears_fills() {
        let mut map = WorldMap::from_shapes(vec![square("FIN")]);
        let batch: HashMap<String, Hsl> =
            [("FIN".to_string(), severity_color(Some(10), Some(1)))].into_iter().collect();
        map.paint_batch(&batch);
        map.reset_paint();
        assert!(map.fills.is_empty());
    }

    #[test]
    fn test_render_draws_outline() {
        let map = WorldMap::from_shapes(vec![square("FIN")]);
        let viewport = Viewport::world(80, 160);
        let canvas = map.render(40, 40, &viewport);
        let drawn = (0..40).any(|cy| (0..40).any(|cx| canvas.cell(cx, cy).is_some()));
        assert!(drawn, "square outline must hit the canvas");
    }
}
