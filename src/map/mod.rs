mod geometry;
mod projection;
mod world;

pub use projection::Viewport;
pub use world::WorldMap;

use std::collections::HashMap;

use crate::color::Hsl;

/// The map-paint collaborator the controllers write through. Exactly one
/// writer repaints at a time; a full repaint is a reset followed by one
/// batch, anything else merges into the current fills.
pub trait PaintTarget {
    /// Drop every country back to the neutral fill.
    fn reset_paint(&mut self);

    /// Merge a code -> color batch into the current fills.
    fn paint_batch(&mut self, batch: &HashMap<String, Hsl>);
}
