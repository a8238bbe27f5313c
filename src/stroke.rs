// Stroke recorder: turns a pointer drag into line segments on one layer.
//
// The layer is picked at pointer-down and kept for the whole drag, so
// switching the active layer mid-stroke does not split the stroke.
// Visual: hold the left button and move; a line follows the cursor.

use crate::layers::LayerStore;
use crate::raster::{self, StrokeStyle};
use crate::types::{LayerId, Point};
use log::debug;

/// `last` is the end of the previous segment; the next one starts there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeState {
    Idle,
    Dragging { layer: LayerId, last: Point },
}

pub struct StrokeRecorder {
    state: StrokeState,
    dot_on_press: bool,
    segments: usize, // drawn since the last pointer-down
}

impl StrokeRecorder {
    pub fn new(dot_on_press: bool) -> Self {
        Self { state: StrokeState::Idle, dot_on_press, segments: 0 }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, StrokeState::Dragging { .. })
    }

    /// Segments drawn by pointer moves in the current (or last) stroke.
    #[cfg(test)]
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Start a stroke on the active layer. Returns whether anything was drawn.
    /// Visual: with the press dot enabled, a single click leaves a round mark.
    pub fn pointer_down(&mut self, p: Point, layers: &mut LayerStore, style: &StrokeStyle) -> bool {
        let Some(layer) = layers.active_id() else {
            return false;
        };
        debug!("stroke begin on {:?} at ({:.1}, {:.1})", layer, p.x, p.y);
        self.state = StrokeState::Dragging { layer, last: p };
        self.segments = 0;
        if !self.dot_on_press {
            return false;
        }
        match layers.bitmap_mut(layer) {
            Some(bitmap) => {
                raster::draw_line(bitmap, p, p, style);
                true
            }
            None => false,
        }
    }

    /// Extend the stroke to `p`. Returns whether a segment was drawn.
    /// Visual: the line grows from the last pointer position to the new one.
    pub fn pointer_move(&mut self, p: Point, layers: &mut LayerStore, style: &StrokeStyle) -> bool {
        let StrokeState::Dragging { layer, last } = self.state else {
            return false;
        };
        let Some(bitmap) = layers.bitmap_mut(layer) else {
            return false;
        };
        raster::draw_line(bitmap, last, p, style);
        self.state = StrokeState::Dragging { layer, last: p };
        self.segments += 1;
        true
    }

    /// Visual: nothing new is drawn; the next press starts a fresh line.
    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            debug!("stroke end after {} segments", self.segments);
        }
        self.state = StrokeState::Idle;
    }
}
