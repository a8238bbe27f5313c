// Layer store: an ordered stack of transparent bitmaps.
// Insertion order is paint order; the last layer added ends up on top.
// Visual: each layer is a sheet of glass; strokes land on the selected one.

use crate::raster::{self, Bitmap};
use crate::types::LayerId;
use log::{debug, warn};

/// One sheet of the stack. Owned by the store; dropped with it.
pub struct Layer {
    id: LayerId,
    pub name: String,
    pub bitmap: Bitmap,
    opacity: f32,
    pub visible: bool,
}

impl Layer {
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Always in [0,1].
    pub fn opacity(&self) -> f32 {
        self.opacity
    }
}

pub struct LayerStore {
    width: u32,
    height: u32,
    layers: Vec<Layer>,
    active: Option<usize>, // index into `layers`; Some whenever `layers` is non-empty
    next_id: u32,
}

impl LayerStore {
    /// Empty store whose layers will all be `width` x `height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, layers: Vec::new(), active: None, next_id: 1 }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    /// Id of the layer at `index` in paint order (0 = bottom).
    pub fn id_at(&self, index: usize) -> Option<LayerId> {
        self.layers.get(index).map(|l| l.id)
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    fn index_of(&self, id: LayerId) -> Option<usize> {
        let idx = self.layers.iter().position(|l| l.id == id);
        if idx.is_none() {
            warn!("no layer with id {:?}", id);
        }
        idx
    }

    /// Append a fully transparent layer on top and make it active.
    /// Visual: nothing changes on screen until you draw on it.
    pub fn add_layer(&mut self, name: impl Into<String>) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        let layer = Layer {
            id,
            name: name.into(),
            bitmap: raster::blank(self.width, self.height),
            opacity: 1.0,
            visible: true,
        };
        debug!("add layer {:?} '{}'", id, layer.name);
        self.layers.push(layer);
        self.active = Some(self.layers.len() - 1);
        id
    }

    pub fn active_id(&self) -> Option<LayerId> {
        self.active.map(|i| self.layers[i].id)
    }

    pub fn active(&self) -> Option<&Layer> {
        self.active.map(|i| &self.layers[i])
    }

    /// Returns false (and changes nothing) for an unknown id.
    /// Visual: the HUD names the newly selected layer.
    pub fn set_active(&mut self, id: LayerId) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.active = Some(i);
                true
            }
            None => false,
        }
    }

    /// Move the selection one layer up, wrapping back to the bottom.
    pub fn cycle_active(&mut self) -> Option<LayerId> {
        let next = (self.active? + 1) % self.layers.len();
        self.active = Some(next);
        Some(self.layers[next].id)
    }

    /// Clamps into [0,1].
    /// Visual: 0 makes the layer disappear, 1 shows it at full strength.
    pub fn set_opacity(&mut self, id: LayerId, value: f32) -> bool {
        let Some(i) = self.index_of(id) else { return false };
        // NaN clamps to NaN; treat it as fully transparent.
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.layers[i].opacity = value;
        true
    }

    /// Opacity from a 0–100 slider value.
    pub fn set_opacity_percent(&mut self, id: LayerId, percent: i32) -> bool {
        self.set_opacity(id, percent.clamp(0, 100) as f32 / 100.0)
    }

    /// Visual: a hidden layer keeps its pixels but is skipped when compositing.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> bool {
        let Some(i) = self.index_of(id) else { return false };
        self.layers[i].visible = visible;
        true
    }

    /// Reset the bitmap to fully transparent. Name, opacity and visibility stay.
    /// Visual: every stroke on this layer is gone; other layers are untouched.
    pub fn clear(&mut self, id: LayerId) -> bool {
        let Some(i) = self.index_of(id) else { return false };
        raster::clear(&mut self.layers[i].bitmap);
        true
    }

    /// Borrow one layer's bitmap for drawing.
    pub fn bitmap_mut(&mut self, id: LayerId) -> Option<&mut Bitmap> {
        self.layers.iter_mut().find(|l| l.id == id).map(|l| &mut l.bitmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::LineCap;
    use crate::raster::StrokeStyle;
    use crate::types::{Point, Rgb};

    fn pen(width: f32) -> StrokeStyle {
        StrokeStyle { color: Rgb::BLACK, alpha: 255, width, cap: LineCap::Round }
    }

    #[test]
    fn empty_store_has_no_active_layer() {
        let mut s = LayerStore::new(10, 10);
        assert_eq!(s.len(), 0);
        assert_eq!(s.id_at(0), None);
        assert_eq!(s.active_id(), None);
        assert_eq!(s.cycle_active(), None);
    }

    #[test]
    fn new_layer_is_transparent_sized_and_active() {
        let mut s = LayerStore::new(12, 7);
        let a = s.add_layer("L1");
        let b = s.add_layer("L2");
        assert_ne!(a, b);
        assert_eq!(s.active_id(), Some(b));
        let l = s.get(b).unwrap();
        assert_eq!(l.bitmap.dimensions(), (12, 7));
        assert!(l.bitmap.pixels().all(|p| p[3] == 0));
        assert_eq!(l.opacity(), 1.0);
        assert!(l.visible);
        let names: Vec<_> = s.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["L1", "L2"]);
    }

    #[test]
    fn adding_a_layer_leaves_others_alone() {
        let mut s = LayerStore::new(20, 20);
        let a = s.add_layer("L1");
        let (from, to) = (Point::new(2.0, 2.0), Point::new(18.0, 18.0));
        raster::draw_line(s.bitmap_mut(a).unwrap(), from, to, &pen(3.0));
        s.set_opacity(a, 0.3);
        let before = s.get(a).unwrap().bitmap.clone();

        s.add_layer("L2");
        let after = s.get(a).unwrap();
        assert_eq!(after.bitmap, before);
        assert_eq!(after.opacity(), 0.3);
    }

    #[test]
    fn opacity_is_clamped() {
        let mut s = LayerStore::new(4, 4);
        let a = s.add_layer("L1");
        s.set_opacity_percent(a, -10);
        assert_eq!(s.get(a).unwrap().opacity(), 0.0);
        s.set_opacity_percent(a, 150);
        assert_eq!(s.get(a).unwrap().opacity(), 1.0);
        s.set_opacity_percent(a, 50);
        assert_eq!(s.get(a).unwrap().opacity(), 0.5);
        s.set_opacity(a, 7.0);
        assert_eq!(s.get(a).unwrap().opacity(), 1.0);
        s.set_opacity(a, f32::NAN);
        assert_eq!(s.get(a).unwrap().opacity(), 0.0);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut s = LayerStore::new(4, 4);
        let a = s.add_layer("L1");
        let ghost = LayerId(99);
        assert!(!s.set_active(ghost));
        assert!(!s.set_opacity(ghost, 0.2));
        assert!(!s.set_visible(ghost, false));
        assert!(!s.clear(ghost));
        assert_eq!(s.active_id(), Some(a));
    }

    #[test]
    fn select_and_cycle() {
        let mut s = LayerStore::new(4, 4);
        let a = s.add_layer("L1");
        let b = s.add_layer("L2");
        let c = s.add_layer("L3");
        assert_eq!(s.id_at(1), Some(b));
        assert!(s.set_active(a));
        assert_eq!(s.active_id(), Some(a));
        assert_eq!(s.cycle_active(), Some(b));
        assert_eq!(s.cycle_active(), Some(c));
        assert_eq!(s.cycle_active(), Some(a));
    }

    #[test]
    fn clear_keeps_layer_settings() {
        let mut s = LayerStore::new(10, 10);
        let a = s.add_layer("L1");
        let (from, to) = (Point::new(1.0, 5.0), Point::new(9.0, 5.0));
        raster::draw_line(s.bitmap_mut(a).unwrap(), from, to, &pen(4.0));
        s.set_opacity(a, 0.4);
        s.set_visible(a, false);
        assert!(s.clear(a));
        let l = s.get(a).unwrap();
        assert!(l.bitmap.pixels().all(|p| p[3] == 0));
        assert_eq!(l.opacity(), 0.4);
        assert!(!l.visible);
        assert_eq!(l.name, "L1");
    }
}
