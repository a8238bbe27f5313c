// Compositor: white backdrop, then every visible layer bottom-to-top,
// each scaled by its opacity.
// Visual: what you see in the window before the HUD and crosshair go on top.

use crate::layers::LayerStore;
use crate::types::{FrameBuffer, Rgb};

pub const BACKDROP: Rgb = Rgb::WHITE;

/// Repaint `screen` from scratch. Only the overlap of the screen and the
/// canvas is painted with layers; the rest just gets the backdrop.
/// Visual: hidden layers vanish, half-opacity layers look washed out.
pub fn compose(layers: &LayerStore, screen: &mut FrameBuffer) {
    screen.pixels.fill(BACKDROP.packed());

    let (cw, ch) = layers.size();
    let w = screen.width.min(cw as usize);
    let h = screen.height.min(ch as usize);

    for layer in layers.iter().filter(|l| l.visible) {
        let opacity = layer.opacity();
        if opacity <= 0.0 {
            continue;
        }
        for y in 0..h {
            let row = y * screen.width;
            for x in 0..w {
                let src = layer.bitmap.get_pixel(x as u32, y as u32);
                if src[3] == 0 {
                    continue; // untouched pixel: whatever is below shows through
                }
                let a = src[3] as f32 / 255.0 * opacity;
                let dst = &mut screen.pixels[row + x];
                let base = Rgb::unpack(*dst);
                let out = Rgb::new(
                    mix(base.r, src[0], a),
                    mix(base.g, src[1], a),
                    mix(base.b, src[2], a),
                );
                *dst = out.packed();
            }
        }
    }
}

/// `top` over `base` with weight `a`, straight on the stored sRGB values.
#[inline]
fn mix(base: u8, top: u8, a: f32) -> u8 {
    (top as f32 * a + base as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::LineCap;
    use crate::raster::{self, StrokeStyle};
    use crate::types::Point;

    fn solid(color: Rgb) -> StrokeStyle {
        StrokeStyle { color, alpha: 255, width: 6.0, cap: LineCap::Round }
    }

    fn screen_for(layers: &LayerStore) -> FrameBuffer {
        let (w, h) = layers.size();
        FrameBuffer::new(w as usize, h as usize)
    }

    fn line(layers: &mut LayerStore, id: crate::types::LayerId, y: f32, color: Rgb) {
        let bitmap = layers.bitmap_mut(id).unwrap();
        raster::draw_line(bitmap, Point::new(5.0, y), Point::new(25.0, y), &solid(color));
    }

    #[test]
    fn no_layers_gives_white() {
        let layers = LayerStore::new(8, 8);
        let mut fb = screen_for(&layers);
        compose(&layers, &mut fb);
        assert!(fb.pixels.iter().all(|&p| p == 0x00FF_FFFF));
    }

    #[test]
    fn half_opacity_black_is_mid_gray() {
        let mut layers = LayerStore::new(30, 30);
        let id = layers.add_layer("L1");
        line(&mut layers, id, 15.0, Rgb::BLACK);
        layers.set_opacity_percent(id, 50);

        let mut fb = screen_for(&layers);
        compose(&layers, &mut fb);
        assert_eq!(Rgb::unpack(fb.pixel(15, 15).unwrap()), Rgb::new(128, 128, 128));
        assert_eq!(fb.pixel(15, 2), Some(0x00FF_FFFF));
    }

    #[test]
    fn zero_opacity_layer_shows_nothing() {
        let mut layers = LayerStore::new(30, 30);
        let id = layers.add_layer("L1");
        line(&mut layers, id, 15.0, Rgb::BLACK);
        layers.set_opacity_percent(id, 0);

        let mut fb = screen_for(&layers);
        compose(&layers, &mut fb);
        assert!(fb.pixels.iter().all(|&p| p == 0x00FF_FFFF));
    }

    #[test]
    fn hidden_bottom_layer_is_not_shown() {
        let mut layers = LayerStore::new(30, 30);
        let bottom = layers.add_layer("bottom");
        let top = layers.add_layer("top");
        line(&mut layers, bottom, 5.0, Rgb::new(255, 0, 0));
        line(&mut layers, top, 20.0, Rgb::new(0, 0, 255));
        layers.set_visible(bottom, false);

        let mut fb = screen_for(&layers);
        compose(&layers, &mut fb);
        assert_eq!(fb.pixel(15, 5), Some(0x00FF_FFFF));
        assert_eq!(fb.pixel(15, 20), Some(0x0000_00FF));
    }

    #[test]
    fn later_layers_paint_over_earlier_ones() {
        let mut layers = LayerStore::new(30, 30);
        let bottom = layers.add_layer("bottom");
        let top = layers.add_layer("top");
        line(&mut layers, bottom, 15.0, Rgb::new(255, 0, 0));
        line(&mut layers, top, 15.0, Rgb::new(0, 255, 0));

        let mut fb = screen_for(&layers);
        compose(&layers, &mut fb);
        assert_eq!(fb.pixel(15, 15), Some(0x0000_FF00));
    }

    #[test]
    fn smaller_screen_is_painted_without_panicking() {
        let mut layers = LayerStore::new(30, 30);
        let id = layers.add_layer("L1");
        line(&mut layers, id, 2.0, Rgb::BLACK);
        let mut fb = FrameBuffer::new(10, 5);
        compose(&layers, &mut fb);
        assert_eq!(fb.pixel(7, 2), Some(0));
    }
}
