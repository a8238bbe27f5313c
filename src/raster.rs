// Software line rasterizer over RGBA layer bitmaps.
// Lines are drawn straight into the bitmap (immediate mode): once a segment is
// down, only its pixels remain.

use crate::brush::LineCap;
use crate::types::{Point, Rgb};
use image::{Rgba, RgbaImage};

pub type Bitmap = RgbaImage;

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Everything needed to draw one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgb,
    pub alpha: u8,
    pub width: f32,
    pub cap: LineCap,
}

/// Fresh fully transparent bitmap.
pub fn blank(width: u32, height: u32) -> Bitmap {
    RgbaImage::from_pixel(width, height, TRANSPARENT)
}

pub fn clear(bitmap: &mut Bitmap) {
    for px in bitmap.pixels_mut() {
        *px = TRANSPARENT;
    }
}

/// Source-over of a straight-alpha colour onto a straight-alpha pixel.
/// `src_alpha` is in [0,1] and already includes coverage.
#[inline]
pub fn blend_over(dst: Rgba<u8>, src: Rgb, src_alpha: f32) -> Rgba<u8> {
    let sa = src_alpha.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return TRANSPARENT;
    }
    let mix = |s: u8, d: u8| -> u8 {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        mix(src.r, dst[0]),
        mix(src.g, dst[1]),
        mix(src.b, dst[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Anti-aliased thick line from `p1` to `p2`. A zero-length segment leaves a
/// dot the shape of the cap.
pub fn draw_line(bitmap: &mut Bitmap, p1: Point, p2: Point, style: &StrokeStyle) {
    if style.alpha == 0 || bitmap.width() == 0 || bitmap.height() == 0 {
        return;
    }
    let half = (style.width * 0.5).max(0.5);
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let len = (dx * dx + dy * dy).sqrt();
    // Unit direction; a dot has no direction so any axis works for the square cap.
    let (ux, uy) = if len > f32::EPSILON { (dx / len, dy / len) } else { (1.0, 0.0) };
    let base_alpha = style.alpha as f32 / 255.0;

    // Only scan the box the pen can touch (plus one pixel of anti-aliasing).
    let reach = half * std::f32::consts::SQRT_2 + 1.0;
    let x_min = (p1.x.min(p2.x) - reach).floor().max(0.0) as u32;
    let y_min = (p1.y.min(p2.y) - reach).floor().max(0.0) as u32;
    let x_max = (p1.x.max(p2.x) + reach).ceil().min(bitmap.width() as f32 - 1.0);
    let y_max = (p1.y.max(p2.y) + reach).ceil().min(bitmap.height() as f32 - 1.0);
    if x_max < 0.0 || y_max < 0.0 {
        return;
    }
    let (x_max, y_max) = (x_max as u32, y_max as u32);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            // Sample at the pixel centre.
            let cx = x as f32 + 0.5 - p1.x;
            let cy = y as f32 + 0.5 - p1.y;
            let along = cx * ux + cy * uy;
            let across = (cx * uy - cy * ux).abs();

            let dist = match style.cap {
                LineCap::Round => {
                    let t = along.clamp(0.0, len);
                    let (ex, ey) = (cx - t * ux, cy - t * uy);
                    (ex * ex + ey * ey).sqrt()
                }
                LineCap::Square => across.max((-along).max(along - len)),
            };

            let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }
            let px = bitmap.get_pixel_mut(x, y);
            *px = blend_over(*px, style.color, base_alpha * coverage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(alpha: u8, width: f32, cap: LineCap) -> StrokeStyle {
        StrokeStyle { color: Rgb::BLACK, alpha, width, cap }
    }

    #[test]
    fn blank_is_transparent() {
        let b = blank(8, 4);
        assert!(b.pixels().all(|p| *p == TRANSPARENT));
    }

    #[test]
    fn opaque_line_covers_its_middle() {
        let mut b = blank(40, 20);
        let (from, to) = (Point::new(5.0, 10.0), Point::new(35.0, 10.0));
        draw_line(&mut b, from, to, &style(255, 4.0, LineCap::Round));
        assert_eq!(*b.get_pixel(20, 10), Rgba([0, 0, 0, 255]));
        assert_eq!(*b.get_pixel(20, 9), Rgba([0, 0, 0, 255]));
        // well clear of the pen
        assert_eq!(b.get_pixel(20, 2)[3], 0);
        assert_eq!(b.get_pixel(20, 17)[3], 0);
    }

    #[test]
    fn translucent_pen_stores_its_alpha() {
        let mut b = blank(30, 30);
        let (from, to) = (Point::new(5.0, 15.0), Point::new(25.0, 15.0));
        draw_line(&mut b, from, to, &style(200, 6.0, LineCap::Round));
        assert_eq!(b.get_pixel(15, 15)[3], 200);
    }

    #[test]
    fn zero_length_segment_leaves_a_dot() {
        let mut b = blank(20, 20);
        let p = Point::new(10.5, 10.5);
        draw_line(&mut b, p, p, &style(120, 5.0, LineCap::Round));
        assert_eq!(b.get_pixel(10, 10)[3], 120);
        assert_eq!(b.get_pixel(0, 0)[3], 0);
        assert_eq!(b.get_pixel(10, 16)[3], 0);
    }

    #[test]
    fn square_cap_reaches_past_the_endpoint() {
        let mut round = blank(40, 20);
        let mut square = blank(40, 20);
        let (a, z) = (Point::new(10.0, 10.0), Point::new(30.0, 10.0));
        draw_line(&mut round, a, z, &style(255, 8.0, LineCap::Round));
        draw_line(&mut square, a, z, &style(255, 8.0, LineCap::Square));
        // Corner of the square end: inside the square cap, outside the round one.
        assert_eq!(square.get_pixel(32, 12)[3], 255);
        assert!(round.get_pixel(32, 13)[3] < 255);
    }

    #[test]
    fn segments_outside_the_bitmap_are_clipped() {
        let mut b = blank(10, 10);
        let (from, to) = (Point::new(-50.0, -50.0), Point::new(-40.0, -45.0));
        draw_line(&mut b, from, to, &style(255, 3.0, LineCap::Round));
        assert!(b.pixels().all(|p| p[3] == 0));
        let (from, to) = (Point::new(-5.0, 5.0), Point::new(15.0, 5.0));
        draw_line(&mut b, from, to, &style(255, 3.0, LineCap::Round));
        assert_eq!(b.get_pixel(0, 5)[3], 255);
        assert_eq!(b.get_pixel(9, 5)[3], 255);
    }

    #[test]
    fn blend_over_accumulates_alpha() {
        let once = blend_over(TRANSPARENT, Rgb::BLACK, 0.5);
        assert_eq!(once[3], 128);
        let twice = blend_over(once, Rgb::BLACK, 0.5);
        assert!((191..=192).contains(&twice[3]));
        let red_on_white = blend_over(Rgba([255, 255, 255, 255]), Rgb::new(255, 0, 0), 1.0);
        assert_eq!(red_on_white, Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn clear_wipes_everything() {
        let mut b = blank(10, 10);
        let (from, to) = (Point::new(0.0, 0.0), Point::new(9.0, 9.0));
        draw_line(&mut b, from, to, &style(255, 3.0, LineCap::Round));
        assert!(b.pixels().any(|p| p[3] > 0));
        clear(&mut b);
        assert!(b.pixels().all(|p| *p == TRANSPARENT));
    }
}
