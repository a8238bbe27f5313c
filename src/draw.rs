// Window + input + HUD.
// 1) A minifb window that shows the composited canvas.
// 2) Raw mouse/keyboard state turned into app `Event`s.
// 3) A crosshair and a 5x7 bitmap-font status bar drawn over the canvas.

use crate::app::{App, Event};
use crate::brush::BrushPreset;
use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rgb};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,
}

impl Drawer {
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window })
    }

    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in canvas pixels, clamped to the window so a drag that
    /// leaves the window keeps following the edge.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| Point::new(x.max(0.0), y.max(0.0)))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Keys that went down since the last frame.
    pub fn pressed_keys(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::No)
    }
}

/* ---------- Input mapping ---------- */

/// Turns the per-frame "is the left button down, where is the mouse" poll
/// into pointer down/move/up events.
#[derive(Default)]
pub struct PointerTracker {
    down: bool,
    last: Option<Point>,
}

impl PointerTracker {
    pub fn update(&mut self, button_down: bool, pos: Option<Point>) -> Option<Event> {
        match (self.down, button_down) {
            (false, true) => {
                let p = pos?;
                self.down = true;
                self.last = Some(p);
                Some(Event::PointerDown(p))
            }
            (true, true) => {
                let p = pos?;
                if self.last == Some(p) {
                    return None;
                }
                self.last = Some(p);
                Some(Event::PointerMove(p))
            }
            (true, false) => {
                self.down = false;
                self.last = None;
                Some(Event::PointerUp)
            }
            (false, false) => None,
        }
    }
}

/// Fixed colour swatches cycled with `K`; stands in for a colour dialog.
pub struct Palette {
    next: usize,
}

impl Palette {
    pub const COLORS: [Rgb; 8] = [
        Rgb::new(0, 0, 0),
        Rgb::new(200, 30, 30),
        Rgb::new(30, 140, 40),
        Rgb::new(30, 60, 200),
        Rgb::new(240, 140, 0),
        Rgb::new(130, 40, 170),
        Rgb::new(120, 120, 120),
        Rgb::new(255, 255, 255),
    ];
}

impl Default for Palette {
    /// Black is the starting brush colour, so the first press moves on from it.
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl Iterator for Palette {
    type Item = Rgb;

    fn next(&mut self) -> Option<Rgb> {
        let c = Self::COLORS[self.next];
        self.next = (self.next + 1) % Self::COLORS.len();
        Some(c)
    }
}

pub const OPACITY_STEP: i32 = 10;

/// F1 selects the bottom layer, F2 the one above it, and so on.
const FN_KEYS: [Key; 9] =
    [Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6, Key::F7, Key::F8, Key::F9];

/// Keyboard shortcut for one key press, given the current app state.
/// Visual: F1..F9 pick layers bottom-up, V hides or shows the selected one.
pub fn key_event(key: Key, app: &App, palette: &mut Palette) -> Option<Event> {
    let preset = |p: BrushPreset| Some(Event::BrushPresetChanged(p.name().to_string()));
    let opacity = || app.layers.active().map(|l| (l.opacity() * 100.0).round() as i32);
    match key {
        Key::Key1 => preset(BrushPreset::Pencil),
        Key::Key2 => preset(BrushPreset::InkPen),
        Key::Key3 => preset(BrushPreset::BallPen),
        Key::Key4 => preset(BrushPreset::Brush),
        Key::LeftBracket => Some(Event::BrushSizeChanged(app.brush.size() as i32 - 1)),
        Key::RightBracket => Some(Event::BrushSizeChanged(app.brush.size() as i32 + 1)),
        Key::K => palette.next().map(Event::ColorChosen),
        Key::N => Some(Event::AddLayerClicked),
        Key::Tab => Some(Event::CycleActiveLayer),
        Key::V => app.layers.active().map(|l| Event::SetVisible(l.id(), !l.visible)),
        Key::Up => opacity().map(|o| Event::OpacityChanged(o + OPACITY_STEP)),
        Key::Down => opacity().map(|o| Event::OpacityChanged(o - OPACITY_STEP)),
        Key::C => Some(Event::ClearClicked),
        _ if FN_KEYS.contains(&key) => FN_KEYS
            .iter()
            .position(|k| *k == key)
            .and_then(|i| app.layers.id_at(i))
            .map(Event::SelectLayer),
        _ => None,
    }
}

/* ---------- Software drawing: pixels, crosshair, tiny bitmap font ---------- */

#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// 1px Bresenham line, used for overlays only (strokes go through `raster`).
fn draw_thin_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// "+" with a gap in the middle so the pixel under the pointer stays visible.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_thin_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_thin_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_thin_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_thin_line(fb, cx, cy + 2, cx, cy + size, color);
}

/// Halve every channel inside the rectangle; what is underneath stays readable.
pub fn shade_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32) {
    let (x0, y0) = (x.max(0) as usize, y.max(0) as usize);
    let x1 = ((x + w).max(0) as usize).min(fb.width);
    let y1 = ((y + h).max(0) as usize).min(fb.height);
    for yy in y0..y1 {
        for px in &mut fb.pixels[yy * fb.width + x0..yy * fb.width + x1.max(x0)] {
            *px = (*px >> 1) & 0x007F_7F7F;
        }
    }
}

/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '/' => g!(0b00000,0b00001,0b00010,0b00100,0b01000,0b10000,0b00000),
        '%' => g!(0b11000,0b11001,0b00010,0b00100,0b01000,0b10011,0b00011),

        _ => None,
    }
}

/// One glyph with a 1px black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (offset, c) in [(1, 0x0000_0000), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                }
            }
        }
    }
}

pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

pub const HUD_HEIGHT: i32 = 14;

/// Shaded strip along the bottom edge with the status text on it.
/// Visual: strokes under the strip show through at half brightness.
pub fn draw_hud(fb: &mut FrameBuffer, status: &str) {
    let top = fb.height as i32 - HUD_HEIGHT;
    shade_rect(fb, 0, top, fb.width as i32, HUD_HEIGHT);
    draw_text_5x7(fb, 4, top + 4, status, 0x00FF_FFFF);
}
