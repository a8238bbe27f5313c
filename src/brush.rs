// Brush presets and the resolver that turns a preset + base size into pen parameters.

use crate::config::BrushProfile;
use crate::raster::StrokeStyle;
use crate::types::Rgb;

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 50;
pub const DEFAULT_BRUSH_SIZE: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushPreset {
    Pencil,
    InkPen,
    BallPen,
    Brush,
}

impl BrushPreset {
    pub const ALL: [BrushPreset; 4] =
        [BrushPreset::Pencil, BrushPreset::InkPen, BrushPreset::BallPen, BrushPreset::Brush];

    pub fn name(self) -> &'static str {
        match self {
            BrushPreset::Pencil => "Pencil",
            BrushPreset::InkPen => "Ink Pen",
            BrushPreset::BallPen => "Ball Pen",
            BrushPreset::Brush => "Brush",
        }
    }

    /// Look a preset up by its display name. Case and surrounding whitespace are ignored.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Round,
    /// Square end extending half the width past each endpoint.
    Square,
}

/// Output of [`resolve`]: what the pen looks like, independent of colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedBrush {
    pub width: u32,
    pub alpha: u8,
    pub cap: LineCap,
}

/// Map a preset and base size to concrete pen parameters.
///
/// `None` stands for a preset name nobody recognised: it draws at the base
/// size, fully opaque, with the default square cap.
pub fn resolve(
    preset: Option<BrushPreset>,
    base_size: u32,
    profile: BrushProfile,
) -> ResolvedBrush {
    let base = base_size.max(MIN_BRUSH_SIZE);
    let Some(preset) = preset else {
        return ResolvedBrush { width: base, alpha: 255, cap: LineCap::Square };
    };
    let (width, alpha) = match (preset, profile) {
        (BrushPreset::Pencil, BrushProfile::Standard) => (base, 120),
        (BrushPreset::Pencil, BrushProfile::Fine) => (1, 120),
        (BrushPreset::InkPen, _) => (base, 200),
        (BrushPreset::BallPen, BrushProfile::Standard) => (base, 255),
        (BrushPreset::BallPen, BrushProfile::Fine) => (base + 1, 255),
        (BrushPreset::Brush, _) => (base * 2, 80),
    };
    ResolvedBrush { width, alpha, cap: LineCap::Round }
}

/// Current brush as set by the UI controls; read on every segment.
#[derive(Clone, Debug, PartialEq)]
pub struct BrushState {
    pub color: Rgb,
    size: u32,
    preset: Option<BrushPreset>,
}

impl Default for BrushState {
    fn default() -> Self {
        Self { color: Rgb::BLACK, size: DEFAULT_BRUSH_SIZE, preset: Some(BrushPreset::Pencil) }
    }
}

impl BrushState {
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Clamp into the slider range.
    pub fn set_size(&mut self, size: i64) {
        self.size = size.clamp(MIN_BRUSH_SIZE as i64, MAX_BRUSH_SIZE as i64) as u32;
    }

    /// Select by display name. Unknown names are kept as "no preset" and
    /// render with the fallback pen. Returns whether the name was recognised.
    pub fn set_preset_by_name(&mut self, name: &str) -> bool {
        self.preset = BrushPreset::parse(name);
        self.preset.is_some()
    }

    /// Visual: the preset name shown in the HUD.
    pub fn preset_label(&self) -> &'static str {
        self.preset.map_or("Default", BrushPreset::name)
    }

    pub fn stroke_style(&self, profile: BrushProfile) -> StrokeStyle {
        let resolved = resolve(self.preset, self.size, profile);
        StrokeStyle {
            color: self.color,
            alpha: resolved.alpha,
            width: resolved.width as f32,
            cap: resolved.cap,
        }
    }
}
