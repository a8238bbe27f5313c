// Startup options. Everything here is fixed for the lifetime of the window.

use crate::error::Error;
use clap::{ArgAction, Parser, ValueEnum};

/// Which preset table the brush resolver uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum BrushProfile {
    /// Pencil follows the brush size; Ball Pen is exactly the brush size.
    #[default]
    Standard,
    /// Pencil is a 1px hairline; Ball Pen is one pixel wider than the brush size.
    Fine,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "layer-sketch", version, about = "Layered freehand sketching canvas")]
pub struct Config {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Preset table used to turn brush presets into stroke widths
    #[arg(long, value_enum, default_value_t = BrushProfile::Standard)]
    pub profile: BrushProfile,

    /// Stamp a dot on pointer-down so single clicks leave a mark
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub dot_on_press: bool,

    /// Target frame rate of the window loop
    #[arg(long, default_value_t = 60)]
    pub fps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            profile: BrushProfile::Standard,
            dot_on_press: true,
            fps: 60,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidCanvas { width: self.width, height: self.height });
        }
        Ok(())
    }
}
