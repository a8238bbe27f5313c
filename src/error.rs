// Errors only come from the window boundary and from startup configuration.
// Painting, layer edits and compositing never fail.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String),
    #[error("window update error: {0}")]
    WindowUpdate(String),
    #[error("invalid canvas size {width}x{height}: both sides must be at least 1 pixel")]
    InvalidCanvas { width: u32, height: u32 },
}
