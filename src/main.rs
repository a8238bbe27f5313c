// Layered sketching canvas.
// • Hold Left Mouse to draw on the active layer.
// • 1-4 pick Pencil / Ink Pen / Ball Pen / Brush, [ and ] change the size, K cycles colours.
// • N adds a layer, Tab selects the next one, V shows/hides it, Up/Down change its opacity.
// • F1-F9 select a layer (F1 = bottom). C clears the active layer. ESC quits.
// • The status bar sits along the bottom edge.

mod app;
mod brush;
mod compositor;
mod config;
mod draw;
mod error;
mod layers;
mod raster;
mod stroke;
mod types;

use app::{App, RenderCommand};
use clap::Parser;
use config::Config;
use draw::{draw_crosshair, draw_hud, key_event, Drawer, Palette, PointerTracker};
use error::Error;
use log::info;
use types::FrameBuffer;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    config.validate()?;

    let (w, h) = (config.width as usize, config.height as usize);
    let mut app = App::new(&config);
    let mut drawer = Drawer::new("Layer Sketch", w, h, config.fps)?;

    // `canvas` holds the last composite; `screen` is canvas + overlays.
    let mut canvas = FrameBuffer::new(w, h);
    app.render(&mut canvas);
    let mut screen = canvas.clone();
    let mut status = app.status_line();

    let mut pointer = PointerTracker::default();
    let mut palette = Palette::default();

    while drawer.is_open() && !drawer.esc_pressed() {
        /* --- input: keys first, then the pointer --- */
        let mut events: Vec<_> = drawer
            .pressed_keys()
            .into_iter()
            .filter_map(|key| key_event(key, &app, &mut palette))
            .collect();
        events.extend(pointer.update(drawer.left_mouse_down(), drawer.mouse_pos()));

        /* --- apply events, note what needs repainting --- */
        let mut recomposite = false;
        let mut restatus = false;
        for event in events {
            for cmd in app.handle(event) {
                match cmd {
                    RenderCommand::Redraw => recomposite = true,
                    RenderCommand::RefreshStatus => restatus = true,
                }
            }
        }
        /* --- recomposite only when a layer changed --- */
        if recomposite {
            app.render(&mut canvas);
        }
        if recomposite || restatus {
            status = app.status_line();
        }

        /* --- overlays and present --- */
        screen.pixels.copy_from_slice(&canvas.pixels);
        draw_hud(&mut screen, &status);
        if let Some(p) = drawer.mouse_pos() {
            let color = if app.is_drawing() { 0x00FF_3030 } else { 0x0040_4040 };
            draw_crosshair(&mut screen, p.x as i32, p.y as i32, 8, color);
        }
        drawer.present(&screen)?;
    }

    info!("window closed");
    Ok(())
}
