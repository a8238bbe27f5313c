// Application state and event dispatch.
//
// The window layer translates raw input into `Event`s and acts on the
// returned `RenderCommand`s; nothing in here knows about the window.

use crate::brush::BrushState;
use crate::compositor;
use crate::config::{BrushProfile, Config};
use crate::layers::LayerStore;
use crate::stroke::StrokeRecorder;
use crate::types::{FrameBuffer, LayerId, Point, Rgb};
use log::{debug, info, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    BrushPresetChanged(String),
    BrushSizeChanged(i32),
    ColorChosen(Rgb),
    AddLayerClicked,
    /// 0–100 slider value for the active layer.
    OpacityChanged(i32),
    ClearClicked,
    SelectLayer(LayerId),
    CycleActiveLayer,
    SetVisible(LayerId, bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderCommand {
    /// Layer pixels or layer settings changed; recomposite.
    Redraw,
    /// Only the status line (brush, selection) changed.
    RefreshStatus,
}

/// Everything the window loop mutates, built once at startup.
pub struct App {
    pub layers: LayerStore,
    pub brush: BrushState,
    profile: BrushProfile,
    recorder: StrokeRecorder,
}

impl App {
    /// One empty layer ("Layer 1"), black Pencil at size 5.
    /// Visual: a blank white canvas ready for drawing.
    pub fn new(config: &Config) -> Self {
        let mut layers = LayerStore::new(config.width, config.height);
        layers.add_layer("Layer 1");
        info!(
            "canvas {}x{}, profile {:?}, dot on press: {}",
            config.width, config.height, config.profile, config.dot_on_press
        );
        Self {
            layers,
            brush: BrushState::default(),
            profile: config.profile,
            recorder: StrokeRecorder::new(config.dot_on_press),
        }
    }

    /// True between pointer-down and pointer-up.
    pub fn is_drawing(&self) -> bool {
        self.recorder.is_dragging()
    }

    /// Apply one event. Every change to layer pixels or layer settings asks
    /// for a redraw; events that change nothing return an empty list.
    pub fn handle(&mut self, event: Event) -> Vec<RenderCommand> {
        let redraw = |changed: bool| if changed { vec![RenderCommand::Redraw] } else { Vec::new() };
        match event {
            Event::PointerDown(p) => {
                let style = self.brush.stroke_style(self.profile);
                redraw(self.recorder.pointer_down(p, &mut self.layers, &style))
            }
            Event::PointerMove(p) => {
                let style = self.brush.stroke_style(self.profile);
                redraw(self.recorder.pointer_move(p, &mut self.layers, &style))
            }
            Event::PointerUp => {
                self.recorder.pointer_up();
                Vec::new()
            }
            Event::BrushPresetChanged(name) => {
                if !self.brush.set_preset_by_name(&name) {
                    warn!("unknown brush preset '{}', using the default pen", name);
                }
                debug!("brush preset: {}", self.brush.preset_label());
                vec![RenderCommand::RefreshStatus]
            }
            Event::BrushSizeChanged(size) => {
                self.brush.set_size(size as i64);
                debug!("brush size: {}", self.brush.size());
                vec![RenderCommand::RefreshStatus]
            }
            Event::ColorChosen(color) => {
                self.brush.color = color;
                debug!("brush color: #{:06X}", color.packed());
                vec![RenderCommand::RefreshStatus]
            }
            Event::AddLayerClicked => {
                let name = format!("Layer {}", self.layers.len() + 1);
                let id = self.layers.add_layer(name.as_str());
                info!("added {} ({:?})", name, id);
                vec![RenderCommand::Redraw]
            }
            Event::OpacityChanged(percent) => match self.layers.active_id() {
                Some(id) => redraw(self.layers.set_opacity_percent(id, percent)),
                None => Vec::new(),
            },
            Event::ClearClicked => match self.layers.active_id() {
                Some(id) => redraw(self.layers.clear(id)),
                None => Vec::new(),
            },
            Event::SelectLayer(id) => redraw(self.layers.set_active(id)),
            Event::CycleActiveLayer => redraw(self.layers.cycle_active().is_some()),
            Event::SetVisible(id, visible) => redraw(self.layers.set_visible(id, visible)),
        }
    }

    /// Composite every visible layer into `screen`.
    pub fn render(&self, screen: &mut FrameBuffer) {
        compositor::compose(&self.layers, screen);
    }

    /// One-line summary of the active layer and brush for the HUD.
    /// Visual: e.g. "Layer 2 2/3 50% SHOWN | Ink Pen 4".
    pub fn status_line(&self) -> String {
        let layer = match self.layers.active() {
            Some(l) => format!(
                "{} {}/{} {}% {}",
                l.name,
                self.layers.iter().position(|o| o.id() == l.id()).map_or(0, |i| i + 1),
                self.layers.len(),
                (l.opacity() * 100.0).round() as i32,
                if l.visible { "SHOWN" } else { "HIDDEN" }
            ),
            None => "NO LAYER".to_string(),
        };
        format!("{} | {} {}", layer, self.brush.preset_label(), self.brush.size())
    }
}
