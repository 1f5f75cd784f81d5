// filepath: src/layer.rs
//! wlr-layer-shell realisation of the scribbler host
//!
//! "Registering" a capture listener widens the surface's input region to
//! the whole surface; with none registered the region is empty and pointer
//! and touch input falls through to the windows underneath.

use log::{debug, info, warn};
use scribbler::{Canvas, DrawStyle, Host, ListenerKind, Point, StackLayer, Surface, Viewport};
use smithay_client_toolkit::{
    compositor::{CompositorState, Region},
    shell::{
        wlr_layer::{KeyboardInteractivity, Layer, LayerSurface},
        WaylandSurface,
    },
    shm::slot::SlotPool,
};
use std::collections::BTreeSet;
use wayland_client::protocol::wl_shm;

pub fn to_layer(layer: StackLayer) -> Layer {
    match layer {
        StackLayer::Background => Layer::Background,
        StackLayer::Bottom => Layer::Bottom,
        StackLayer::Top => Layer::Top,
        StackLayer::Overlay => Layer::Overlay,
    }
}

/// Persistent bitmap behind the layer surface
pub struct LayerCanvas {
    layer_surface: LayerSurface,
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    dirty: bool,
}

impl LayerCanvas {
    pub fn new(layer_surface: LayerSurface) -> Self {
        Self {
            layer_surface,
            pixels: Vec::new(),
            width: 0,
            height: 0,
            dirty: false,
        }
    }

    /// Copy the bitmap into a shm buffer and commit it, if anything changed
    pub fn present(&mut self, pool: &mut SlotPool) -> Result<(), Box<dyn std::error::Error>> {
        if !self.dirty || self.width == 0 || self.height == 0 {
            return Ok(());
        }
        let stride = self.width * 4;
        let (buffer, canvas) = pool.create_buffer(
            self.width as i32,
            self.height as i32,
            stride as i32,
            wl_shm::Format::Argb8888,
        )?;
        canvas[..self.pixels.len()].copy_from_slice(&self.pixels);

        let surface = self.layer_surface.wl_surface();
        buffer
            .attach_to(surface)
            .map_err(|e| format!("buffer attach: {e:?}"))?;
        surface.damage_buffer(0, 0, self.width as i32, self.height as i32);
        surface.commit();
        self.dirty = false;
        debug!("Presented {}x{} frame", self.width, self.height);
        Ok(())
    }
}

impl Surface for LayerCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width * height * 4) as usize];
        self.dirty = true;
    }

    fn set_layer(&mut self, layer: StackLayer) {
        info!("Moving surface to {:?} layer", layer);
        self.layer_surface.set_layer(to_layer(layer));
        self.layer_surface.wl_surface().commit();
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &DrawStyle) {
        let mut canvas = Canvas::new(&mut self.pixels, self.width, self.height);
        canvas.draw_line(from, to, style.line_width, style.stroke_color);
        self.dirty = true;
    }
}

pub struct LayerHost {
    namespace: String,
    compositor: CompositorState,
    layer_surface: LayerSurface,
    canvas: Option<LayerCanvas>,
    viewport: Viewport,
    listeners: BTreeSet<ListenerKind>,
    input_region: Option<Region>,
}

impl LayerHost {
    pub fn new(namespace: &str, compositor: CompositorState, layer_surface: LayerSurface) -> Self {
        let canvas = LayerCanvas::new(layer_surface.clone());
        let mut host = Self {
            namespace: namespace.to_string(),
            compositor,
            layer_surface,
            canvas: Some(canvas),
            viewport: Viewport::default(),
            listeners: BTreeSet::new(),
            input_region: None,
        };
        host.sync_input();
        host
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        if self.capturing() {
            self.sync_input();
        }
    }

    fn capturing(&self) -> bool {
        InputMode::for_listeners(&self.listeners).capture
    }

    /// Apply input region and keyboard interactivity for the registered listeners
    fn sync_input(&mut self) {
        let InputMode { capture: capturing, keyboard } = InputMode::for_listeners(&self.listeners);
        let surface = self.layer_surface.wl_surface();
        match Region::new(&self.compositor) {
            Ok(region) => {
                if capturing {
                    region.add(0, 0, self.viewport.width as i32, self.viewport.height as i32);
                }
                surface.set_input_region(Some(region.wl_region()));
                self.input_region = Some(region);
            }
            Err(e) => {
                warn!("Failed to create input region for scribbler surface: {e}");
            }
        }

        let keyboard = if keyboard {
            KeyboardInteractivity::Exclusive
        } else {
            KeyboardInteractivity::None
        };
        self.layer_surface.set_keyboard_interactivity(keyboard);
        surface.commit();
        debug!("Input synced: capturing={}", capturing);
    }
}

impl Host for LayerHost {
    type Surface = LayerCanvas;
    type Listener = ListenerKind;

    fn surface(&mut self, id: &str) -> Option<LayerCanvas> {
        if id != self.namespace {
            return None;
        }
        self.canvas.take()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn listen(&mut self, kind: ListenerKind) -> ListenerKind {
        let before = InputMode::for_listeners(&self.listeners);
        self.listeners.insert(kind);
        if InputMode::for_listeners(&self.listeners) != before {
            self.sync_input();
        }
        kind
    }

    fn unlisten(&mut self, kind: ListenerKind) {
        let before = InputMode::for_listeners(&self.listeners);
        self.listeners.remove(&kind);
        if InputMode::for_listeners(&self.listeners) != before {
            self.sync_input();
        }
    }
}

/// What the compositor must route to the surface for a set of listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InputMode {
    capture: bool,
    keyboard: bool,
}

impl InputMode {
    fn for_listeners(listeners: &BTreeSet<ListenerKind>) -> Self {
        let capture = listeners.iter().any(|kind| kind.is_capture());
        Self {
            capture,
            keyboard: capture && listeners.contains(&ListenerKind::KeyDown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_mode_flips_once_per_capture_change() {
        let mut listeners = BTreeSet::new();
        let mut mode = InputMode::for_listeners(&listeners);
        let mut flips = 0;
        let mut apply = |listeners: &BTreeSet<ListenerKind>, flips: &mut usize| {
            let next = InputMode::for_listeners(listeners);
            if next != mode {
                *flips += 1;
                mode = next;
            }
        };

        listeners.insert(ListenerKind::KeyDown);
        apply(&listeners, &mut flips);
        assert_eq!(flips, 0);

        for kind in ListenerKind::CAPTURE {
            listeners.insert(kind);
            apply(&listeners, &mut flips);
        }
        assert_eq!(flips, 1);
        assert_eq!(
            InputMode::for_listeners(&listeners),
            InputMode {
                capture: true,
                keyboard: true
            }
        );

        for kind in ListenerKind::CAPTURE {
            listeners.remove(&kind);
            apply(&listeners, &mut flips);
        }
        assert_eq!(flips, 2);
        assert_eq!(
            InputMode::for_listeners(&listeners),
            InputMode {
                capture: false,
                keyboard: false
            }
        );
    }
}
