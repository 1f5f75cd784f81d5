#![allow(dead_code)]

use scribbler::{
    Canvas, DrawStyle, Host, ListenerKind, Point, Scribbler, ScribblerConfig, StackLayer, Surface,
    Viewport,
};
use std::collections::BTreeMap;

/// Surface that keeps a real bitmap plus a log of what was asked of it
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub layer: Option<StackLayer>,
    pub segments: Vec<(Point, Point)>,
    pub resizes: usize,
}

impl RecordingSurface {
    pub fn painted_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    pub fn segment_coords(&self) -> Vec<((f64, f64), (f64, f64))> {
        self.segments
            .iter()
            .map(|(a, b)| ((a.x, a.y), (b.x, b.y)))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width * height * 4) as usize];
        self.resizes += 1;
    }

    fn set_layer(&mut self, layer: StackLayer) {
        self.layer = Some(layer);
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &DrawStyle) {
        self.segments.push((from, to));
        Canvas::new(&mut self.pixels, self.width, self.height).draw_line(
            from,
            to,
            style.line_width,
            style.stroke_color,
        );
    }
}

/// Host that hands out numbered listener handles and tracks which are live
#[derive(Debug)]
pub struct RecordingHost {
    pub surface_id: String,
    pub surface: Option<RecordingSurface>,
    pub viewport: Viewport,
    pub live: BTreeMap<u32, ListenerKind>,
    pub total_registrations: usize,
    next_handle: u32,
}

impl RecordingHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface_id: "scribbler".to_string(),
            surface: Some(RecordingSurface::default()),
            viewport: Viewport::new(width, height),
            live: BTreeMap::new(),
            total_registrations: 0,
            next_handle: 0,
        }
    }

    pub fn live_count(&self, kind: ListenerKind) -> usize {
        self.live.values().filter(|&&k| k == kind).count()
    }

    pub fn capture_listeners(&self) -> usize {
        self.live.values().filter(|k| k.is_capture()).count()
    }
}

impl Host for RecordingHost {
    type Surface = RecordingSurface;
    type Listener = u32;

    fn surface(&mut self, id: &str) -> Option<RecordingSurface> {
        if id == self.surface_id {
            self.surface.take()
        } else {
            None
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn listen(&mut self, kind: ListenerKind) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.total_registrations += 1;
        self.live.insert(handle, kind);
        handle
    }

    fn unlisten(&mut self, listener: u32) {
        assert!(
            self.live.remove(&listener).is_some(),
            "listener {listener} unregistered twice"
        );
    }
}

pub fn inactive_scribbler() -> Scribbler<RecordingHost> {
    Scribbler::setup(RecordingHost::new(100, 100), &ScribblerConfig::default())
        .expect("recording host provides the surface")
}

pub fn active_scribbler() -> Scribbler<RecordingHost> {
    let mut scribbler = inactive_scribbler();
    scribbler.activate();
    scribbler
}
