// filepath: src/scribbler.rs
//! Input capture and draw pipeline
//!
//! A [`Scribbler`] sits in one of two modes. While inactive its surface is
//! lowered behind normal content and no capture listeners are registered,
//! so input reaches whatever is underneath. While active the surface is
//! raised, pointer and touch drags are captured, and every sampled point is
//! joined to the previous one with a straight segment.

use crate::config::ScribblerConfig;
use crate::error::SetupError;
use crate::input::{Disposition, Point, PointerButton, TouchEvent, TouchId, TouchPhase};
use crate::surface::{Capture, DrawStyle, Host, ListenerKind, StackLayer, Surface};
use log::{debug, info};
use std::collections::BTreeSet;

/// Device that started the drag in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Pointer,
    Touch(TouchId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    source: DragSource,
    last: Point,
}

/// Mode and drag state of one scribbler
#[derive(Debug, Clone, Default)]
pub struct ScribblerState {
    active: bool,
    drag: Option<Drag>,
    touches: BTreeSet<TouchId>,
}

impl ScribblerState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Last sampled point; only defined while dragging
    pub fn last_point(&self) -> Option<Point> {
        self.drag.map(|drag| drag.last)
    }

    pub fn drag_source(&self) -> Option<DragSource> {
        self.drag.map(|drag| drag.source)
    }

    /// Number of touch points currently down
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }
}

pub struct Scribbler<H: Host> {
    host: H,
    surface: H::Surface,
    style: DrawStyle,
    toggle_key: String,
    active_layer: StackLayer,
    inactive_layer: StackLayer,
    state: ScribblerState,
    capture: Option<Capture<H::Listener>>,
    toggle_listener: Option<H::Listener>,
}

impl<H: Host> Scribbler<H> {
    /// Bind to the host's surface, size it to the viewport and start
    /// listening for the toggle key. Capture mode starts inactive.
    pub fn setup(mut host: H, config: &ScribblerConfig) -> Result<Self, SetupError> {
        let mut surface = host
            .surface(&config.surface_id)
            .ok_or_else(|| SetupError::SurfaceNotFound {
                id: config.surface_id.clone(),
            })?;

        let viewport = host.viewport();
        if viewport.is_empty() {
            return Err(SetupError::EmptyViewport);
        }
        surface.resize(viewport.width, viewport.height);
        surface.set_layer(config.inactive_layer);

        let toggle_listener = host.listen(ListenerKind::KeyDown);
        info!(
            "Scribbler ready on `{}` ({}x{}), toggle with {}",
            config.surface_id, viewport.width, viewport.height, config.toggle_key
        );

        Ok(Self {
            host,
            surface,
            style: config.style(),
            toggle_key: config.toggle_key.clone(),
            active_layer: config.active_layer,
            inactive_layer: config.inactive_layer,
            state: ScribblerState::default(),
            capture: None,
            toggle_listener: Some(toggle_listener),
        })
    }

    /// Release every listener and give the host back
    pub fn shutdown(mut self) -> H {
        self.deactivate();
        if let Some(listener) = self.toggle_listener.take() {
            self.host.unlisten(listener);
        }
        info!("Scribbler shut down");
        self.host
    }

    pub fn state(&self) -> &ScribblerState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn style(&self) -> &DrawStyle {
        &self.style
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surface(&self) -> &H::Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut H::Surface {
        &mut self.surface
    }

    /// Enter capture mode. No-op when already active.
    pub fn activate(&mut self) {
        if self.capture.is_some() {
            debug!("activate: already active");
            return;
        }
        self.capture = Some(Capture::acquire(&mut self.host));
        self.surface.set_layer(self.active_layer);
        self.state.active = true;
        info!("Scribbler activated");
    }

    /// Leave capture mode, dropping any drag in progress. No-op when inactive.
    pub fn deactivate(&mut self) {
        let Some(capture) = self.capture.take() else {
            debug!("deactivate: already inactive");
            return;
        };
        capture.release(&mut self.host);
        self.surface.set_layer(self.inactive_layer);
        self.state.active = false;
        self.state.drag = None;
        self.state.touches.clear();
        info!("Scribbler deactivated");
    }

    pub fn toggle(&mut self) {
        if self.state.active {
            self.deactivate();
        } else {
            self.activate();
        }
    }

    /// Toggle capture mode on the configured key. Returns whether the key was consumed.
    pub fn on_key_down(&mut self, key: &str) -> bool {
        if self.toggle_listener.is_none() || key != self.toggle_key {
            return false;
        }
        self.toggle();
        true
    }

    pub fn on_pointer_down(&mut self, button: PointerButton, x: f64, y: f64) {
        if !self.state.active || !button.is_primary() {
            return;
        }
        self.state.drag = Some(Drag {
            source: DragSource::Pointer,
            last: Point::new(x, y),
        });
    }

    pub fn on_pointer_up(&mut self, button: PointerButton) {
        if !self.state.active || !button.is_primary() {
            return;
        }
        if self.state.drag_source() == Some(DragSource::Pointer) {
            self.state.drag = None;
        }
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if !self.state.active || self.state.drag_source() != Some(DragSource::Pointer) {
            return;
        }
        self.extend_drag(Point::new(x, y));
    }

    /// Handle a touch event. Only single-finger gestures draw; the returned
    /// disposition tells the host whether to suppress default handling.
    pub fn on_touch(&mut self, event: &TouchEvent) -> Disposition {
        if !self.state.active {
            return Disposition::PassThrough;
        }

        match event.phase {
            TouchPhase::Start => {
                for point in &event.changed {
                    self.state.touches.insert(point.id);
                }
                match event.changed.as_slice() {
                    [point] if self.state.touches.len() == 1 => {
                        self.state.drag = Some(Drag {
                            source: DragSource::Touch(point.id),
                            last: point.position,
                        });
                    }
                    _ => debug!(
                        "Ignoring multi-touch start ({} points down)",
                        self.state.touches.len()
                    ),
                }
            }
            TouchPhase::Move => {
                if let [point] = event.changed.as_slice() {
                    if self.state.touches.len() == 1
                        && self.state.drag_source() == Some(DragSource::Touch(point.id))
                    {
                        self.extend_drag(point.position);
                    }
                }
            }
            TouchPhase::End => {
                for point in &event.changed {
                    self.state.touches.remove(&point.id);
                }
                let owner_lifted = event
                    .changed
                    .iter()
                    .any(|point| self.state.drag_source() == Some(DragSource::Touch(point.id)));
                if owner_lifted {
                    self.state.drag = None;
                }
            }
            TouchPhase::Cancel => {
                self.state.touches.clear();
                if matches!(self.state.drag_source(), Some(DragSource::Touch(_))) {
                    self.state.drag = None;
                }
            }
        }

        Disposition::Consumed
    }

    /// Render one segment with the current style
    pub fn draw_segment(&mut self, from: Point, to: Point) {
        self.surface.stroke_segment(from, to, &self.style);
    }

    /// Match the surface to the host viewport. Clears the drawing.
    pub fn resize(&mut self) {
        let viewport = self.host.viewport();
        debug!("Resizing surface to {}x{}", viewport.width, viewport.height);
        self.surface.resize(viewport.width, viewport.height);
    }

    fn extend_drag(&mut self, to: Point) {
        let Some(drag) = self.state.drag.as_mut() else {
            return;
        };
        let from = std::mem::replace(&mut drag.last, to);
        self.draw_segment(from, to);
    }
}
