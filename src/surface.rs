// filepath: src/surface.rs
//! Host seam for the scribbler pipeline
//!
//! The pipeline never creates or destroys the surface it draws on. A
//! [`Host`] hands out the surface, reports the viewport, and registers
//! the input listeners capture mode relies on.

use crate::draw::Rgba;
use crate::input::Point;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Stroke parameters applied to every segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub stroke_color: Rgba,
    pub line_width: f32,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::new(0, 0, 255, 255),
            line_width: 2.0,
        }
    }
}

/// Stacking position of the surface relative to normal content,
/// from furthest back to front-most
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StackLayer {
    Background,
    Bottom,
    Top,
    Overlay,
}

impl FromStr for StackLayer {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "background" => Ok(Self::Background),
            "bottom" => Ok(Self::Bottom),
            "top" => Ok(Self::Top),
            "overlay" => Ok(Self::Overlay),
            _ => Err(crate::error::ConfigError::InvalidLayer(s.to_string())),
        }
    }
}

// Same names as the environment accepts, in any case
impl<'de> Deserialize<'de> for StackLayer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Input listeners the pipeline registers with its host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    PointerDown,
    PointerUp,
    PointerMove,
    TouchStart,
    TouchMove,
    TouchEnd,
    KeyDown,
}

impl ListenerKind {
    /// Listeners held only while capture mode is active
    pub const CAPTURE: [ListenerKind; 6] = [
        ListenerKind::PointerDown,
        ListenerKind::PointerUp,
        ListenerKind::PointerMove,
        ListenerKind::TouchStart,
        ListenerKind::TouchMove,
        ListenerKind::TouchEnd,
    ];

    pub fn is_capture(self) -> bool {
        self != ListenerKind::KeyDown
    }
}

/// A drawable region owned by the host
pub trait Surface {
    /// Current pixel size
    fn size(&self) -> (u32, u32);

    /// Reset the pixel size. Discards everything drawn so far.
    fn resize(&mut self, width: u32, height: u32);

    /// Move the surface to a different stacking position
    fn set_layer(&mut self, layer: StackLayer);

    /// Render a straight line between two points
    fn stroke_segment(&mut self, from: Point, to: Point, style: &DrawStyle);
}

/// The environment a scribbler runs in
pub trait Host {
    type Surface: Surface;

    /// Handle returned for a registered listener, given back to unregister it
    type Listener;

    /// Locate the drawing surface by its identifier
    fn surface(&mut self, id: &str) -> Option<Self::Surface>;

    fn viewport(&self) -> Viewport;

    fn listen(&mut self, kind: ListenerKind) -> Self::Listener;

    fn unlisten(&mut self, listener: Self::Listener);
}

/// Listeners acquired for one period of capture mode.
///
/// Only constructed by [`Capture::acquire`] and only consumed by
/// [`Capture::release`], so every registered listener is unregistered
/// exactly once.
#[derive(Debug)]
#[must_use = "dropping a capture leaks its listeners"]
pub struct Capture<L> {
    listeners: Vec<L>,
}

impl<L> Capture<L> {
    pub fn acquire<H: Host<Listener = L>>(host: &mut H) -> Self {
        let listeners = ListenerKind::CAPTURE
            .iter()
            .map(|&kind| host.listen(kind))
            .collect();
        Self { listeners }
    }

    pub fn release<H: Host<Listener = L>>(self, host: &mut H) {
        for listener in self.listeners {
            host.unlisten(listener);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_parse_case_insensitively() {
        assert_eq!("Overlay".parse::<StackLayer>().unwrap(), StackLayer::Overlay);
        assert_eq!(" bottom ".parse::<StackLayer>().unwrap(), StackLayer::Bottom);
        assert!("sky".parse::<StackLayer>().is_err());
        assert!(StackLayer::Overlay > StackLayer::Bottom);
    }

    #[test]
    fn capture_listeners_exclude_keyboard() {
        assert!(ListenerKind::CAPTURE.iter().all(|kind| kind.is_capture()));
        assert!(!ListenerKind::KeyDown.is_capture());
    }
}
