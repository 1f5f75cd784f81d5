pub mod config;
pub mod draw;
pub mod error;
pub mod input;
pub mod scribbler;
pub mod surface;

// Re-export for host implementations
pub use crate::config::{ConfigLayer, ScribblerConfig};
pub use crate::draw::{Canvas, Rgba};
pub use crate::error::{ConfigError, SetupError};
pub use crate::input::{Disposition, Point, PointerButton, TouchEvent, TouchPhase, TouchPoint};
pub use crate::scribbler::{DragSource, Scribbler, ScribblerState};
pub use crate::surface::{Capture, DrawStyle, Host, ListenerKind, StackLayer, Surface, Viewport};
