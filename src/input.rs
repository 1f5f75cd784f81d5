// filepath: src/input.rs
//! Input vocabulary shared by the pipeline and its hosts
//!
//! Hosts translate their native pointer, touch and keyboard events into
//! these types before handing them to the [`Scribbler`](crate::Scribbler).

/// A sampled position in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Linux input event codes for mouse buttons
const BTN_LEFT: u32 = 0x110;
const BTN_RIGHT: u32 = 0x111;
const BTN_MIDDLE: u32 = 0x112;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u32),
}

impl PointerButton {
    /// Map a Linux input event code (as carried by `wl_pointer.button`)
    pub fn from_code(code: u32) -> Self {
        match code {
            BTN_LEFT => Self::Primary,
            BTN_RIGHT => Self::Secondary,
            BTN_MIDDLE => Self::Middle,
            other => Self::Other(other),
        }
    }

    pub fn is_primary(self) -> bool {
        self == Self::Primary
    }
}

pub type TouchId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    /// The platform revoked every touch point of the sequence
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    pub position: Point,
}

/// One touch event with the points that changed in it
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub changed: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn single(phase: TouchPhase, id: TouchId, x: f64, y: f64) -> Self {
        Self {
            phase,
            changed: vec![TouchPoint {
                id,
                position: Point::new(x, y),
            }],
        }
    }

    pub fn cancel() -> Self {
        Self {
            phase: TouchPhase::Cancel,
            changed: Vec::new(),
        }
    }
}

/// Whether the host should suppress the platform's default handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Consumed,
    PassThrough,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_button_codes_map_to_buttons() {
        assert_eq!(PointerButton::from_code(0x110), PointerButton::Primary);
        assert_eq!(PointerButton::from_code(0x111), PointerButton::Secondary);
        assert_eq!(PointerButton::from_code(0x112), PointerButton::Middle);
        assert_eq!(PointerButton::from_code(0x113), PointerButton::Other(0x113));
        assert!(PointerButton::from_code(0x110).is_primary());
        assert!(!PointerButton::from_code(0x111).is_primary());
    }
}
