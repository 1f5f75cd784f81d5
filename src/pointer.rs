// filepath: src/pointer.rs
//! Pointer (mouse) event handling for the scribbler overlay

use crate::app::AppData;
use log::debug;
use scribbler::PointerButton;
use smithay_client_toolkit::seat::pointer::{PointerEvent, PointerEventKind};

pub fn handle_pointer_events(events: &[PointerEvent], app: &mut AppData) {
    let Some(scribbler) = app.scribbler_mut() else {
        return;
    };
    for event in events {
        let (x, y) = event.position;
        match event.kind {
            PointerEventKind::Enter { .. } => {
                debug!("Pointer entered overlay at ({:.2}, {:.2})", x, y);
            }
            PointerEventKind::Leave { .. } => {
                debug!("Pointer left overlay");
            }
            PointerEventKind::Press { button, .. } => {
                scribbler.on_pointer_down(PointerButton::from_code(button), x, y);
            }
            PointerEventKind::Release { button, .. } => {
                scribbler.on_pointer_up(PointerButton::from_code(button));
            }
            PointerEventKind::Motion { .. } => {
                scribbler.on_pointer_move(x, y);
            }
            _ => {}
        }
    }
}
