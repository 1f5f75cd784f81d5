// filepath: src/keyboard.rs
//! Keyboard handling for the scribbler overlay

use crate::app::AppData;
use log::debug;
use smithay_client_toolkit::seat::keyboard::{KeyEvent, Keysym};

/// Name of a key that can serve as the toggle key
pub fn key_name(keysym: Keysym) -> Option<&'static str> {
    let name = match keysym {
        Keysym::Escape => "Escape",
        Keysym::Pause => "Pause",
        Keysym::Scroll_Lock => "ScrollLock",
        Keysym::Insert => "Insert",
        Keysym::F1 => "F1",
        Keysym::F2 => "F2",
        Keysym::F3 => "F3",
        Keysym::F4 => "F4",
        Keysym::F5 => "F5",
        Keysym::F6 => "F6",
        Keysym::F7 => "F7",
        Keysym::F8 => "F8",
        Keysym::F9 => "F9",
        Keysym::F10 => "F10",
        Keysym::F11 => "F11",
        Keysym::F12 => "F12",
        _ => return None,
    };
    Some(name)
}

pub fn handle_key_press(event: &KeyEvent, app: &mut AppData) {
    let Some(name) = key_name(event.keysym) else {
        return;
    };
    if let Some(scribbler) = app.scribbler_mut() {
        if scribbler.on_key_down(name) {
            debug!("Toggle key {} handled", name);
        }
    }
}
