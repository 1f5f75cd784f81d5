// filepath: src/touch.rs
//! Touch event handling for the scribbler overlay
//!
//! `wl_touch` reports one point per event, identified by a per-sequence id.

use crate::app::AppData;
use log::debug;
use scribbler::{Disposition, TouchEvent, TouchPhase};

pub fn handle_touch_event(event: TouchEvent, app: &mut AppData) {
    let Some(scribbler) = app.scribbler_mut() else {
        return;
    };
    if scribbler.on_touch(&event) == Disposition::PassThrough {
        // The input region is empty while inactive, so this only happens
        // for events already in flight when capture ended.
        debug!("Touch {:?} arrived while inactive", event.phase);
    }
}

pub fn touch_down(app: &mut AppData, id: i32, position: (f64, f64)) {
    handle_touch_event(
        TouchEvent::single(TouchPhase::Start, id, position.0, position.1),
        app,
    );
}

pub fn touch_motion(app: &mut AppData, id: i32, position: (f64, f64)) {
    handle_touch_event(
        TouchEvent::single(TouchPhase::Move, id, position.0, position.1),
        app,
    );
}

pub fn touch_up(app: &mut AppData, id: i32) {
    // wl_touch.up carries no position; the end point is already drawn.
    handle_touch_event(TouchEvent::single(TouchPhase::End, id, 0.0, 0.0), app);
}

pub fn touch_cancel(app: &mut AppData) {
    handle_touch_event(TouchEvent::cancel(), app);
}
