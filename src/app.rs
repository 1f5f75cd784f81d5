// filepath: src/app.rs
//! Main application state for the scribbler overlay

use crate::layer::LayerHost;
use log::{debug, error, info, warn};
use scribbler::{Host, Scribbler, ScribblerConfig, Viewport};
use smithay_client_toolkit::{
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shm::{slot::SlotPool, Shm},
};
use wayland_client::protocol::{wl_keyboard, wl_pointer, wl_touch};
use wayland_client::Connection;

pub struct AppData {
    registry_state: RegistryState,
    output_state: OutputState,
    seat_state: SeatState,
    shm_state: Shm,
    pool: SlotPool,
    connection: Connection,
    config: ScribblerConfig,
    /// Host waiting for the first configure, when the viewport becomes known
    pending_host: Option<LayerHost>,
    scribbler: Option<Scribbler<LayerHost>>,
    pointer: Option<wl_pointer::WlPointer>,
    keyboard: Option<wl_keyboard::WlKeyboard>,
    touch: Option<wl_touch::WlTouch>,
    pub(crate) exit: bool,
}

impl AppData {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry_state: RegistryState,
        output_state: OutputState,
        seat_state: SeatState,
        shm_state: Shm,
        pool: SlotPool,
        host: LayerHost,
        config: ScribblerConfig,
        connection: &Connection,
    ) -> Self {
        Self {
            registry_state,
            output_state,
            seat_state,
            shm_state,
            pool,
            connection: connection.clone(),
            config,
            pending_host: Some(host),
            scribbler: None,
            pointer: None,
            keyboard: None,
            touch: None,
            exit: false,
        }
    }

    pub fn scribbler_mut(&mut self) -> Option<&mut Scribbler<LayerHost>> {
        self.scribbler.as_mut()
    }

    /// Apply a configure: bind the scribbler on the first one, resize on later ones
    pub fn configure(&mut self, viewport: Viewport) {
        if let Some(scribbler) = self.scribbler.as_mut() {
            if scribbler.host().viewport() != viewport {
                scribbler.host_mut().set_viewport(viewport);
                scribbler.resize();
            }
            return;
        }

        let Some(mut host) = self.pending_host.take() else {
            return;
        };
        host.set_viewport(viewport);
        match Scribbler::setup(host, &self.config) {
            Ok(scribbler) => self.scribbler = Some(scribbler),
            Err(e) => {
                error!("Failed to set up scribbler: {e}");
                self.exit = true;
            }
        }
    }

    pub fn toggle(&mut self) {
        match self.scribbler.as_mut() {
            Some(scribbler) => scribbler.toggle(),
            None => warn!("Toggle requested before the surface was configured"),
        }
    }

    /// Push the bitmap to the compositor if a handler changed it
    pub fn present(&mut self) {
        let Some(scribbler) = self.scribbler.as_mut() else {
            return;
        };
        if let Err(e) = scribbler.surface_mut().present(&mut self.pool) {
            warn!("Failed to present frame: {e}");
        }
        if let Err(e) = self.connection.flush() {
            debug!("Connection flush failed: {e}");
        }
    }

    pub fn shutdown(&mut self) {
        if let Some(scribbler) = self.scribbler.take() {
            drop(scribbler.shutdown());
        }
        if let Err(e) = self.connection.flush() {
            debug!("Connection flush failed: {e}");
        }
    }

    pub fn registry_state(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    pub fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    pub fn seat_state(&mut self) -> &mut SeatState {
        &mut self.seat_state
    }

    pub fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm_state
    }

    pub fn set_pointer(&mut self, pointer: Option<wl_pointer::WlPointer>) {
        self.pointer = pointer;
        info!("Pointer set: {:?}", self.pointer.is_some());
    }

    pub fn set_keyboard(&mut self, keyboard: Option<wl_keyboard::WlKeyboard>) {
        self.keyboard = keyboard;
        info!("Keyboard set: {:?}", self.keyboard.is_some());
    }

    pub fn set_touch(&mut self, touch: Option<wl_touch::WlTouch>) {
        self.touch = touch;
        info!("Touch set: {:?}", self.touch.is_some());
    }

    pub fn close_layer_surface(&mut self) {
        info!("Layer surface closed");
        self.exit = true;
    }
}
