// filepath: src/main.rs

mod app;
mod keyboard;
mod layer;
mod pointer;
mod touch;
mod wayland;

use app::AppData;
use calloop::{
    signals::{Signal, Signals},
    EventLoop,
};
use calloop_wayland_source::WaylandSource;
use layer::LayerHost;
use log::{error, info};
use scribbler::ScribblerConfig;
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::wlr_layer::{Anchor, KeyboardInteractivity, LayerShell},
    shm::{slot::SlotPool, Shm},
};
use wayland_client::{globals::registry_queue_init, Connection};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting scribbler");

    let config = match ScribblerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return Err(e.into());
        }
    };
    info!("Configuration loaded");

    let conn = Connection::connect_to_env()?;
    let (globals, event_queue) = registry_queue_init(&conn)?;
    let qh = event_queue.handle();

    let compositor = CompositorState::bind(&globals, &qh)?;
    let layer_shell = LayerShell::bind(&globals, &qh)?;
    let shm = Shm::bind(&globals, &qh)?;
    let seat_state = SeatState::new(&globals, &qh);

    // Grows on demand once the output size is known
    let pool = SlotPool::new(4096, &shm)?;

    let surface = compositor.create_surface(&qh);
    let layer_surface = layer_shell.create_layer_surface(
        &qh,
        surface,
        layer::to_layer(config.inactive_layer),
        Some(config.surface_id.clone()),
        None,
    );
    info!("Configuring layer surface");
    layer_surface.set_anchor(Anchor::TOP | Anchor::BOTTOM | Anchor::LEFT | Anchor::RIGHT);
    layer_surface.set_keyboard_interactivity(KeyboardInteractivity::None);
    layer_surface.set_size(0, 0);
    layer_surface.set_exclusive_zone(-1);
    layer_surface.set_margin(0, 0, 0, 0);

    // Committing here triggers the first configure
    let host = LayerHost::new(&config.surface_id, compositor, layer_surface);

    let mut app_data = AppData::new(
        RegistryState::new(&globals),
        OutputState::new(&globals, &qh),
        seat_state,
        shm,
        pool,
        host,
        config,
        &conn,
    );

    let mut event_loop: EventLoop<AppData> = EventLoop::try_new()?;
    let loop_handle = event_loop.handle();
    WaylandSource::new(conn.clone(), event_queue)
        .insert(loop_handle.clone())
        .map_err(|e| format!("failed to insert wayland source: {}", e.error))?;

    // A layer surface cannot see keys while it lets input through, so the
    // compositor's own keybinding sends SIGUSR1 to toggle from outside.
    let signals = Signals::new(&[Signal::SIGUSR1, Signal::SIGINT, Signal::SIGTERM])?;
    loop_handle
        .insert_source(signals, |event, _, app: &mut AppData| match event.signal() {
            Signal::SIGUSR1 => {
                info!("SIGUSR1: toggling capture mode");
                app.toggle();
            }
            other => {
                info!("{:?}: shutting down", other);
                app.exit = true;
            }
        })
        .map_err(|e| format!("failed to insert signal source: {}", e.error))?;

    info!("Entering event loop");
    while !app_data.exit {
        event_loop.dispatch(None, &mut app_data)?;
        app_data.present();
    }

    app_data.shutdown();
    info!("Exiting scribbler");
    Ok(())
}
