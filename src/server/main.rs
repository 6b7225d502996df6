// Difficulty parsing is shared with the game client
#[allow(dead_code)]
#[path = "../game_logic/difficulty.rs"]
mod difficulty;

// Server modules
mod config;
mod http;
mod net;
mod routes;
mod sessions;
mod types;
mod utils;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use std::net::TcpListener;
use std::time::Duration;

use config::{ServerArgs, ServerConfig};
use net::*;
use sessions::SessionStore;
use utils::*;

// how often queued requests are answered
const SERVE_INTERVAL: Duration = Duration::from_millis(5);

fn main() -> AppExit {
    let config = ServerConfig::from(ServerArgs::parse());

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(SERVE_INTERVAL)),
        LogPlugin::default(),
    ));

    let listener = match TcpListener::bind(config.address()) {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.address(), e);
            return AppExit::error();
        }
    };

    match get_local_ip() {
        Ok(ip) => info!("Server running on http://{}:{}", ip, config.port),
        Err(e) => info!(
            "Server running on http://localhost:{} (Could not determine local IP: {})",
            config.port, e
        ),
    }
    info!("Serving static files from {}", config.static_root.display());

    let (sender, receiver) = pending_request_channel();
    spawn_listener(listener, sender);

    app.insert_resource(config)
        .insert_resource(receiver)
        .init_resource::<SessionStore>()
        .add_systems(Update, serve_requests_system)
        .run()
}
