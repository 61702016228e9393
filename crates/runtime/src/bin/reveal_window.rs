//! Win Reveal window - plays stepped outcomes on a desktop canvas.
//!
//! Usage: `reveal_window [config.toml]`. Space reveals, F toggles speed,
//! arrow keys change the bet and Esc quits.

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use win_reveal::{RevealConfig, SteppedOutcomes};
use win_reveal_runtime::{run_winit, ConfigurableInput, RuntimeApp};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match RevealConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {e}");
                std::process::exit(1);
            }
        },
        None => RevealConfig::default(),
    };

    let app = RuntimeApp::new_auto(
        config,
        ConfigurableInput::default(),
        SteppedOutcomes::new(rand::thread_rng()),
    );
    if let Err(e) = run_winit(app) {
        eprintln!("Error running reveal window: {e}");
        std::process::exit(1);
    }
}
