use log::{error, info};

mod config;
mod controller;
mod dom;
mod error;
mod interactions {
    pub mod counters;
    pub mod cursor;
    pub mod header;
    pub mod lightbox;
    pub mod menu;
    pub mod music;
    pub mod navigation;
    pub mod portfolio;
    pub mod reveal;
    pub mod tilt;
}

use controller::PageController;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page interactions");
    if let Err(e) = PageController::new().and_then(PageController::start) {
        error!("Page interactions not started: {}", e);
    }
}
