//! Crowdfunding Frontend Entry Point

mod api;
mod app;
mod cart;
mod components;
mod config;
mod context;
mod error;
mod flash;
mod keymap;
mod lenient;
mod models;
mod route;
mod session;
mod storage;
mod store;
mod validation;

use app::App;
use config::Config;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init(Config::log_level()) {
        web_sys::console::error_1(&format!("Logger setup failed: {}", e).into());
    }
    let config = Config::load();
    mount_to_body(move || view! { <App config=config.clone()/> });
}
