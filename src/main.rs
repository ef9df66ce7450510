//! OpsPilot Frontend Entry Point

mod api;
mod app;
mod auth;
mod components;
mod config;
mod context;
mod error;
mod guard;
mod history;
mod http;
mod logger;
mod markdown;
mod models;
mod pages;
mod services;
mod session_store;
mod storage;
mod submission;

#[cfg(test)]
mod test_support;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(AppConfig::from_build_env().log_filter());
    log::info!("[APP] OpsPilot starting");
    mount_to_body(App);
}
