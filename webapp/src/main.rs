use std::rc::Rc;

use anyhow::Result;
use gloo_console::error as console_error;
use tracing::{Level, error, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::Event;

use common::config::{SiteConfig, parse_config};
use common::path::is_landing;

mod dom;
use dom::{document, listen, location_path};

mod effects;
mod home;
mod loader;
mod nav;
mod reveal;
mod theme;

// compiled in, so a page load never waits on a second request for its own settings
const SITE_CONFIG: &str = include_str!("../site.toml");

fn main() {
    if let Err(err) = dioxus_logger::init(Level::DEBUG) {
        console_error!(format!("failed to init logger: {err}"));
    }

    let config = Rc::new(site_config());

    if let Err(err) = on_ready(move || start(config)) {
        error!("failed to start page enhancements: {err:#}");
    }
}

// a broken site file degrades to the stock timings rather than a dead page
fn site_config() -> SiteConfig {
    match parse_config(SITE_CONFIG) {
        Ok(config) => config,
        Err(err) => {
            error!("invalid site config, falling back to defaults: {err:#}");
            SiteConfig::default()
        }
    }
}

// the module script may run before or after DOMContentLoaded depending on how the page
// includes it
fn on_ready<F>(init: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let doc = document()?;

    if doc.ready_state() != "loading" {
        init();
        return Ok(());
    }

    let mut init = Some(init);
    listen(&doc, "DOMContentLoaded", move |_: Event| {
        if let Some(init) = init.take() {
            init();
        }
    })
}

fn start(config: Rc<SiteConfig>) {
    if let Err(err) = effects::mark_entry() {
        warn!("failed to mark page entry: {err:#}");
    }

    if let Err(err) = effects::setup_cursor() {
        warn!("failed to set up cursor: {err:#}");
    }

    let path = location_path().unwrap_or_default();
    info!(%path, "enhancing page");

    // the hero runs alongside the fragment loads, not after them
    if is_landing(&path) {
        spawn_local(home::initialize_home_page(config.clone()));
    }

    spawn_local(loader::initialize_page(config));
}
