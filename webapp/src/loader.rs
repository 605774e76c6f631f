use std::rc::Rc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, error, instrument, warn};

use common::config::SiteConfig;
use common::loader::{FragmentSource, LoadReport, MountPoints, load_page};

use crate::dom::by_id;
use crate::effects::setup_scroll_effects;
use crate::nav::setup_navigation;
use crate::reveal::{animate_sections, observe_fade_elements};
use crate::theme::setup_theme_toggle;

pub struct HttpFragments;

#[async_trait(?Send)]
impl FragmentSource for HttpFragments {
    async fn fetch(&self, name: &str) -> Result<String> {
        api::fetch_fragment(name).await
    }
}

pub struct DocumentMounts;

impl MountPoints for DocumentMounts {
    fn mount(&self, id: &str, html: &str) -> Result<()> {
        let element = by_id(id).ok_or_else(|| anyhow::Error::msg(format!("no element #{id}")))?;

        element.set_inner_html(html);

        Ok(())
    }
}

fn log_failure(what: &str, result: Result<impl Sized>) {
    if let Err(err) = result {
        error!("failed to set up {what}: {err:#}");
    }
}

// theme, navigation and the navbar all live in the header fragment
fn setup_header(config: &SiteConfig) {
    log_failure("theme toggle", setup_theme_toggle(config));
    log_failure("navigation", setup_navigation(config));
    log_failure("scroll effects", setup_scroll_effects(config));
}

fn setup_footer(config: &SiteConfig) {
    if config.reveal.policy.stagger() {
        let revealed = animate_sections(config);
        debug!(revealed, "revealed sections after footer load");
    }
}

fn initialize_page_content(config: &SiteConfig, report: LoadReport) {
    if report.complete() {
        debug!("initializing page content");
    } else {
        warn!(?report, "initializing page content without every fragment");
    }

    if config.reveal.policy.visibility() {
        log_failure("fade observer", observe_fade_elements(config));
    }
}

#[instrument(skip_all)]
pub async fn initialize_page(config: Rc<SiteConfig>) {
    load_page(
        &HttpFragments,
        &DocumentMounts,
        &config.fragments,
        || setup_header(&config),
        || setup_footer(&config),
        |report| initialize_page_content(&config, report),
    )
    .await;
}
