use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use gloo_timers::callback::Timeout;
use tracing::{debug, error, info, instrument, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent};

use common::config::SiteConfig;
use common::nav::{LinkAction, NavTarget, Navigator, closes_menu, toggles_menu};
use common::{
    ACTIVE_CLASS, FADE_IN_CLASS, FADE_OUT_CLASS, HAMBURGER_SELECTOR, MENU_TOGGLE_ID,
    NAV_LINK_SELECTOR, NAV_LINKS_SELECTOR,
};

use crate::dom::{
    body, by_id, document, js_err, listen, location_path, millis, query, query_all, target_within,
    window,
};

pub struct DomLink(pub Element);

impl NavTarget for DomLink {
    // the attribute, not the resolved .href property, so relative targets stay relative
    fn href(&self) -> Option<String> {
        self.0.get_attribute("href")
    }

    fn set_active(&self, active: bool) {
        if let Err(err) = self.0.class_list().toggle_with_force(ACTIVE_CLASS, active) {
            warn!("failed to mark nav link: {:#}", js_err(err));
        }
    }
}

// swap the entry marker for the exit marker, then run leave once the css animation is done
fn exit_then<F>(page: &HtmlElement, after: Duration, leave: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let classes = page.class_list();
    classes.remove_1(FADE_IN_CLASS).map_err(js_err)?;
    classes.add_1(FADE_OUT_CLASS).map_err(js_err)?;

    Timeout::new(millis(after), leave).forget();

    Ok(())
}

fn start_transition(href: String, after: Duration) -> Result<()> {
    info!(%href, "leaving page");

    exit_then(&body()?, after, move || {
        let result = window().and_then(|w| w.location().set_href(&href).map_err(js_err));

        if let Err(err) = result {
            error!("failed to navigate to {href}: {err:#}");
        }
    })
}

fn close_menu(menu_toggle: Option<&HtmlInputElement>) {
    if let Some(toggle) = menu_toggle {
        toggle.set_checked(false);
    }
}

// must run after the header is mounted
#[instrument(skip_all)]
pub fn setup_navigation(config: &SiteConfig) -> Result<()> {
    let navigator = Rc::new(Navigator::new(&location_path()?, config.exit_delay()));

    let links: Vec<DomLink> = query_all(NAV_LINK_SELECTOR).into_iter().map(DomLink).collect();
    let active = navigator.highlight(&links);

    if active == 0 && !links.is_empty() {
        debug!(current = navigator.current(), "no nav link points at this page");
    }

    let menu_toggle: Option<HtmlInputElement> =
        by_id(MENU_TOGGLE_ID).and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

    for link in links {
        let navigator = navigator.clone();
        let menu_toggle = menu_toggle.clone();
        let target = link.0.clone();

        listen(&target, "click", move |event: MouseEvent| {
            event.prevent_default();

            let Some(href) = link.href() else {
                return;
            };

            match navigator.activate(&href) {
                LinkAction::Stay => debug!(%href, "already on this page"),
                LinkAction::Transition { href, after } => {
                    close_menu(menu_toggle.as_ref());

                    if let Err(err) = start_transition(href, after) {
                        error!("page transition failed: {err:#}");
                    }
                }
            }
        })?;
    }

    let (Some(hamburger), Some(menu_toggle)) = (query(HAMBURGER_SELECTOR), menu_toggle) else {
        debug!("no hamburger menu on this page");
        return Ok(());
    };

    {
        let menu_toggle = menu_toggle.clone();
        listen(&hamburger, "keydown", move |event: KeyboardEvent| {
            if toggles_menu(&event.key()) {
                event.prevent_default();
                menu_toggle.set_checked(!menu_toggle.checked());
            }
        })?;
    }

    listen(document()?.as_ref(), "click", move |event: MouseEvent| {
        let target = event.target();

        if closes_menu(
            menu_toggle.checked(),
            target_within(target.clone(), NAV_LINKS_SELECTOR),
            target_within(target, HAMBURGER_SELECTOR),
        ) {
            menu_toggle.set_checked(false);
        }
    })?;

    Ok(())
}
