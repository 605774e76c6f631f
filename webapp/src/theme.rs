use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use web_sys::{CustomEvent, CustomEventInit, Element, Event, HtmlElement, MediaQueryListEvent};

use common::config::SiteConfig;
use common::theme::{MOON_ICON, SUN_ICON, ThemeController, ThemeEvents, ThemeState, ThemeSurface};
use common::{DARK_CLASS, THEME_CHANGE_EVENT, THEME_TOGGLE_ID};

use crate::dom::storage::LocalPreference;
use crate::dom::{body, by_id, js_err, listen, window};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// the body marker plus the <i> glyph inside the toggle button
pub struct BodySurface {
    body: HtmlElement,
    icon: Option<Element>,
}

impl ThemeSurface for BodySurface {
    fn apply(&self, state: ThemeState) {
        let mut results = vec![self.body.class_list().toggle_with_force(DARK_CLASS, state.dark)];

        if let Some(icon) = &self.icon {
            let classes = icon.class_list();
            results.push(classes.toggle_with_force(SUN_ICON, state.icon() == SUN_ICON));
            results.push(classes.toggle_with_force(MOON_ICON, state.icon() == MOON_ICON));
        }

        for err in results.into_iter().filter_map(Result::err) {
            warn!("failed to apply theme: {:#}", js_err(err));
        }
    }
}

#[derive(Serialize)]
struct ThemeChange {
    dark: bool,
}

fn dispatch_theme_change(dark: bool) -> Result<()> {
    let detail = serde_json::to_string(&ThemeChange { dark })?;
    let detail = js_sys::JSON::parse(&detail).map_err(js_err)?;

    let init = CustomEventInit::new();
    init.set_detail(&detail);

    let event = CustomEvent::new_with_event_init_dict(THEME_CHANGE_EVENT, &init).map_err(js_err)?;

    window()?.dispatch_event(&event).map_err(js_err)?;

    Ok(())
}

// "themechange" on window, detail { dark }
pub struct WindowEvents;

impl ThemeEvents for WindowEvents {
    fn theme_changed(&self, dark: bool) {
        if let Err(err) = dispatch_theme_change(dark) {
            warn!("failed to dispatch {THEME_CHANGE_EVENT}: {err:#}");
        }
    }
}

type PageTheme = ThemeController<BodySurface, LocalPreference, WindowEvents>;

// must run after the header is mounted, since the toggle lives in the header fragment.
// returns false when the page has no toggle
#[instrument(skip_all)]
pub fn setup_theme_toggle(config: &SiteConfig) -> Result<bool> {
    let Some(toggle) = by_id(THEME_TOGGLE_ID) else {
        debug!("no theme toggle on this page");
        return Ok(false);
    };

    let icon = toggle.query_selector("i").ok().flatten();

    let surface = BodySurface { body: body()?, icon };
    let controller: Rc<RefCell<PageTheme>> = Rc::new(RefCell::new(ThemeController::new(
        surface,
        LocalPreference::new(config.storage_key()),
        WindowEvents,
    )));

    let system = window()?.match_media(DARK_QUERY).map_err(js_err)?;
    let system_dark = system.as_ref().is_some_and(|mql| mql.matches());

    controller.borrow_mut().initialize(system_dark);

    {
        let controller = controller.clone();
        listen(&toggle, "click", move |_: Event| {
            if let Ok(mut controller) = controller.try_borrow_mut() {
                controller.toggle();
            }
        })?;
    }

    if let Some(system) = system {
        listen(&system, "change", move |event: MediaQueryListEvent| {
            if let Ok(mut controller) = controller.try_borrow_mut() {
                controller.on_system_preference_change(event.matches());
            }
        })?;
    }

    Ok(true)
}
