use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use tracing::{debug, warn};
use web_sys::{Event, HtmlElement, MouseEvent};

use common::config::SiteConfig;
use common::effects::{FrameThrottle, cursor_transform, navbar_scrolled};
use common::{CURSOR_SELECTOR, FADE_IN_CLASS, NAVBAR_SELECTOR, SCROLLED_CLASS};

use crate::dom::{
    as_html, body, document, js_err, listen, listen_passive, media_matches, next_frame, query,
    set_style, window,
};

const FINE_POINTER_QUERY: &str = "(pointer: fine)";

// the entry marker; the stylesheet animates the body in while it is present
pub fn mark_entry() -> Result<()> {
    body()?.class_list().add_1(FADE_IN_CLASS).map_err(js_err)
}

// a decorative element following the pointer, desktop only
pub fn setup_cursor() -> Result<bool> {
    let Some(cursor) = query(CURSOR_SELECTOR).and_then(as_html) else {
        return Ok(false);
    };

    if !media_matches(FINE_POINTER_QUERY) {
        debug!("coarse pointer, leaving custom cursor idle");
        return Ok(false);
    }

    let cursor = Rc::new(cursor);
    let position = Rc::new(Cell::new((0, 0)));
    let throttle = Rc::new(FrameThrottle::default());

    listen(document()?.as_ref(), "mousemove", move |event: MouseEvent| {
        position.set((event.client_x(), event.client_y()));

        if !throttle.request() {
            return;
        }

        let cursor = cursor.clone();
        let position = position.clone();
        let frame_throttle = throttle.clone();

        let scheduled = next_frame(move || {
            let (x, y) = position.get();
            move_cursor(&cursor, x, y);
            frame_throttle.frame_done();
        });

        if let Err(err) = scheduled {
            warn!("failed to schedule cursor frame: {err:#}");
            throttle.frame_done();
        }
    })?;

    Ok(true)
}

fn move_cursor(cursor: &HtmlElement, x: i32, y: i32) {
    if let Err(err) = set_style(cursor, "transform", &cursor_transform(x, y)) {
        warn!("failed to move cursor: {err:#}");
    }
}

fn update_navbar(navbar: &HtmlElement, threshold: f64) -> Result<()> {
    let scroll_y = window()?.scroll_y().map_err(js_err)?;

    navbar
        .class_list()
        .toggle_with_force(SCROLLED_CLASS, navbar_scrolled(scroll_y, threshold))
        .map_err(js_err)?;

    Ok(())
}

// must run after the header is mounted, the navbar lives there
pub fn setup_scroll_effects(config: &SiteConfig) -> Result<bool> {
    let Some(navbar) = query(NAVBAR_SELECTOR).and_then(as_html) else {
        debug!("no navbar on this page");
        return Ok(false);
    };

    let navbar = Rc::new(navbar);
    let threshold = config.effects.navbar_scrolled_px;
    let throttle = Rc::new(FrameThrottle::default());

    listen_passive(window()?.as_ref(), "scroll", move |_: Event| {
        if !throttle.request() {
            return;
        }

        let navbar = navbar.clone();
        let frame_throttle = throttle.clone();

        let scheduled = next_frame(move || {
            if let Err(err) = update_navbar(&navbar, threshold) {
                warn!("failed to update navbar: {err:#}");
            }
            frame_throttle.frame_done();
        });

        if let Err(err) = scheduled {
            warn!("failed to schedule navbar frame: {err:#}");
            throttle.frame_done();
        }
    })?;

    Ok(true)
}
