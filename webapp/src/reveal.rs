use std::time::Duration;

use anyhow::Result;
use gloo_timers::callback::Timeout;
use js_sys::{Array, Function};
use serde::Serialize;
use tracing::{debug, instrument, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use common::FADE_SELECTOR;
use common::config::SiteConfig;
use common::reveal::{
    Animator, FadeTarget, Motion, prepare_for_visibility, reveal_all_now, reveal_on_visible,
    reveal_staggered,
};
use common::style::{HIDDEN_OPACITY, NO_OFFSET, VISIBLE_OPACITY, fade_transition, translate_y};

use crate::dom::{as_html, global, js_err, millis, query_all, set_style};

const REVEALED_ATTR: &str = "data-revealed";

pub struct DomFade(pub HtmlElement);

impl DomFade {
    fn styles(&self, styles: &[(&str, &str)]) {
        for (property, value) in styles {
            if let Err(err) = set_style(&self.0, property, value) {
                warn!("failed to set {property} on fade element: {err:#}");
            }
        }
    }
}

impl FadeTarget for DomFade {
    fn revealed(&self) -> bool {
        self.0.has_attribute(REVEALED_ATTR)
    }

    fn mark_revealed(&self) {
        if let Err(err) = self.0.set_attribute(REVEALED_ATTR, "") {
            warn!("failed to mark fade element: {:#}", js_err(err));
        }
    }

    fn prepare(&self, motion: &Motion) {
        let offset = translate_y(motion.offset_px);
        let transition = fade_transition(motion.duration);

        self.styles(&[
            ("opacity", HIDDEN_OPACITY),
            ("transform", offset.as_str()),
            ("transition", transition.as_str()),
        ]);
    }

    fn show(&self) {
        self.styles(&[("opacity", VISIBLE_OPACITY), ("transform", NO_OFFSET)]);
    }
}

pub fn fade_elements() -> Vec<DomFade> {
    query_all(FADE_SELECTOR)
        .into_iter()
        .filter_map(as_html)
        .map(DomFade)
        .collect()
}

// the vars object handed to gsap.to()
#[derive(Serialize)]
struct Tween<'a> {
    opacity: u8,
    y: u8,
    duration: f64,
    delay: f64,
    ease: &'a str,
}

// eased motion through the page's copy of gsap
pub struct GsapAnimator {
    gsap: JsValue,
    to: Function,
}

impl GsapAnimator {
    pub fn from_global() -> Option<Self> {
        let gsap = global("gsap")?;
        let to = js_sys::Reflect::get(&gsap, &JsValue::from_str("to"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;

        Some(GsapAnimator { gsap, to })
    }

    fn tween(&self, target: &DomFade, delay: Duration, motion: &Motion) -> Result<()> {
        let vars = serde_json::to_string(&Tween {
            opacity: 1,
            y: 0,
            duration: motion.duration.as_secs_f64(),
            delay: delay.as_secs_f64(),
            ease: &motion.ease,
        })?;
        let vars = js_sys::JSON::parse(&vars).map_err(js_err)?;

        self.to.call2(&self.gsap, &target.0, &vars).map_err(js_err)?;

        Ok(())
    }
}

impl Animator<DomFade> for GsapAnimator {
    fn animate(&self, target: &DomFade, delay: Duration, motion: &Motion) {
        if let Err(err) = self.tween(target, delay, motion) {
            warn!("gsap tween failed, showing element directly: {err:#}");
            target.show();
        }
    }
}

// same stagger, no easing beyond whatever transition the stylesheet declares
pub struct TimedAnimator;

impl Animator<DomFade> for TimedAnimator {
    fn animate(&self, target: &DomFade, delay: Duration, _motion: &Motion) {
        let element = target.0.clone();

        Timeout::new(millis(delay), move || DomFade(element).show()).forget();
    }
}

pub enum PageAnimator {
    Gsap(GsapAnimator),
    Timed(TimedAnimator),
}

impl PageAnimator {
    pub fn select() -> Self {
        match GsapAnimator::from_global() {
            Some(gsap) => PageAnimator::Gsap(gsap),
            None => {
                debug!("gsap not loaded, using timed reveal");
                PageAnimator::Timed(TimedAnimator)
            }
        }
    }
}

impl Animator<DomFade> for PageAnimator {
    fn animate(&self, target: &DomFade, delay: Duration, motion: &Motion) {
        match self {
            PageAnimator::Gsap(gsap) => gsap.animate(target, delay, motion),
            PageAnimator::Timed(timed) => timed.animate(target, delay, motion),
        }
    }
}

// eager staggered reveal of every fade element still hidden
#[instrument(skip_all)]
pub fn animate_sections(config: &SiteConfig) -> usize {
    let motion = Motion::from(&config.reveal);

    reveal_staggered(&fade_elements(), &PageAnimator::select(), &motion)
}

// lazy reveal: each fade element animates the first time it is at least threshold
// visible, then stops being observed
#[instrument(skip_all)]
pub fn observe_fade_elements(config: &SiteConfig) -> Result<()> {
    let targets = fade_elements();

    if global("IntersectionObserver").is_none() {
        let revealed = reveal_all_now(&targets);
        debug!(revealed, "no intersection observer, revealed everything");
        return Ok(());
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };

                let element = entry.target();
                let Some(fade) = as_html(element.clone()).map(DomFade) else {
                    observer.unobserve(&element);
                    continue;
                };

                if reveal_on_visible(&fade, entry.is_intersecting()) {
                    observer.unobserve(&element);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.reveal.threshold));
    init.set_root_margin(&config.reveal.root_margin);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(js_err)?;
    callback.forget();

    let motion = Motion::from(&config.reveal);
    let prepared = prepare_for_visibility(&targets, &motion);

    for target in targets.iter().filter(|t| !t.revealed()) {
        observer.observe(&target.0);
    }

    debug!(total = targets.len(), prepared, "observing fade elements");

    Ok(())
}
