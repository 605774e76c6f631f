use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use gloo_timers::future::TimeoutFuture;
use tracing::{instrument, warn};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use common::config::SiteConfig;
use common::hero::{self, HeroPage, Letter};
use common::style::{HIDDEN_OPACITY, NO_OFFSET, VISIBLE_OPACITY, fade_transition, seconds, translate_y};

use crate::dom::{as_html, by_id, document, js_err, millis, set_style};
use crate::reveal::animate_sections;

const TITLE_ID: &str = "hero-title";
const SUBTITLE_ID: &str = "hero-subtitle";
const DESCRIPTION_ID: &str = "hero-description";
const PARAGRAPH_ID: &str = "hero-paragraph";
const EXPLORE_ID: &str = "hero-explore";

const LETTER_CLASS: &str = "animista-letter";
const FOCUS_IN_CLASS: &str = "text-focus-in";

// the landing page hero; every block is optional
pub struct LandingPage {
    config: Rc<SiteConfig>,
    title: Option<HtmlElement>,
    subtitle: Option<HtmlElement>,
    description: Option<HtmlElement>,
    paragraph: Option<HtmlElement>,
    explore: Option<HtmlElement>,
}

fn block(id: &str) -> Option<HtmlElement> {
    by_id(id).and_then(as_html)
}

impl LandingPage {
    pub fn find(config: Rc<SiteConfig>) -> Self {
        LandingPage {
            config,
            title: block(TITLE_ID),
            subtitle: block(SUBTITLE_ID),
            description: block(DESCRIPTION_ID),
            paragraph: block(PARAGRAPH_ID),
            explore: block(EXPLORE_ID),
        }
    }

    fn blocks(&self) -> impl Iterator<Item = &HtmlElement> {
        [
            &self.title,
            &self.subtitle,
            &self.description,
            &self.paragraph,
            &self.explore,
        ]
        .into_iter()
        .flatten()
    }

    fn transition(&self) -> String {
        fade_transition(Duration::from_millis(self.config.hero.transition_ms.into()))
    }

    fn hide(&self, element: &HtmlElement) -> Result<()> {
        set_style(element, "opacity", HIDDEN_OPACITY)?;
        set_style(element, "transform", &translate_y(self.config.hero.offset_px))
    }

    fn reveal(&self, element: &HtmlElement) -> Result<()> {
        set_style(element, "transition", &self.transition())?;
        set_style(element, "opacity", VISIBLE_OPACITY)?;
        set_style(element, "transform", NO_OFFSET)
    }

    fn try_show_title(&self, element: &HtmlElement, text: &str, letters: &[Letter]) -> Result<()> {
        let doc = document()?;

        // screen readers get the label, not forty single-letter spans
        let wrapper = doc.create_element("span").map_err(js_err)?;
        wrapper.set_attribute("aria-hidden", "true").map_err(js_err)?;

        for letter in letters {
            let span = doc
                .create_element("span")
                .map_err(js_err)?
                .dyn_into::<HtmlElement>()
                .map_err(|_| anyhow::Error::msg("span is not an html element"))?;

            span.set_text_content(Some(&letter.ch.to_string()));
            span.set_class_name(LETTER_CLASS);
            set_style(&span, "animation-delay", &seconds(letter.delay))?;

            wrapper.append_child(&span).map_err(js_err)?;
        }

        element.set_inner_html("");
        element.append_child(&wrapper).map_err(js_err)?;
        element.set_attribute("aria-label", text).map_err(js_err)?;

        self.reveal(element)
    }

    fn report(&self, what: &str, result: Result<()>) {
        if let Err(err) = result {
            warn!("failed to show hero {what}: {err:#}");
        }
    }
}

impl HeroPage for LandingPage {
    fn blocks_present(&self) -> bool {
        self.title.is_some()
            && self.subtitle.is_some()
            && self.description.is_some()
            && self.paragraph.is_some()
    }

    fn prehide(&self) {
        for element in self.blocks() {
            self.report("block", self.hide(element));
        }
    }

    fn show_title(&self, text: &str, letters: &[Letter]) {
        if let Some(title) = &self.title {
            self.report("title", self.try_show_title(title, text, letters));
        }
    }

    fn show_subtitle(&self, text: &str) {
        if let Some(subtitle) = &self.subtitle {
            subtitle.set_text_content(Some(text));

            let result = self.reveal(subtitle).and_then(|()| {
                subtitle
                    .class_list()
                    .add_1(FOCUS_IN_CLASS)
                    .map_err(js_err)
            });
            self.report("subtitle", result);
        }
    }

    fn show_description(&self, html: &str) {
        if let Some(description) = &self.description {
            description.set_inner_html(html);
            self.report("description", self.reveal(description));
        }
    }

    // the explore block has no content of its own and comes in with the paragraph
    fn show_paragraph(&self, html: &str) {
        if let Some(paragraph) = &self.paragraph {
            paragraph.set_inner_html(html);
            self.report("paragraph", self.reveal(paragraph));
        }

        if let Some(explore) = &self.explore {
            self.report("explore", self.reveal(explore));
        }
    }

    fn reveal_sections(&self) {
        animate_sections(&self.config);
    }
}

#[instrument(skip_all)]
pub async fn initialize_home_page(config: Rc<SiteConfig>) {
    let page = LandingPage::find(config.clone());

    hero::play(&page, &config, |gap| TimeoutFuture::new(millis(gap))).await;
}
