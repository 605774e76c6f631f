use std::future::Future;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::config::{HeroConfig, RevealPolicy, SiteConfig};
use crate::sequence::Sequence;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroStage {
    Title,
    Subtitle,
    Description,
    Paragraph,
    // hand the rest of the page over to the reveal animator
    Sections,
}

// one character of the title, with the delay of its css animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letter {
    pub ch: char,
    pub delay: Duration,
}

pub fn letters(text: &str, step: Duration) -> Vec<Letter> {
    text.chars()
        .zip(0u32..)
        .map(|(ch, i)| Letter {
            ch,
            delay: step * i,
        })
        .collect()
}

// the text blocks are only animated when all four are present.  the sections stage runs
// whenever the reveal policy staggers; a visibility-only page leaves them to the observer
pub fn sequence(
    config: &HeroConfig,
    blocks_present: bool,
    policy: RevealPolicy,
) -> Sequence<HeroStage> {
    let ms = |n: u32| Duration::from_millis(n.into());

    let mut seq = Sequence::new();

    if policy.stagger() {
        seq = seq.step(ms(config.sections_ms), HeroStage::Sections);
    }

    if !blocks_present {
        return seq;
    }

    seq.step(ms(config.title_ms), HeroStage::Title)
        .step(ms(config.subtitle_ms), HeroStage::Subtitle)
        .step(ms(config.description_ms), HeroStage::Description)
        .step(ms(config.paragraph_ms), HeroStage::Paragraph)
}

// the landing page blocks; any of them may be missing from the markup
pub trait HeroPage {
    fn blocks_present(&self) -> bool;

    // zero opacity, offset downward, before anything is scheduled
    fn prehide(&self);

    fn show_title(&self, text: &str, letters: &[Letter]);

    fn show_subtitle(&self, text: &str);

    fn show_description(&self, html: &str);

    fn show_paragraph(&self, html: &str);

    fn reveal_sections(&self);
}

#[instrument(skip_all)]
pub async fn play<P, S, Fut>(page: &P, site: &SiteConfig, sleep: S)
where
    P: HeroPage,
    S: FnMut(Duration) -> Fut,
    Fut: Future<Output = ()>,
{
    let config = &site.hero;
    let policy = site.reveal.policy;
    let present = page.blocks_present();

    page.prehide();

    debug!(present, ?policy, "starting hero sequence");

    let step = Duration::from_millis(config.letter_step_ms.into());

    sequence(config, present, policy)
        .play(sleep, |stage| {
            debug!(?stage, "hero stage");

            match stage {
                HeroStage::Title => page.show_title(&config.title, &letters(&config.title, step)),
                HeroStage::Subtitle => page.show_subtitle(&config.subtitle),
                HeroStage::Description => page.show_description(&config.description_html),
                HeroStage::Paragraph => page.show_paragraph(&config.paragraph_html),
                HeroStage::Sections => page.reveal_sections(),
            }
        })
        .await;
}
