use std::time::Duration;

use anyhow::Result;
use api::{FOOTER_FRAGMENT, HEADER_FRAGMENT};
use serde::{Deserialize, Serialize};
use tracing::{Level, debug, instrument};

// site configuration
//
// every timing constant that the stylesheet also depends on lives here, so that the
// markup, the css and the enhancement code only ever disagree in one place.  all of
// the fields have defaults, so an empty [config] table describes the stock site
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub storage_key: String,
    pub fragments: FragmentConfig,
    pub transition: TransitionConfig,
    pub reveal: RevealConfig,
    pub hero: HeroConfig,
    pub effects: EffectsConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FragmentConfig {
    pub header: String,
    pub footer: String,
    pub header_mount: String,
    pub footer_mount: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TransitionConfig {
    // must match the duration of the .fade-out animation in the stylesheet
    pub exit_delay_ms: u32,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealPolicy {
    // animate every marked element in document order with a fixed stagger
    Stagger,
    // animate each marked element the first time it scrolls into view
    Visibility,
    #[default]
    Both,
}

impl RevealPolicy {
    pub fn stagger(self) -> bool {
        matches!(self, RevealPolicy::Stagger | RevealPolicy::Both)
    }

    pub fn visibility(self) -> bool {
        matches!(self, RevealPolicy::Visibility | RevealPolicy::Both)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RevealConfig {
    pub policy: RevealPolicy,
    pub stagger_ms: u32,
    pub duration_ms: u32,
    pub ease: String,
    pub offset_px: u32,
    pub threshold: f64,
    pub root_margin: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct HeroConfig {
    pub title_ms: u32,
    pub subtitle_ms: u32,
    pub description_ms: u32,
    pub paragraph_ms: u32,
    pub sections_ms: u32,
    pub letter_step_ms: u32,
    pub offset_px: u32,
    pub transition_ms: u32,

    pub title: String,
    pub subtitle: String,
    pub description_html: String,
    pub paragraph_html: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub navbar_scrolled_px: f64,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        FragmentConfig {
            header: String::from(HEADER_FRAGMENT),
            footer: String::from(FOOTER_FRAGMENT),
            header_mount: String::from("header-placeholder"),
            footer_mount: String::from("footer-placeholder"),
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        TransitionConfig { exit_delay_ms: 250 }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig {
            policy: RevealPolicy::default(),
            stagger_ms: 150,
            duration_ms: 800,
            ease: String::from("power3.out"),
            offset_px: 30,
            threshold: 0.1,
            root_margin: String::from("0px 0px -50px 0px"),
        }
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        HeroConfig {
            title_ms: 200,
            subtitle_ms: 700,
            description_ms: 1300,
            paragraph_ms: 1900,
            sections_ms: 2500,
            letter_step_ms: 50,
            offset_px: 20,
            transition_ms: 600,
            title: String::from("Welcome,"),
            subtitle: String::new(),
            description_html: String::new(),
            paragraph_html: String::new(),
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        EffectsConfig {
            navbar_scrolled_px: 50.0,
        }
    }
}

impl SiteConfig {
    pub fn storage_key(&self) -> &str {
        if self.storage_key.is_empty() {
            "theme"
        } else {
            &self.storage_key
        }
    }

    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.transition.exit_delay_ms.into())
    }

    // catch the mistakes that would otherwise show up as a jumbled hero sequence or an
    // observer that never fires
    pub fn validate(&self) -> Result<()> {
        let hero = &self.hero;
        let offsets = [
            hero.title_ms,
            hero.subtitle_ms,
            hero.description_ms,
            hero.paragraph_ms,
            hero.sections_ms,
        ];

        if offsets.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(anyhow::Error::msg(format!(
                "hero stage offsets must be strictly increasing, got {offsets:?}"
            )));
        }

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(anyhow::Error::msg(format!(
                "reveal threshold {} is outside [0, 1]",
                self.reveal.threshold
            )));
        }

        Ok(())
    }
}

// like the server config this is wrapped in a [config] table, so that the site file
// can carry other tables (build settings, etc.) without confusing the parser
#[derive(Debug, Deserialize, Serialize)]
struct TomlConfigFile {
    #[serde(default)]
    config: SiteConfig,
}

#[instrument(level=Level::DEBUG, skip(doc))]
pub fn parse_config(doc: &str) -> Result<SiteConfig> {
    debug!("parsing site config");

    let data: TomlConfigFile = toml::from_str(doc)?;

    data.config.validate()?;

    Ok(data.config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_the_stock_site() {
        let config = parse_config("").unwrap();

        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.storage_key(), "theme");
        assert_eq!(config.exit_delay(), Duration::from_millis(250));
        assert_eq!(config.reveal.policy, RevealPolicy::Both);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let doc = r#"
            [config]
            storage_key = "site-theme"

            [config.transition]
            exit_delay_ms = 300

            [config.reveal]
            policy = "visibility"
            stagger_ms = 200
        "#;

        let config = parse_config(doc).unwrap();

        assert_eq!(config.storage_key(), "site-theme");
        assert_eq!(config.exit_delay(), Duration::from_millis(300));
        assert_eq!(config.reveal.policy, RevealPolicy::Visibility);
        assert_eq!(config.reveal.stagger_ms, 200);
        assert_eq!(config.reveal.duration_ms, 800);
        assert_eq!(config.fragments.header, "header.html");
        assert!(!config.reveal.policy.stagger());
        assert!(config.reveal.policy.visibility());
    }

    #[test]
    fn out_of_order_hero_offsets_are_rejected() {
        let doc = r#"
            [config.hero]
            subtitle_ms = 2000
        "#;

        assert!(parse_config(doc).is_err());
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        let doc = r#"
            [config.reveal]
            threshold = 1.5
        "#;

        assert!(parse_config(doc).is_err());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse_config("[config\nstorage_key = ").is_err());
    }
}
