use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow::Error::msg(format!("unknown theme {other:?}"))),
        }
    }
}

// the icon shown by the toggle is the theme you would switch *to*
pub const SUN_ICON: &str = "fa-sun";
pub const MOON_ICON: &str = "fa-moon";

// everything the page shows about the current theme
//
// the surface applies the whole state at once, so applying the same state twice is
// harmless and the body class and icon can never drift apart
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeState {
    pub dark: bool,
}

impl ThemeState {
    pub fn theme(self) -> Theme {
        Theme::from_dark(self.dark)
    }

    pub fn icon(self) -> &'static str {
        if self.dark { SUN_ICON } else { MOON_ICON }
    }

    pub fn inverted(self) -> Self {
        ThemeState { dark: !self.dark }
    }
}

// stored preference first, then the system preference, then light
pub fn effective(stored: Option<Theme>, system_dark: bool) -> ThemeState {
    let dark = match stored {
        Some(theme) => theme.is_dark(),
        None => system_dark,
    };

    ThemeState { dark }
}

// the document: a marker class on the body plus the glyph inside the toggle
pub trait ThemeSurface {
    fn apply(&self, state: ThemeState);
}

// the persisted preference, shared by every page of the site.  the store itself may be
// unavailable, which the controller treats as "no preference"
pub trait PreferenceStore {
    fn load(&self) -> Result<Option<Theme>>;

    fn save(&self, theme: Theme) -> Result<()>;
}

// lets unrelated components react to a toggle without knowing about the controller
pub trait ThemeEvents {
    fn theme_changed(&self, dark: bool);
}

pub struct ThemeController<S, P, E> {
    surface: S,
    store: P,
    events: E,
    state: ThemeState,
}

impl<S, P, E> ThemeController<S, P, E>
where
    S: ThemeSurface,
    P: PreferenceStore,
    E: ThemeEvents,
{
    pub fn new(surface: S, store: P, events: E) -> Self {
        ThemeController {
            surface,
            store,
            events,
            state: ThemeState { dark: false },
        }
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    fn stored(&self) -> Option<Theme> {
        self.store.load().unwrap_or_else(|err| {
            warn!("theme preference unreadable, treating as unset: {err:#}");
            None
        })
    }

    pub fn initialize(&mut self, system_dark: bool) -> ThemeState {
        let stored = self.stored();

        self.state = effective(stored, system_dark);
        self.surface.apply(self.state);

        debug!(?stored, system_dark, theme = %self.state.theme(), "initialized theme");

        self.state
    }

    pub fn toggle(&mut self) -> ThemeState {
        self.state = self.state.inverted();
        self.surface.apply(self.state);
        if let Err(err) = self.store.save(self.state.theme()) {
            warn!("failed to save theme preference: {err:#}");
        }

        self.events.theme_changed(self.state.dark);

        info!(theme = %self.state.theme(), "toggled theme");

        self.state
    }

    // follow the system preference, but only until the user has made a choice
    pub fn on_system_preference_change(&mut self, matches: bool) -> bool {
        if self.stored().is_some() {
            debug!("ignoring system theme change, explicit preference stored");
            return false;
        }

        self.state = effective(None, matches);
        self.surface.apply(self.state);

        true
    }
}
