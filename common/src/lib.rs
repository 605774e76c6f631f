// page-enhancement logic for the portfolio site
//
// nothing in this crate touches the browser directly: the webapp implements the
// capability traits declared here on top of web-sys, and the tests implement them on
// top of plain RefCells
pub mod config;
pub mod effects;
pub mod hero;
pub mod loader;
pub mod nav;
pub mod path;
pub mod reveal;
pub mod sequence;
pub mod style;
pub mod theme;

use constcat::concat;

// markers shared between the stylesheet and the enhancement code
pub const DARK_CLASS: &str = "dark";
pub const ACTIVE_CLASS: &str = "active";
pub const FADE_CLASS: &str = "fade";
pub const FADE_IN_CLASS: &str = "fade-in";
pub const FADE_OUT_CLASS: &str = "fade-out";
pub const SCROLLED_CLASS: &str = "scrolled";

pub const FADE_SELECTOR: &str = concat!(".", FADE_CLASS);
pub const NAV_LINK_SELECTOR: &str = ".nav-links a";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";
pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const HAMBURGER_SELECTOR: &str = ".hamburger";
pub const CURSOR_SELECTOR: &str = ".cursor";

pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const MENU_TOGGLE_ID: &str = "menu-toggle";

pub const THEME_CHANGE_EVENT: &str = "themechange";
