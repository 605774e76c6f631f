use std::time::Duration;

use tracing::debug;

use crate::path::page_id;

// anything that can be marked as the current page, i.e. the anchors in the header
pub trait NavTarget {
    fn href(&self) -> Option<String>;

    fn set_active(&self, active: bool);
}

// what a click on a nav link should turn into
#[derive(Clone, Debug, PartialEq)]
pub enum LinkAction {
    // the link points at the page we are already on
    Stay,
    // run the exit animation, then navigate to the original href
    Transition { href: String, after: Duration },
}

#[derive(Clone, Debug)]
pub struct Navigator {
    current: String,
    exit_delay: Duration,
}

impl Navigator {
    pub fn new(location: &str, exit_delay: Duration) -> Self {
        Navigator {
            current: page_id(location),
            exit_delay,
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn is_current(&self, href: &str) -> bool {
        page_id(href) == self.current
    }

    // mark exactly the links that point at the current page, clearing the marker from
    // everything else.  returns the number of active links
    pub fn highlight<T: NavTarget>(&self, links: &[T]) -> usize {
        let mut active = 0;

        for link in links {
            let is_active = link.href().is_some_and(|href| self.is_current(&href));

            link.set_active(is_active);

            if is_active {
                active += 1;
            }
        }

        debug!(current = %self.current, links = links.len(), active, "highlighted nav links");

        active
    }

    pub fn activate(&self, href: &str) -> LinkAction {
        if self.is_current(href) {
            return LinkAction::Stay;
        }

        LinkAction::Transition {
            href: String::from(href),
            after: self.exit_delay,
        }
    }
}

// the hamburger is a label, so it needs explicit keyboard handling
pub fn toggles_menu(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

// an open menu closes on any click that lands outside both the menu and the hamburger
pub fn closes_menu(open: bool, inside_menu: bool, inside_hamburger: bool) -> bool {
    open && !inside_menu && !inside_hamburger
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Link {
        href: Option<&'static str>,
        active: Cell<bool>,
    }

    impl Link {
        fn new(href: &'static str) -> Self {
            Link {
                href: Some(href),
                active: Cell::new(false),
            }
        }
    }

    impl NavTarget for Link {
        fn href(&self) -> Option<String> {
            self.href.map(String::from)
        }

        fn set_active(&self, active: bool) {
            self.active.set(active);
        }
    }

    fn delay() -> Duration {
        Duration::from_millis(250)
    }

    #[test]
    fn marks_exactly_the_current_page() {
        let links = [
            Link::new("index.html"),
            Link::new("projects.html"),
            Link::new("contact.html"),
        ];

        let nav = Navigator::new("/projects.html", delay());

        assert_eq!(nav.current(), "projects");
        assert_eq!(nav.highlight(&links), 1);

        let flags: Vec<bool> = links.iter().map(|l| l.active.get()).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn clears_stale_markers() {
        let links = [Link::new("index.html"), Link::new("about.html")];
        links[1].active.set(true);

        let nav = Navigator::new("/", delay());
        nav.highlight(&links);

        assert!(links[0].active.get());
        assert!(!links[1].active.get());
    }

    #[test]
    fn links_without_href_are_never_active() {
        let links = [Link {
            href: None,
            active: Cell::new(true),
        }];

        let nav = Navigator::new("/index.html", delay());

        assert_eq!(nav.highlight(&links), 0);
        assert!(!links[0].active.get());
    }

    #[test]
    fn subdirectory_deployment_matches_relative_links() {
        let links = [Link::new("./index.html"), Link::new("./about.html")];

        let nav = Navigator::new("/portfolio/about.html", delay());
        nav.highlight(&links);

        assert!(!links[0].active.get());
        assert!(links[1].active.get());
    }

    #[test]
    fn same_page_activation_stays() {
        let nav = Navigator::new("/projects.html", delay());

        assert_eq!(nav.activate("projects.html"), LinkAction::Stay);
        assert_eq!(nav.activate("/projects"), LinkAction::Stay);
    }

    #[test]
    fn other_page_activation_transitions_to_original_href() {
        let nav = Navigator::new("/projects.html", delay());

        assert_eq!(
            nav.activate("./contact.html"),
            LinkAction::Transition {
                href: String::from("./contact.html"),
                after: delay(),
            }
        );
    }

    #[test]
    fn highlight_survives_a_no_op_activation() {
        let links = [Link::new("index.html"), Link::new("projects.html")];
        let nav = Navigator::new("/projects.html", delay());

        nav.highlight(&links);
        assert_eq!(nav.activate("projects.html"), LinkAction::Stay);
        nav.highlight(&links);

        assert!(!links[0].active.get());
        assert!(links[1].active.get());
    }

    #[test]
    fn menu_keys() {
        assert!(toggles_menu("Enter"));
        assert!(toggles_menu(" "));
        assert!(!toggles_menu("Escape"));
        assert!(!toggles_menu("a"));
    }

    #[test]
    fn outside_click_closes_only_an_open_menu() {
        assert!(closes_menu(true, false, false));
        assert!(!closes_menu(true, true, false));
        assert!(!closes_menu(true, false, true));
        assert!(!closes_menu(false, false, false));
    }
}
