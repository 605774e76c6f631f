// page identifiers
//
// both the browser location ("/portfolio/projects.html") and the nav link targets
// ("projects.html", "./contact.html") are reduced to the bare page name so that they
// can be compared directly

pub const INDEX_PAGE: &str = "index";

const SEPARATOR: char = '/';
const HTML_SUFFIX: &str = ".html";

// strip one leading and one trailing separator and any trailing ".html", collapsing
// the empty result to the index page
pub fn normalize(path: &str) -> String {
    let path = path.strip_prefix(SEPARATOR).unwrap_or(path);
    let path = path.strip_suffix(SEPARATOR).unwrap_or(path);
    let path = path.strip_suffix(HTML_SUFFIX).unwrap_or(path);

    if path.is_empty() {
        String::from(INDEX_PAGE)
    } else {
        String::from(path)
    }
}

// the canonical identifier of a page: normalize() plus keeping only the final segment,
// which handles the site being served from a subdirectory
pub fn page_id(path: &str) -> String {
    let normalized = normalize(path);

    if normalized.ends_with(SEPARATOR) {
        return String::from(INDEX_PAGE);
    }

    match normalized.rsplit_once(SEPARATOR) {
        Some((_, last)) => String::from(last),
        None => normalized,
    }
}

// a location ending in a separator ("/portfolio/") is served by that directory's index
// page, even though its page_id() names the directory
pub fn is_landing(path: &str) -> bool {
    path.ends_with(SEPARATOR) || page_id(path) == INDEX_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_one_separator_each_side() {
        assert_eq!(normalize("/projects.html"), "projects");
        assert_eq!(normalize("projects.html/"), "projects");
        assert_eq!(normalize("/projects/"), "projects");
        assert_eq!(normalize("//projects"), "/projects");
        assert_eq!(normalize("contact"), "contact");
    }

    #[test]
    fn normalize_collapses_empty_to_index() {
        assert_eq!(normalize(""), INDEX_PAGE);
        assert_eq!(normalize("/"), INDEX_PAGE);
        assert_eq!(normalize("//"), INDEX_PAGE);
        assert_eq!(normalize(".html"), INDEX_PAGE);
        assert_eq!(normalize("/index.html"), INDEX_PAGE);
    }

    #[test]
    fn page_id_keeps_final_segment() {
        assert_eq!(page_id("/portfolio/projects.html"), "projects");
        assert_eq!(page_id("/a/b/contact"), "contact");
        assert_eq!(page_id("/portfolio/index.html"), INDEX_PAGE);
        assert_eq!(page_id("/portfolio/"), "portfolio");
        assert_eq!(page_id("/portfolio//"), INDEX_PAGE);
        assert_eq!(page_id("/"), INDEX_PAGE);
        assert_eq!(page_id(""), INDEX_PAGE);
    }

    #[test]
    fn relative_link_targets_resolve_to_the_same_page() {
        assert_eq!(page_id("projects.html"), page_id("/projects.html"));
        assert_eq!(page_id("./projects.html"), "projects");
    }

    #[test]
    fn landing_detection() {
        assert!(is_landing("/"));
        assert!(is_landing("/index.html"));
        assert!(is_landing("/portfolio/"));
        assert!(!is_landing("/about.html"));
    }
}
