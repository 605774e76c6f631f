use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::config::FragmentConfig;

// where fragment markup comes from; in the browser this is a plain GET relative to
// the current page
#[async_trait(?Send)]
pub trait FragmentSource {
    async fn fetch(&self, name: &str) -> Result<String>;
}

// the placeholders whose contents are replaced by fragment markup
pub trait MountPoints {
    fn mount(&self, id: &str, html: &str) -> Result<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub header: bool,
    pub footer: bool,
}

impl LoadReport {
    pub fn complete(&self) -> bool {
        self.header && self.footer
    }
}

pub async fn load_fragment<S, M>(source: &S, mounts: &M, name: &str, mount_id: &str) -> Result<()>
where
    S: FragmentSource,
    M: MountPoints,
{
    let html = source.fetch(name).await?;

    mounts
        .mount(mount_id, &html)
        .with_context(|| format!("failed to mount fragment {name} into #{mount_id}"))
}

// run one load and its continuation, logging instead of propagating a failure so the
// rest of the page keeps initializing with the placeholder left empty
async fn load_then<S, M, F>(source: &S, mounts: &M, name: &str, mount_id: &str, then: F) -> bool
where
    S: FragmentSource,
    M: MountPoints,
    F: FnOnce(),
{
    match load_fragment(source, mounts, name, mount_id).await {
        Ok(()) => {
            then();
            true
        }
        Err(err) => {
            error!("error loading {name}: {err:#}");
            false
        }
    }
}

// header and footer load concurrently; each success runs its own continuation, and
// on_both runs exactly once after both have settled, whatever the outcome
#[instrument(skip_all)]
pub async fn load_page<S, M, H, F, B>(
    source: &S,
    mounts: &M,
    fragments: &FragmentConfig,
    on_header: H,
    on_footer: F,
    on_both: B,
) -> LoadReport
where
    S: FragmentSource,
    M: MountPoints,
    H: FnOnce(),
    F: FnOnce(),
    B: FnOnce(LoadReport),
{
    let header = load_then(source, mounts, &fragments.header, &fragments.header_mount, on_header);
    let footer = load_then(source, mounts, &fragments.footer, &fragments.footer_mount, on_footer);

    let (header, footer) = futures::join!(header, footer);

    let report = LoadReport { header, footer };

    info!(header, footer, "fragments settled");

    on_both(report);

    report
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use futures::executor::block_on;

    use super::*;

    struct Files(HashMap<&'static str, &'static str>);

    #[async_trait(?Send)]
    impl FragmentSource for Files {
        async fn fetch(&self, name: &str) -> Result<String> {
            self.0
                .get(name)
                .map(|s| String::from(*s))
                .ok_or_else(|| anyhow::Error::msg(format!("{name}: 404")))
        }
    }

    struct Placeholders {
        ids: Vec<&'static str>,
        contents: RefCell<HashMap<String, String>>,
    }

    impl Placeholders {
        fn new(ids: &[&'static str]) -> Self {
            Placeholders {
                ids: ids.to_vec(),
                contents: RefCell::new(HashMap::new()),
            }
        }
    }

    impl MountPoints for Placeholders {
        fn mount(&self, id: &str, html: &str) -> Result<()> {
            if !self.ids.iter().any(|known| *known == id) {
                return Err(anyhow::Error::msg(format!("no element #{id}")));
            }

            self.contents
                .borrow_mut()
                .insert(String::from(id), String::from(html));

            Ok(())
        }
    }

    fn both_files() -> Files {
        Files(HashMap::from([
            ("header.html", "<nav></nav>"),
            ("footer.html", "<footer></footer>"),
        ]))
    }

    fn both_mounts() -> Placeholders {
        Placeholders::new(&["header-placeholder", "footer-placeholder"])
    }

    fn run(files: &Files, mounts: &Placeholders) -> (LoadReport, Vec<String>) {
        let calls = RefCell::new(Vec::new());

        let report = block_on(load_page(
            files,
            mounts,
            &FragmentConfig::default(),
            || calls.borrow_mut().push(String::from("header")),
            || calls.borrow_mut().push(String::from("footer")),
            |report| calls.borrow_mut().push(format!("both {}", report.complete())),
        ));

        (report, calls.into_inner())
    }

    #[test]
    fn both_fragments_mount_and_continue() {
        let mounts = both_mounts();
        let (report, calls) = run(&both_files(), &mounts);

        assert!(report.complete());
        assert_eq!(calls, vec!["header", "footer", "both true"]);
        assert_eq!(
            mounts.contents.borrow().get("header-placeholder").map(String::as_str),
            Some("<nav></nav>")
        );
    }

    #[test]
    fn failed_header_skips_its_setup_only() {
        let files = Files(HashMap::from([("footer.html", "<footer></footer>")]));
        let mounts = both_mounts();

        let (report, calls) = run(&files, &mounts);

        assert_eq!(
            report,
            LoadReport {
                header: false,
                footer: true
            }
        );
        assert_eq!(calls, vec!["footer", "both false"]);
        assert!(mounts.contents.borrow().get("header-placeholder").is_none());
    }

    #[test]
    fn missing_mount_is_a_load_failure() {
        let mounts = Placeholders::new(&["header-placeholder"]);

        let (report, calls) = run(&both_files(), &mounts);

        assert!(report.header);
        assert!(!report.footer);
        assert_eq!(calls, vec!["header", "both false"]);
    }

    #[test]
    fn page_content_runs_even_when_everything_fails() {
        let (report, calls) = run(&Files(HashMap::new()), &Placeholders::new(&[]));

        assert_eq!(report, LoadReport::default());
        assert_eq!(calls, vec!["both false"]);
    }

    #[test]
    fn mount_error_names_the_placeholder() {
        let err = block_on(load_fragment(
            &both_files(),
            &Placeholders::new(&[]),
            "footer.html",
            "footer-placeholder",
        ))
        .unwrap_err();

        assert!(format!("{err:#}").contains("#footer-placeholder"));
    }
}
