use anyhow::Context;
use gloo_net::http::Request;
use tracing::{debug, instrument};

// shared fragments
//
// every page of the site carries two empty placeholders that are filled from these
// files at load time, resolved relative to the page itself so the site can be served
// from a subdirectory
pub const HEADER_FRAGMENT: &str = "header.html";
pub const FOOTER_FRAGMENT: &str = "footer.html";

// fetch the raw markup of a fragment
//
// note that fetch() itself only fails on transport errors, so a 404 page would
// otherwise be spliced into the mount point as if it were the header
#[instrument]
pub async fn fetch_fragment(name: &str) -> anyhow::Result<String> {
    let resp = Request::get(name)
        .send()
        .await
        .with_context(|| format!("failed to request fragment {name}"))?;

    if !resp.ok() {
        return Err(anyhow::Error::msg(format!(
            "fragment {name} returned status {} {}",
            resp.status(),
            resp.status_text()
        )));
    }

    let body = resp
        .text()
        .await
        .with_context(|| format!("failed to read body of fragment {name}"))?;

    debug!(bytes = body.len(), "fetched fragment");

    Ok(body)
}
