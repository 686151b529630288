// src/core/html.rs
use scraper::{Html, Selector};

use crate::error::ScrapeError;

/// An `<a>` element as the scrapers see it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub text: String,
    pub href: Option<String>,
}

fn selector(css: &'static str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        css,
        reason: e.to_string(),
    })
}

/// All anchors inside the first `container` element, in document order.
///
/// A page without the container is not "a page with no links": the layout
/// we rely on is gone, so this is reported as a structure error.
pub fn anchors_in(doc: &str, container: &'static str) -> Result<Vec<Anchor>, ScrapeError> {
    let html = Html::parse_document(doc);
    let container_sel = selector(container)?;
    let anchor_sel = selector("a")?;

    let root = html
        .select(&container_sel)
        .next()
        .ok_or_else(|| ScrapeError::Structure(format!("no <{container}> anchor container")))?;

    let anchors = root
        .select(&anchor_sel)
        .map(|a| Anchor {
            text: super::sanitize::normalize_ws(&a.text().collect::<String>()),
            href: a.value().attr("href").map(str::to_owned),
        })
        .collect();
    Ok(anchors)
}

/// Remove all tags `<...>` from a fragment, then collapse whitespace.
/// Meant for single lines of markup, not whole documents.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}
