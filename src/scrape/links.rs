// src/scrape/links.rs
use crate::config::consts::ANCHOR_CONTAINER;
use crate::core::{html, sanitize::is_safe_component};
use crate::error::ScrapeError;

/// A downloadable document: absolute URL plus the file name it is saved as.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetLink {
    url: String,
    filename: String,
}

impl AssetLink {
    /// `None` when the last path segment can't serve as a file name.
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        let filename = url.rsplit('/').next().unwrap_or_default().to_string();
        if !is_safe_component(&filename) {
            return None;
        }
        Some(Self { url, filename })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// Keep an href if it contains `include` and none of `exclude`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkFilter {
    include: String,
    exclude: Vec<String>,
}

impl LinkFilter {
    pub fn new(include: &str, exclude: &[&str]) -> Self {
        Self {
            include: s!(include),
            exclude: exclude.iter().map(|s| s!(*s)).collect(),
        }
    }

    pub fn matches(&self, href: &str) -> bool {
        href.contains(self.include.as_str())
            && !self.exclude.iter().any(|x| href.contains(x.as_str()))
    }
}

/// How an href becomes an absolute URL.
///
/// Main-track pages link raw paths; the 2020 workshop pages need their
/// paths percent-encoded. Both are kept as observed on the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlStyle {
    Plain,
    Encoded,
}

#[derive(Clone, Copy, Debug)]
pub struct LinkResolver<'a> {
    base: &'a str,
    style: UrlStyle,
}

impl<'a> LinkResolver<'a> {
    pub fn new(base: &'a str, style: UrlStyle) -> Self {
        Self { base: base.trim_end_matches('/'), style }
    }

    pub fn resolve(&self, href: &str) -> String {
        // Workshop pages sit one level down and link "../content_..."
        let path = href.strip_prefix("../").unwrap_or(href).trim_start_matches('/');
        match self.style {
            UrlStyle::Plain => join!(self.base, "/", path),
            UrlStyle::Encoded => {
                let encoded: Vec<_> = path.split('/').map(urlencoding::encode).collect();
                join!(self.base, "/", &encoded.join("/"))
            }
        }
    }
}

/// Asset links of an index page, in document order.
pub fn extract_links(
    page: &str,
    filter: &LinkFilter,
    resolver: &LinkResolver<'_>,
) -> Result<Vec<AssetLink>, ScrapeError> {
    let anchors = html::anchors_in(page, ANCHOR_CONTAINER)?;

    let links = anchors
        .iter()
        .filter_map(|a| a.href.as_deref())
        .filter(|href| filter.matches(href))
        .filter_map(|href| {
            let link = AssetLink::new(resolver.resolve(href));
            if link.is_none() {
                log::debug!("Ignoring href without a usable file name: {href}");
            }
            link
        })
        .collect();
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://openaccess.thecvf.com";

    fn page(hrefs: &[&str]) -> String {
        let mut doc = s!("<html><body><dl>");
        for h in hrefs {
            doc.push_str(&format!("<dd><a href=\"{h}\">link</a></dd>"));
        }
        doc.push_str("</dl></body></html>");
        doc
    }

    #[test]
    fn filter_keeps_pdf_but_not_supplemental() {
        let doc = page(&["x.pdf", "x_supplemental.pdf", "y.html"]);
        let filter = LinkFilter::new("pdf", &["supplemental.pdf"]);
        let links = extract_links(&doc, &filter, &LinkResolver::new(BASE, UrlStyle::Plain)).unwrap();
        let names: Vec<_> = links.iter().map(AssetLink::filename).collect();
        assert_eq!(names, vec!["x.pdf"]);
        assert_eq!(links[0].url(), "http://openaccess.thecvf.com/x.pdf");
    }

    #[test]
    fn output_follows_document_order() {
        let doc = page(&["c/z.pdf", "c/a.pdf", "c/m.pdf"]);
        let filter = LinkFilter::new("pdf", &[]);
        let links = extract_links(&doc, &filter, &LinkResolver::new(BASE, UrlStyle::Plain)).unwrap();
        let names: Vec<_> = links.iter().map(AssetLink::filename).collect();
        assert_eq!(names, vec!["z.pdf", "a.pdf", "m.pdf"]);
    }

    #[test]
    fn page_without_container_is_an_error_not_empty() {
        let doc = "<html><body><a href=\"x.pdf\">x</a></body></html>";
        let filter = LinkFilter::new("pdf", &[]);
        let res = extract_links(doc, &filter, &LinkResolver::new(BASE, UrlStyle::Plain));
        assert!(matches!(res, Err(ScrapeError::Structure(_))));

        let empty = extract_links("<dl></dl>", &filter, &LinkResolver::new(BASE, UrlStyle::Plain));
        assert!(empty.unwrap().is_empty());
    }

    // Plain and Encoded differ on purpose: the two page families are
    // resolved the way each one was observed to need.
    #[test]
    fn plain_and_encoded_styles_differ_only_in_escaping() {
        let href = "../content_CVPRW_2020/papers/w1/Li_Fast & Slow_CVPRW_2020_paper.pdf";
        let plain = LinkResolver::new(BASE, UrlStyle::Plain).resolve(href);
        let encoded = LinkResolver::new(BASE, UrlStyle::Encoded).resolve(href);
        assert_eq!(
            plain,
            "http://openaccess.thecvf.com/content_CVPRW_2020/papers/w1/Li_Fast & Slow_CVPRW_2020_paper.pdf"
        );
        assert_eq!(
            encoded,
            "http://openaccess.thecvf.com/content_CVPRW_2020/papers/w1/Li_Fast%20%26%20Slow_CVPRW_2020_paper.pdf"
        );
    }

    #[test]
    fn main_track_hrefs_are_not_rewritten() {
        let r = LinkResolver::new("http://host/", UrlStyle::Plain);
        assert_eq!(r.resolve("content/papers/a.pdf"), "http://host/content/papers/a.pdf");
    }

    #[test]
    fn asset_link_needs_a_file_name() {
        assert!(AssetLink::new("http://host/dir/").is_none());
        assert!(AssetLink::new("http://host/..").is_none());
        assert_eq!(AssetLink::new("http://host/a/b.pdf").unwrap().filename(), "b.pdf");
    }
}
