// src/scrape/workshops.rs
use crate::config::consts::{ANCHOR_CONTAINER, WORKSHOP_PAGE_INCLUDE};
use crate::config::options::{Edition, MenuTrailer, WorkshopNaming};
use crate::core::{html, sanitize};
use crate::error::ScrapeError;

/// A workshop listed on the menu page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkshopPage {
    /// Folder-safe name.
    pub name: String,
    pub url: String,
}

/// Workshop pages linked from the menu, in menu order.
/// The menu ends in a trailer link that is not a workshop; which anchor that
/// is depends on the edition's menu.
pub fn extract_workshops(menu: &str, edition: &Edition) -> Result<Vec<WorkshopPage>, ScrapeError> {
    let mut anchors = html::anchors_in(menu, ANCHOR_CONTAINER)?;
    match edition.workshop_trailer {
        MenuTrailer::LastAnchor => {
            anchors.pop();
        }
        MenuTrailer::LastWorkshopLink => {
            let last = anchors.iter().rposition(|a| {
                a.href.as_deref().is_some_and(|h| h.contains(WORKSHOP_PAGE_INCLUDE))
            });
            if let Some(i) = last {
                anchors.remove(i);
            }
        }
    }

    let base = edition.workshops_base_url();
    let prefix = join!(&edition.tag(), "_");

    let mut pages = Vec::new();
    for a in anchors {
        let Some(href) = a.href.as_deref() else { continue };
        if !href.contains(WORKSHOP_PAGE_INCLUDE) {
            continue;
        }

        let name = match edition.workshop_naming {
            WorkshopNaming::FromUrl => name_from_url(href, &prefix),
            WorkshopNaming::FromLinkText => sanitize::workshop_folder_name(&a.text),
        };
        if !sanitize::is_safe_component(&name) {
            log::warn!("Skipping workshop link without a usable name: {href}");
            continue;
        }

        pages.push(WorkshopPage { name, url: join!(&base, href.trim_start_matches('/')) });
    }
    Ok(pages)
}

/// `CVPR2019_W01.py` -> `W01`
fn name_from_url(href: &str, prefix: &str) -> String {
    let file = href.rsplit('/').next().unwrap_or_default();
    let stem = file.strip_suffix(WORKSHOP_PAGE_INCLUDE).unwrap_or(file);
    s!(stem.strip_prefix(prefix).unwrap_or(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(entries: &[(&str, &str)]) -> String {
        let mut doc = s!("<html><body><dl>");
        for (href, text) in entries {
            doc.push_str(&format!("<dt><a href=\"{href}\">{text}</a></dt>"));
        }
        doc.push_str("</dl></body></html>");
        doc
    }

    #[test]
    fn names_from_link_text_and_drops_trailer() {
        let doc = menu(&[
            ("CVPR2020_w1.py", "Fair, Data-Efficient CV"),
            ("about.html", "About"),
            ("CVPR2020_w2.py", "Vision: For Good?"),
            ("../CVPR2020.py", "Back to main"),
        ]);
        let pages = extract_workshops(&doc, &Edition::cvpr2020()).unwrap();
        assert_eq!(
            pages,
            vec![
                WorkshopPage {
                    name: s!("Fair_Data_Efficient_CV"),
                    url: s!("http://openaccess.thecvf.com/CVPR2020_workshops/CVPR2020_w1.py"),
                },
                WorkshopPage {
                    name: s!("Vision_For_Good"),
                    url: s!("http://openaccess.thecvf.com/CVPR2020_workshops/CVPR2020_w2.py"),
                },
            ]
        );
    }

    #[test]
    fn names_from_url_stem() {
        let doc = menu(&[
            ("CVPR2019_W01.py", "Something"),
            ("CVPR2019_Precognition.py", "Other"),
            ("menu_trailer.py", "x"),
        ]);
        let pages = extract_workshops(&doc, &Edition::cvpr2019()).unwrap();
        let names: Vec<_> = pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["W01", "Precognition"]);
    }

    #[test]
    fn trailer_choice_follows_the_edition() {
        // Last anchor is not a workshop page
        let doc = menu(&[
            ("CVPR2019_W01.py", "a"),
            ("CVPR2019_W02.py", "b"),
            ("contact.html", "Contact"),
        ]);
        let names = |e: &Edition| -> Vec<String> {
            extract_workshops(&doc, e).unwrap().into_iter().map(|p| p.name).collect()
        };

        let mut e2019 = Edition::cvpr2019();
        assert_eq!(names(&e2019), vec!["W01"]);

        e2019.workshop_trailer = MenuTrailer::LastAnchor;
        assert_eq!(names(&e2019), vec!["W01", "W02"]);
    }

    #[test]
    fn menu_without_list_is_unrecognized() {
        let res = extract_workshops("<html><p>moved</p></html>", &Edition::cvpr2020());
        assert!(matches!(res, Err(ScrapeError::Structure(_))));
    }
}
