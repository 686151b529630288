// src/runner.rs
use std::path::Path;

use crate::{
    config::options::{AppOptions, MainTrackLayout},
    core::Transport,
    error::ScrapeError,
    fetch::Fetcher,
    file::{destination, ensure_directory},
    matching::{assign, CandidatePool},
    progress::Progress,
    scrape::{extract_links, extract_workshops, parse_sessions, AssetLink, LinkResolver, UrlStyle, WorkshopPage},
};

/// What a pass (or a whole run) did. Passes return their own summary and the
/// caller merges them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    /// Already on disk; not fetched again.
    pub skipped: usize,
    /// File names that could not be downloaded.
    pub failed: Vec<String>,
    /// Expected titles left without a candidate link.
    pub unmatched: Vec<String>,
    /// Passes or workshop pages given up on as a whole.
    pub aborted: Vec<String>,
}

impl RunSummary {
    pub fn merge(&mut self, other: RunSummary) {
        self.downloaded += other.downloaded;
        self.skipped += other.skipped;
        self.failed.extend(other.failed);
        self.unmatched.extend(other.unmatched);
        self.aborted.extend(other.aborted);
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.unmatched.is_empty() && self.aborted.is_empty()
    }
}

/// Run the enabled passes in order. Never fails as a whole: anything that
/// goes wrong ends up in the summary.
pub fn run(
    options: &AppOptions,
    transport: &dyn Transport,
    progress: &mut dyn Progress,
) -> RunSummary {
    let fetcher = Fetcher::new(transport, options.retry);
    let tag = options.edition.tag();
    let mut summary = RunSummary::default();

    if options.passes.main_track {
        log::info!("{tag}: main track");
        match main_track(options, &fetcher, progress) {
            Ok(s) => summary.merge(s),
            Err(e) => {
                log::error!("{tag} main track aborted: {e}");
                summary.aborted.push(format!("{tag} main track: {e}"));
            }
        }
    }

    if options.passes.workshops {
        log::info!("{tag}: workshops");
        match workshops(options, &fetcher, progress) {
            Ok(s) => summary.merge(s),
            Err(e) => {
                log::error!("{tag} workshops aborted: {e}");
                summary.aborted.push(format!("{tag} workshops: {e}"));
            }
        }
    }

    summary
}

/* ---------------- Main track ---------------- */

fn main_track(
    options: &AppOptions,
    fetcher: &Fetcher<'_, dyn Transport + '_>,
    progress: &mut dyn Progress,
) -> Result<RunSummary, ScrapeError> {
    let edition = &options.edition;
    let root = options.out_dir.join(edition.main_folder());
    ensure_directory(&root)?;

    let index = fetcher.transport().get_text(&edition.index_url())?;
    let resolver = LinkResolver::new(&edition.base_url, UrlStyle::Plain);
    let links = extract_links(&index, &edition.main_filter, &resolver)?;
    log::info!("{} papers listed on {}", links.len(), edition.index_url());

    let mut summary = RunSummary::default();
    match &edition.main_layout {
        MainTrackLayout::Flat => {
            progress.begin(&edition.main_folder(), links.len());
            for link in &links {
                download_one(fetcher, link, &root, &mut summary, progress);
            }
            progress.finish();
        }
        MainTrackLayout::BySession { program_url } => {
            let program = fetcher.transport().get_text(program_url)?;
            let sessions = parse_sessions(&program)?;
            log::info!(
                "{} sessions, {} titles on the program page",
                sessions.len(),
                sessions.title_count()
            );

            let mut pool = CandidatePool::from_links(links);
            let assignments = assign(&sessions, &mut pool);
            if !pool.is_empty() {
                log::info!("{} listed papers were not matched to any session", pool.len());
            }

            progress.begin(&edition.main_folder(), assignments.len());
            let mut current: Option<&str> = None;
            let mut dir = root.clone();
            let mut dir_ok = true;
            for a in &assignments {
                if current != Some(a.session.as_str()) {
                    current = Some(a.session.as_str());
                    progress.log(&a.session);
                    dir = root.join(&a.session);
                    dir_ok = match ensure_directory(&dir) {
                        Ok(()) => true,
                        Err(e) => {
                            // Only this session is lost; the rest of the pass goes on
                            log::error!("Session {} skipped: {e}", a.session);
                            summary.aborted.push(format!("session {}: {e}", a.session));
                            false
                        }
                    };
                }
                if !dir_ok {
                    continue;
                }

                match &a.link {
                    Some(link) => {
                        log::debug!("\"{}\" -> {} ({:.2})", a.title, link.filename(), a.score);
                        download_one(fetcher, link, &dir, &mut summary, progress);
                    }
                    None => {
                        log::error!("No paper left to match \"{}\" ({})", a.title, a.session);
                        summary.unmatched.push(format!("{}: {}", a.session, a.title));
                        progress.item_failed(&a.title);
                    }
                }
            }
            progress.finish();
        }
    }
    Ok(summary)
}

/* ---------------- Workshops ---------------- */

fn workshops(
    options: &AppOptions,
    fetcher: &Fetcher<'_, dyn Transport + '_>,
    progress: &mut dyn Progress,
) -> Result<RunSummary, ScrapeError> {
    let edition = &options.edition;
    let root = options.out_dir.join(edition.workshops_folder());
    ensure_directory(&root)?;

    let menu = fetcher.transport().get_text(&edition.workshops_menu_url())?;
    let pages = extract_workshops(&menu, edition)?;
    log::info!("Downloading {} workshops...", pages.len());

    let mut summary = RunSummary::default();
    for page in &pages {
        // One broken workshop page doesn't stop the others
        if let Err(e) = workshop(options, page, &root, fetcher, &mut summary, progress) {
            log::error!("Workshop {} skipped: {e}", page.name);
            summary.aborted.push(format!("workshop {}: {e}", page.name));
        }
    }
    Ok(summary)
}

fn workshop(
    options: &AppOptions,
    page: &WorkshopPage,
    root: &Path,
    fetcher: &Fetcher<'_, dyn Transport + '_>,
    summary: &mut RunSummary,
    progress: &mut dyn Progress,
) -> Result<(), ScrapeError> {
    let edition = &options.edition;
    let dir = root.join(&page.name);
    ensure_directory(&dir)?;

    let doc = fetcher.transport().get_text(&page.url)?;
    let resolver = LinkResolver::new(&edition.base_url, edition.workshop_urls);
    let links = extract_links(&doc, &edition.workshop_filter, &resolver)?;

    progress.begin(&page.name, links.len());
    for link in &links {
        download_one(fetcher, link, &dir, summary, progress);
    }
    progress.finish();
    Ok(())
}

/* ---------------- helpers ---------------- */

/// Skip if already on disk, otherwise fetch with retries.
fn download_one(
    fetcher: &Fetcher<'_, dyn Transport + '_>,
    link: &AssetLink,
    dir: &Path,
    summary: &mut RunSummary,
    progress: &mut dyn Progress,
) {
    let dest = destination(dir, link);
    let name = link.filename();

    if dest.exists() {
        summary.skipped += 1;
        progress.item_skipped(name);
        return;
    }

    if fetcher.fetch_with_retry(link.url(), &dest) {
        summary.downloaded += 1;
        progress.item_done(name);
    } else {
        summary.failed.push(s!(name));
        progress.item_failed(name);
    }
}
