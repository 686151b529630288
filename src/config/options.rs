// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;

use super::consts::*;
use crate::fetch::RetryPolicy;
use crate::scrape::{LinkFilter, UrlStyle};

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub edition: Edition,
    pub passes: Passes,
    /// Root under which the per-edition folders are created.
    pub out_dir: PathBuf,
    pub retry: RetryPolicy,
    pub log_file: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            edition: Edition::for_year(DEFAULT_YEAR).unwrap_or_else(Edition::cvpr2020),
            passes: Passes::default(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            retry: RetryPolicy::default(),
            log_file: Some(PathBuf::from(LOG_FILE)),
            log_level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Passes {
    pub main_track: bool,
    pub workshops: bool,
}

impl Default for Passes {
    fn default() -> Self {
        Self {
            main_track: DOWNLOAD_MAIN_TRACK,
            workshops: DOWNLOAD_WORKSHOPS,
        }
    }
}

/// Where main-track papers land.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MainTrackLayout {
    /// Everything into one folder.
    Flat,
    /// One folder per program session, papers matched by title.
    BySession { program_url: String },
}

/// How a workshop folder is named.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkshopNaming {
    /// `CVPR2019_W01.py` -> `W01`
    FromUrl,
    /// Menu anchor text, folder-sanitized.
    FromLinkText,
}

/// Which anchor of the workshop menu is the non-workshop trailer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuTrailer {
    /// The menu's last anchor, whatever it links to.
    LastAnchor,
    /// The last `.py` link, after filtering.
    LastWorkshopLink,
}

/// One conference edition: site paths, output folders and the
/// per-edition quirks of its pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edition {
    pub year: u16,
    pub base_url: String,
    pub main_layout: MainTrackLayout,
    pub main_filter: LinkFilter,
    pub workshop_filter: LinkFilter,
    pub workshop_naming: WorkshopNaming,
    pub workshop_trailer: MenuTrailer,
    pub workshop_urls: UrlStyle,
}

impl Edition {
    pub fn for_year(year: u16) -> Option<Self> {
        match year {
            2019 => Some(Self::cvpr2019()),
            2020 => Some(Self::cvpr2020()),
            _ => None,
        }
    }

    pub fn cvpr2019() -> Self {
        Self {
            year: 2019,
            base_url: s!(BASE_URL),
            main_layout: MainTrackLayout::Flat,
            main_filter: LinkFilter::new(ASSET_INCLUDE, &[]),
            workshop_filter: LinkFilter::new(ASSET_INCLUDE, &[]),
            workshop_naming: WorkshopNaming::FromUrl,
            workshop_trailer: MenuTrailer::LastWorkshopLink,
            workshop_urls: UrlStyle::Plain,
        }
    }

    pub fn cvpr2020() -> Self {
        Self {
            year: 2020,
            base_url: s!(BASE_URL),
            main_layout: MainTrackLayout::BySession {
                program_url: s!(PROGRAM_URL_2020),
            },
            main_filter: LinkFilter::new(ASSET_INCLUDE, ASSET_EXCLUDE),
            workshop_filter: LinkFilter::new(ASSET_INCLUDE, &[]),
            workshop_naming: WorkshopNaming::FromLinkText,
            workshop_trailer: MenuTrailer::LastAnchor,
            workshop_urls: UrlStyle::Encoded,
        }
    }

    /// `CVPR2020`
    pub fn tag(&self) -> String {
        format!("CVPR{}", self.year)
    }

    pub fn index_url(&self) -> String {
        join!(&self.base_url, "/", &self.tag(), ".py")
    }

    pub fn workshops_base_url(&self) -> String {
        join!(&self.base_url, "/", &self.tag(), "_workshops/")
    }

    pub fn workshops_menu_url(&self) -> String {
        join!(self.workshops_base_url(), "menu.py")
    }

    pub fn main_folder(&self) -> String {
        self.tag().to_ascii_lowercase()
    }

    pub fn workshops_folder(&self) -> String {
        join!(self.main_folder(), "_workshops")
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}
