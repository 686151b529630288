// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "http://openaccess.thecvf.com";
pub const PROGRAM_URL_2020: &str = "http://cvpr2020.thecvf.com/program/main-conference";
pub const USER_AGENT: &str = concat!("cvf_dl/", env!("CARGO_PKG_VERSION"));
pub const CONNECT_TIMEOUT_SECS: u64 = 15;
pub const READ_TIMEOUT_SECS: u64 = 60;

// Editions
pub const DEFAULT_YEAR: u16 = 2020;

// Passes
pub const DOWNLOAD_MAIN_TRACK: bool = true;
pub const DOWNLOAD_WORKSHOPS: bool = true;

// Retry
pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY_MS: u64 = 100;
pub const PART_SUFFIX: &str = "part";

// Link filters
pub const ASSET_INCLUDE: &str = "pdf";
pub const ASSET_EXCLUDE: &[&str] = &["supplemental.pdf"];
pub const WORKSHOP_PAGE_INCLUDE: &str = ".py";
pub const ANCHOR_CONTAINER: &str = "dl";

// Program page layout (main conference schedule).
// Tied to one page's markup; expect to revisit these when the page changes.
pub const SESSION_MARKER: &str = "Session:";
pub const SESSION_END_MARKER: &str = "tbody";
pub const FIRST_TITLE_OFFSET: usize = 24;
pub const TITLE_STRIDE: usize = 8;
pub const END_CHECK_OFFSET: usize = 4;

// Bag-of-words: "<Author>_<title words>_CVPR_2020_paper.pdf"
pub const LABEL_LEADING_TOKENS: usize = 1;
pub const LABEL_TRAILING_TOKENS: usize = 3;

// Output
pub const DEFAULT_OUT_DIR: &str = ".";

// Logging
pub const LOG_FILE: &str = ".store/debug.log";
