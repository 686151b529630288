// src/scrape/mod.rs
mod links;
mod sessions;
mod workshops;

pub use links::{extract_links, AssetLink, LinkFilter, LinkResolver, UrlStyle};
pub use sessions::{parse_sessions, parse_sessions_with, ProgramLayout, Session, SessionMap};
pub use workshops::{extract_workshops, WorkshopPage};
