// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod file;
pub mod logging;
pub mod matching;
pub mod progress;
pub mod runner;
pub mod scrape;
