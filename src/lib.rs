//! `price-sniper` library crate.
//!
//! Matches product names against a keyword price catalog and resolves
//! per-region prices. The binary entrypoint lives in `main.rs`.

pub mod batch;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod model;
pub mod normalizer;
pub mod storage;
pub mod utils;
