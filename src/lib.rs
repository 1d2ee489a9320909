//! Lingo - extract, rewrite and synchronize translatable strings
//!
//! Lingo finds user-facing strings in JSX/TSX, Vue and Blade sources, assigns
//! them stable dotted keys, rewrites the sources to call a translation
//! function, and keeps locale JSON documents in sync with the base locale.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction, rewrite and sync engine
//! - `logging`: tracing subscriber setup
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod utils;
