//! Extraction, rewrite and synchronization engine.
//!
//! ## Module Structure
//!
//! - `data`: extracted items, kinds, source ranges
//! - `patterns`: shared regex tables
//! - `validator`: the translate-or-not predicate
//! - `keymap`: key assignment and lookup
//! - `frameworks`: per-syntax parsers and replacers
//! - `parsers`: swc parsing for the normalizer
//! - `normalize`: split-parenthetical repair
//! - `sync`: locale document propagation
//! - `diagnostics`: diagnostic message parsing
//! - `file_scanner`: source file discovery

pub mod data;
pub mod diagnostics;
pub mod file_scanner;
pub mod frameworks;
pub mod keymap;
pub mod normalize;
pub mod parsers;
pub mod patterns;
pub mod sync;
pub mod validator;
