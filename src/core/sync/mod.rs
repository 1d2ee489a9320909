//! Granular locale synchronization.
//!
//! Propagates keys from the base locale into every other locale without
//! touching existing translations. Two on-disk layouts are supported and
//! detected per run:
//!
//! - flat: `<root>/<locale>.json`
//! - grouped: `<root>/<locale>/<document>.json`, chosen when `<root>/<base>/`
//!   is a directory

mod engine;
mod locks;
mod store;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Duration,
};

pub use engine::SyncEngine;
pub use locks::{CancelFlag, PathLocks};
pub use store::{KeyAction, LocaleDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Flat,
    Grouped,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Flat => "flat",
            Layout::Grouped => "grouped",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub base_locale: String,
    /// Explicit target locales. Empty means every locale found under the root.
    pub locales: Vec<String>,
    /// Grouped layout: document for keys whose first segment has none.
    pub default_document: String,
    /// Overwrite existing target values with base values.
    pub force: bool,
    pub write_timeout: Option<Duration>,
    pub cancel: CancelFlag,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            base_locale: "en".to_string(),
            locales: Vec::new(),
            default_document: "common".to_string(),
            force: false,
            write_timeout: None,
            cancel: CancelFlag::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    /// Key insertions summed over every written document.
    pub updated_count: usize,
    pub written_files: Vec<PathBuf>,
    pub failures: Vec<SyncFailure>,
}

impl SyncResult {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn merge(&mut self, other: SyncResult) {
        self.updated_count += other.updated_count;
        self.written_files.extend(other.written_files);
        self.failures.extend(other.failures);
        self.normalize();
    }

    fn normalize(&mut self) {
        self.written_files.sort();
        self.written_files.dedup();
        self.failures.sort_by(|a, b| a.path.cmp(&b.path));
    }
}

pub async fn sync_keys(root: &Path, keys: &[String], options: &SyncOptions) -> SyncResult {
    SyncEngine::new(root, options.clone()).sync_keys(keys).await
}

pub async fn sync_file(root: &Path, file: &Path, options: &SyncOptions) -> SyncResult {
    SyncEngine::new(root, options.clone()).sync_file(file).await
}

pub async fn ensure_keys(
    root: &Path,
    keys: &[String],
    values: &HashMap<String, String>,
    options: &SyncOptions,
) -> SyncResult {
    SyncEngine::new(root, options.clone())
        .ensure_keys(keys, values)
        .await
}
