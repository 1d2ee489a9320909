use std::{
    collections::HashMap,
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};

use super::super::args::{CommonArgs, LocaleArgs, SourceArgs};
use crate::{
    config::{ConfigLoadResult, load_config},
    core::{
        file_scanner::scan_sources,
        frameworks::{Framework, FrameworkOptions},
        sync::SyncOptions,
    },
};

/// Config plus the directory its relative paths resolve against.
pub struct ProjectContext {
    pub loaded: ConfigLoadResult,
}

impl ProjectContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let start_dir = match &common.root {
            Some(root) => root.clone(),
            None => env::current_dir().context("Failed to read current directory")?,
        };
        let loaded = load_config(&start_dir)?;
        Ok(Self { loaded })
    }

    pub fn base_dir(&self) -> &Path {
        &self.loaded.base_dir
    }

    pub fn framework_options(&self) -> Result<FrameworkOptions> {
        FrameworkOptions::from_config(&self.loaded.config)
    }

    pub fn key_map_path(&self) -> PathBuf {
        self.loaded.resolve(&self.loaded.config.key_map)
    }

    pub fn namespace(&self, source: &SourceArgs) -> String {
        source
            .namespace
            .clone()
            .unwrap_or_else(|| self.loaded.config.namespace.clone())
    }

    /// Forced framework from `--framework`, if any.
    pub fn framework_override(&self, source: &SourceArgs) -> Result<Option<Framework>> {
        source
            .framework
            .as_deref()
            .map(str::parse::<Framework>)
            .transpose()
    }

    pub fn source_files(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let cwd = env::current_dir().unwrap_or_else(|_| self.base_dir().to_path_buf());
        scan_sources(&cwd, paths, &self.loaded.config.ignores).files
    }

    pub fn translations_root(&self, locale: &LocaleArgs) -> PathBuf {
        match &locale.translations_root {
            Some(root) => root.clone(),
            None => self.loaded.resolve(&self.loaded.config.translations_root),
        }
    }

    pub fn sync_options(&self, locale: &LocaleArgs, force: bool) -> SyncOptions {
        let config = &self.loaded.config;
        SyncOptions {
            base_locale: locale
                .base_locale
                .clone()
                .unwrap_or_else(|| config.base_locale.clone()),
            locales: if locale.locales.is_empty() {
                config.locales.clone()
            } else {
                locale.locales.clone()
            },
            default_document: config.default_document.clone(),
            force,
            write_timeout: locale.timeout_ms.map(Duration::from_millis),
            ..SyncOptions::default()
        }
    }
}

/// Runtime for the async sync engine.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")
}

/// Split `key=value` arguments into keys and supplied values.
pub fn parse_entries(entries: &[String]) -> Result<(Vec<String>, HashMap<String, String>)> {
    let mut keys = Vec::with_capacity(entries.len());
    let mut values = HashMap::new();
    for entry in entries {
        let (key, value) = match entry.split_once('=') {
            Some((key, value)) => (key.trim(), Some(value)),
            None => (entry.trim(), None),
        };
        if key.is_empty() || key.split('.').any(str::is_empty) {
            bail!("Invalid key: \"{}\"", entry);
        }
        if let Some(value) = value {
            values.insert(key.to_string(), value.to_string());
        }
        keys.push(key.to_string());
    }
    Ok((keys, values))
}
