use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::frameworks::{self, rewrite::DEFAULT_KEY_LIKE_PATTERN};

pub const CONFIG_FILE_NAME: &str = ".lingorc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Locale documents live here, flat or grouped.
    #[serde(default = "default_translations_root", alias = "localesDir")]
    pub translations_root: String,
    #[serde(default = "default_base_locale", alias = "sourceLocale")]
    pub base_locale: String,
    /// Target locales. Empty means every locale found under the root.
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default = "default_document")]
    pub default_document: String,
    #[serde(default = "default_key_map")]
    pub key_map: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_translation_function")]
    pub translation_function: String,
    #[serde(default = "default_import_source")]
    pub import_source: String,
    #[serde(default = "frameworks::default_checked_attributes")]
    pub checked_attributes: Vec<String>,
    /// Regexes; matching text is never extracted.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default = "default_key_like_pattern")]
    pub key_like_pattern: String,
    /// Globs or literal paths skipped when expanding source directories.
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
}

fn default_translations_root() -> String {
    "./locales".to_string()
}

fn default_base_locale() -> String {
    "en".to_string()
}

fn default_document() -> String {
    "common".to_string()
}

fn default_key_map() -> String {
    "./.lingo/keymap.json".to_string()
}

fn default_namespace() -> String {
    "app".to_string()
}

fn default_translation_function() -> String {
    "t".to_string()
}

fn default_import_source() -> String {
    "i18next".to_string()
}

fn default_key_like_pattern() -> String {
    DEFAULT_KEY_LIKE_PATTERN.to_string()
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/vendor/**", "**/dist/**"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translations_root: default_translations_root(),
            base_locale: default_base_locale(),
            locales: Vec::new(),
            default_document: default_document(),
            key_map: default_key_map(),
            namespace: default_namespace(),
            translation_function: default_translation_function(),
            import_source: default_import_source(),
            checked_attributes: frameworks::default_checked_attributes(),
            ignore_patterns: Vec::new(),
            ignore_texts: Vec::new(),
            key_like_pattern: default_key_like_pattern(),
            ignores: default_ignores(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a regex or glob pattern does not compile.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignore_patterns {
            Regex::new(pattern)
                .with_context(|| format!("Invalid regex in 'ignorePatterns': \"{}\"", pattern))?;
        }
        Regex::new(&self.key_like_pattern).with_context(|| {
            format!("Invalid regex in 'keyLikePattern': \"{}\"", self.key_like_pattern)
        })?;
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
            }
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

impl ConfigLoadResult {
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
