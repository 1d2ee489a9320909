//! Key Map: `(namespace, kind, normalized text)` to an assigned dotted key.
//!
//! The map is loaded once per run from a JSON registry and passed by
//! reference into every rewrite. Rewriting only reads it; new keys are
//! synthesized exclusively by [`KeyMap::assign`], which the `extract
//! --assign` command runs before any rewrite.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::data::{ExtractedItem, Kind};
use crate::core::patterns::SHARED;

/// Longest slug produced by [`slugify`].
pub const MAX_SLUG_LEN: usize = 40;

const REGISTRY_VERSION: u32 = 1;

/// Composite lookup key of the Key Map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    pub namespace: String,
    pub kind: Kind,
    /// Output of [`normalize_text`].
    pub text: String,
}

impl Signature {
    pub fn new(namespace: &str, kind: Kind, raw_text: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            kind,
            text: normalize_text(raw_text),
        }
    }
}

/// Normalize candidate text for signature comparison.
///
/// Collapses whitespace, replaces interpolation placeholders with `{}`, and
/// drops trailing `:` and `(` so that `Name:` and `Name` share a key and a
/// text run split before an expression (`Total items (`) still resolves.
pub fn normalize_text(text: &str) -> String {
    let collapsed = SHARED.interpolation.replace_all(text, "{}");
    let joined = collapsed.split_whitespace().collect::<Vec<_>>().join(" ");
    joined
        .trim_end_matches(|c: char| c == ':' || c == '(' || c.is_whitespace())
        .to_string()
}

/// Deterministic slug for a synthesized key segment.
///
/// Lowercases, keeps ASCII alphanumerics, turns every other run into a
/// single `_`, then truncates to `max_len` on a `_` boundary. Text with no
/// ASCII alphanumerics becomes `text`.
pub fn slugify(text: &str, max_len: usize) -> String {
    let normalized = normalize_text(text).replace("{}", " ");
    let mut slug = String::with_capacity(normalized.len());
    let mut pending_sep = false;

    for c in normalized.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else if c != '\'' {
            pending_sep = true;
        }
    }

    if slug.len() > max_len {
        let cut = match slug[..max_len].rfind('_') {
            Some(pos) if pos > 0 => pos,
            _ => max_len,
        };
        slug.truncate(cut);
    }

    if slug.is_empty() {
        "text".to_string()
    } else {
        slug
    }
}

/// One persisted registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMapEntry {
    pub namespace: String,
    pub kind: Kind,
    pub text: String,
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct KeyMapFile {
    version: u32,
    #[serde(default)]
    entries: Vec<KeyMapEntry>,
}

/// Result of assigning a key to one extracted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub text: String,
    pub kind: Kind,
    pub key: String,
    /// False if the signature was already in the map.
    pub is_new: bool,
}

#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    entries: HashMap<Signature, String>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, namespace: &str, kind: Kind, text: &str, key: impl Into<String>) {
        self.entries
            .insert(Signature::new(namespace, kind, text), key.into());
    }

    /// Resolve a raw candidate. `None` means "leave the text alone".
    pub fn lookup(&self, namespace: &str, kind: Kind, text: &str) -> Option<&str> {
        self.entries
            .get(&Signature::new(namespace, kind, text))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key, then signature.
    pub fn entries(&self) -> Vec<KeyMapEntry> {
        let mut entries: Vec<KeyMapEntry> = self
            .entries
            .iter()
            .map(|(sig, key)| KeyMapEntry {
                namespace: sig.namespace.clone(),
                kind: sig.kind,
                text: sig.text.clone(),
                key: key.clone(),
            })
            .collect();
        entries.sort_by(|a, b| {
            (&a.key, &a.namespace, a.kind, &a.text).cmp(&(&b.key, &b.namespace, b.kind, &b.text))
        });
        entries
    }

    /// Load a registry file. A missing file yields an empty map.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read key map: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid key map: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: KeyMapFile = serde_json::from_str(content).context("Failed to parse JSON")?;
        if file.version != REGISTRY_VERSION {
            bail!(
                "Unsupported key map version {} (expected {})",
                file.version,
                REGISTRY_VERSION
            );
        }
        let mut map = Self::new();
        for entry in file.entries {
            map.insert(&entry.namespace, entry.kind, &entry.text, entry.key);
        }
        Ok(map)
    }

    pub fn to_json(&self) -> Result<String> {
        let file = KeyMapFile {
            version: REGISTRY_VERSION,
            entries: self.entries(),
        };
        serde_json::to_string_pretty(&file).context("Failed to serialize key map")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, format!("{}\n", self.to_json()?))
            .with_context(|| format!("Failed to write key map: {}", path.display()))
    }

    /// Assign keys to extracted items, reusing existing signatures.
    ///
    /// New keys follow `<namespace>.<kind>.<slug>`. When that key already
    /// belongs to a different signature, `_2`, `_3`, ... is appended.
    pub fn assign(&mut self, namespace: &str, items: &[ExtractedItem]) -> Vec<Assignment> {
        let mut used: HashSet<String> = self.entries.values().cloned().collect();
        let mut assignments = Vec::with_capacity(items.len());

        for item in items {
            let signature = Signature::new(namespace, item.kind, &item.text);
            if let Some(key) = self.entries.get(&signature) {
                assignments.push(Assignment {
                    text: item.text.clone(),
                    kind: item.kind,
                    key: key.clone(),
                    is_new: false,
                });
                continue;
            }

            let base = format!(
                "{}.{}.{}",
                namespace,
                item.kind,
                slugify(&item.text, MAX_SLUG_LEN)
            );
            let mut key = base.clone();
            let mut suffix = 2;
            while used.contains(&key) {
                key = format!("{}_{}", base, suffix);
                suffix += 1;
            }

            used.insert(key.clone());
            self.entries.insert(signature, key.clone());
            assignments.push(Assignment {
                text: item.text.clone(),
                kind: item.kind,
                key,
                is_new: true,
            });
        }

        assignments
    }
}
