use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tokio::fs;

/// Action taken on a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Added,
    Updated,
}

impl KeyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Added => "added",
            KeyAction::Updated => "updated",
        }
    }
}

/// One locale document held in memory.
///
/// Keys are dotted paths into nested objects ("common.actions.save").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleDocument {
    data: Map<String, Value>,
}

impl LocaleDocument {
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_str(content).context("Failed to parse JSON")?;
        match value {
            Value::Object(data) => Ok(Self { data }),
            _ => bail!("Root of locale document must be an object"),
        }
    }

    /// Read a document from disk.
    ///
    /// A missing file is an empty document. A file that does not parse is
    /// logged and also treated as empty; only I/O failures are errors.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read file: {}", path.display()));
            }
        };
        match Self::parse(&content) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "malformed locale document, treating as empty"
                );
                Ok(Self::default())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let mut current = self.data.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Dotted paths of every non-object value, sorted.
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaves(&self.data, "", &mut keys);
        keys.sort();
        keys
    }

    /// Leaves under `key`, or `key` itself if it holds a plain value.
    pub fn entries_under(&self, key: &str) -> Vec<(String, Value)> {
        match self.get(key) {
            None => Vec::new(),
            Some(Value::Object(map)) => {
                let mut keys = Vec::new();
                collect_leaves(map, key, &mut keys);
                keys.sort();
                keys.into_iter()
                    .filter_map(|k| self.get(&k).cloned().map(|v| (k, v)))
                    .collect()
            }
            Some(value) => vec![(key.to_string(), value.clone())],
        }
    }

    /// Fill `key` with `value` if it is absent or an empty string.
    ///
    /// With `force`, an existing different value is overwritten and a
    /// non-object intermediate is replaced. Returns `None` if nothing
    /// changed.
    pub fn fill(&mut self, key: &str, value: Value, force: bool) -> Option<KeyAction> {
        let parts: Vec<&str> = key.split('.').collect();
        fill_nested(&mut self.data, &parts, value, force)
    }

    /// Pretty JSON with keys sorted at every level and a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        let sorted = sort_value(&Value::Object(self.data.clone()));
        let content = serde_json::to_string_pretty(&sorted).context("Failed to serialize JSON")?;
        Ok(format!("{}\n", content))
    }

    /// Save the JSON file with pretty formatting
    ///
    /// Uses 2-space indentation and adds a trailing newline. The whole
    /// document is serialized before the file is touched.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_pretty_string()?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }
}

fn collect_leaves(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => collect_leaves(inner, &path, out),
            _ => out.push(path),
        }
    }
}

fn is_empty_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty())
}

/// Insert a value at a nested path, creating intermediate objects as needed
fn fill_nested(
    root: &mut Map<String, Value>,
    path: &[&str],
    value: Value,
    force: bool,
) -> Option<KeyAction> {
    let (first, rest) = path.split_first()?;

    if rest.is_empty() {
        let action = match root.get(*first) {
            None => KeyAction::Added,
            Some(existing) if is_empty_string(existing) => KeyAction::Updated,
            Some(existing) if force && *existing != value => KeyAction::Updated,
            Some(_) => return None,
        };
        root.insert(first.to_string(), value);
        return Some(action);
    }

    let next_level = root
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    // A plain value in the way is only replaced when forced
    if !next_level.is_object() {
        if !force && !is_empty_string(next_level) {
            tracing::warn!(key = %first, "cannot nest under a non-object value");
            return None;
        }
        *next_level = Value::Object(Map::new());
    }

    fill_nested(next_level.as_object_mut()?, rest, value, force)
}

fn sort_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                if let Some(inner) = map.get(key) {
                    sorted.insert(key.clone(), sort_value(inner));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_value).collect()),
        other => other.clone(),
    }
}
