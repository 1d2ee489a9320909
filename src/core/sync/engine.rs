use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use tokio::{fs, task::JoinSet};
use tracing::{debug, warn};

use super::{CancelFlag, Layout, LocaleDocument, PathLocks, SyncFailure, SyncOptions, SyncResult};
use crate::utils::humanize_segment;

/// Keys routed to each document. `None` is the single document of the flat
/// layout; `Some` names a file inside a grouped locale directory.
type Plan = BTreeMap<Option<String>, Vec<String>>;

pub struct SyncEngine {
    root: PathBuf,
    options: SyncOptions,
    locks: PathLocks,
}

impl SyncEngine {
    pub fn new(root: impl Into<PathBuf>, options: SyncOptions) -> Self {
        Self {
            root: root.into(),
            options,
            locks: PathLocks::shared(),
        }
    }

    /// Share a lock registry with other engines writing the same tree.
    pub fn with_locks(mut self, locks: PathLocks) -> Self {
        self.locks = locks;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn layout(&self) -> Layout {
        match fs::metadata(self.root.join(&self.options.base_locale)).await {
            Ok(meta) if meta.is_dir() => Layout::Grouped,
            _ => Layout::Flat,
        }
    }

    /// Locales to write, sorted, never including the base locale.
    pub async fn target_locales(&self, layout: Layout) -> Result<Vec<String>> {
        let mut locales = if self.options.locales.is_empty() {
            self.discover_locales(layout).await?
        } else {
            self.options.locales.clone()
        };
        locales.retain(|l| *l != self.options.base_locale && !l.starts_with('.'));
        locales.sort();
        locales.dedup();
        Ok(locales)
    }

    async fn discover_locales(&self, layout: Layout) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.root).await.with_context(|| {
            format!("Failed to read translations root: {}", self.root.display())
        })?;

        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            let name = match layout {
                Layout::Grouped if file_type.is_dir() => path.file_name(),
                Layout::Flat
                    if file_type.is_file() && path.extension().is_some_and(|e| e == "json") =>
                {
                    path.file_stem()
                }
                _ => None,
            };
            if let Some(name) = name {
                found.push(name.to_string_lossy().into_owned());
            }
        }
        Ok(found)
    }

    fn document_path(&self, layout: Layout, locale: &str, document: Option<&str>) -> PathBuf {
        match (layout, document) {
            (Layout::Flat, _) => self.root.join(format!("{}.json", locale)),
            (Layout::Grouped, Some(document)) => self.root.join(locale).join(document),
            (Layout::Grouped, None) => self
                .root
                .join(locale)
                .join(format!("{}.json", self.options.default_document)),
        }
    }

    async fn plan(&self, layout: Layout, keys: &[String]) -> Plan {
        let mut plan = Plan::new();
        let mut known: HashMap<String, bool> = HashMap::new();
        for key in keys {
            let document = match layout {
                Layout::Flat => None,
                Layout::Grouped => Some(self.route(key, &mut known).await),
            };
            plan.entry(document).or_default().push(key.clone());
        }
        plan
    }

    /// Grouped layout: `<segment>.json` if the base locale has it, else the
    /// default document.
    async fn route(&self, key: &str, known: &mut HashMap<String, bool>) -> String {
        let segment = key.split('.').next().unwrap_or(key);
        let candidate = format!("{}.json", segment);
        let exists = match known.get(&candidate) {
            Some(exists) => *exists,
            None => {
                let path = self.root.join(&self.options.base_locale).join(&candidate);
                let exists = fs::try_exists(&path).await.unwrap_or(false);
                known.insert(candidate.clone(), exists);
                exists
            }
        };
        if exists {
            candidate
        } else {
            format!("{}.json", self.options.default_document)
        }
    }

    /// Copy `keys` from the base locale into every target locale.
    pub async fn sync_keys(&self, keys: &[String]) -> SyncResult {
        let layout = self.layout().await;
        let plan = self.plan(layout, keys).await;
        self.propagate(layout, plan).await
    }

    /// Propagate every key of one base-locale document. Any other file is a
    /// no-op.
    pub async fn sync_file(&self, file: &Path) -> SyncResult {
        let layout = self.layout().await;
        let Some((locale, document)) = self.locate(layout, file).await else {
            debug!(path = %file.display(), "not a locale document under the translations root");
            return SyncResult::default();
        };
        if locale != self.options.base_locale {
            debug!(path = %file.display(), locale, "not the base locale, skipping");
            return SyncResult::default();
        }

        let base_path = self.document_path(layout, &locale, document.as_deref());
        let keys = match self.load_locked(&base_path).await {
            Ok(doc) => doc.leaf_keys(),
            Err(e) => {
                return SyncResult {
                    failures: vec![failure(&base_path, &e)],
                    ..SyncResult::default()
                };
            }
        };

        let mut plan = Plan::new();
        plan.insert(document, keys);
        self.propagate(layout, plan).await
    }

    /// Write missing base keys, then propagate them.
    ///
    /// A missing value comes from `values` or is derived from the last key
    /// segment. With `force`, base keys that have a supplied value are
    /// overwritten; propagation itself never forces, so existing target
    /// translations survive.
    pub async fn ensure_keys(
        &self,
        keys: &[String],
        values: &HashMap<String, String>,
    ) -> SyncResult {
        let layout = self.layout().await;
        let plan = self.plan(layout, keys).await;
        let mut result = SyncResult::default();

        for (document, doc_keys) in plan {
            let path = self.document_path(layout, &self.options.base_locale, document.as_deref());
            let lock = self.locks.lock_for(&path);
            let _guard = lock.lock().await;

            let mut doc = match LocaleDocument::load(&path).await {
                Ok(doc) => doc,
                Err(e) => {
                    result.failures.push(failure(&path, &e));
                    continue;
                }
            };

            let mut updated = 0;
            for key in &doc_keys {
                let supplied = values.get(key);
                let value = supplied.cloned().unwrap_or_else(|| {
                    humanize_segment(key.rsplit('.').next().unwrap_or(key))
                });
                let force = self.options.force && supplied.is_some();
                if let Some(action) = doc.fill(key, Value::String(value), force) {
                    debug!(key = %key, action = action.as_str(), "base locale key");
                    updated += 1;
                }
            }
            if updated == 0 {
                continue;
            }

            match write_document(&doc, &path, &self.options.cancel, self.options.write_timeout).await {
                Ok(()) => {
                    debug!(path = %path.display(), updated, "updated base locale document");
                    result.updated_count += updated;
                    result.written_files.push(path);
                }
                Err(e) => result.failures.push(failure(&path, &e)),
            }
        }

        let propagation = SyncEngine {
            root: self.root.clone(),
            options: SyncOptions {
                force: false,
                ..self.options.clone()
            },
            locks: self.locks.clone(),
        };
        result.merge(propagation.sync_keys(keys).await);
        result
    }

    async fn propagate(&self, layout: Layout, plan: Plan) -> SyncResult {
        let mut result = SyncResult::default();
        let targets = match self.target_locales(layout).await {
            Ok(targets) => targets,
            Err(e) => {
                result.failures.push(failure(&self.root, &e));
                return result;
            }
        };
        debug!(layout = layout.as_str(), ?targets, "propagating");

        let mut tasks = JoinSet::new();
        for (document, keys) in plan {
            let base_path = self.document_path(layout, &self.options.base_locale, document.as_deref());
            let base = match self.load_locked(&base_path).await {
                Ok(doc) => doc,
                Err(e) => {
                    result.failures.push(failure(&base_path, &e));
                    continue;
                }
            };
            let entries: Vec<(String, Value)> =
                keys.iter().flat_map(|k| base.entries_under(k)).collect();
            if entries.is_empty() {
                debug!(path = %base_path.display(), "no requested keys in base document");
                continue;
            }

            let entries = Arc::new(entries);
            for locale in &targets {
                let job = DocumentJob {
                    path: self.document_path(layout, locale, document.as_deref()),
                    entries: Arc::clone(&entries),
                    force: self.options.force,
                    locks: self.locks.clone(),
                    cancel: self.options.cancel.clone(),
                    timeout: self.options.write_timeout,
                };
                tasks.spawn(job.run());
            }
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(outcome)) => {
                    if let Some(path) = outcome.written {
                        result.updated_count += outcome.updated;
                        result.written_files.push(path);
                    }
                }
                Ok(Err(failure)) => result.failures.push(failure),
                Err(e) => result.failures.push(SyncFailure {
                    path: self.root.clone(),
                    error: e.to_string(),
                }),
            }
        }

        result.normalize();
        result
    }

    /// Read a document while no writer holds its lock.
    async fn load_locked(&self, path: &Path) -> Result<LocaleDocument> {
        let lock = self.locks.lock_for(path);
        let _guard = lock.lock().await;
        LocaleDocument::load(path).await
    }

    /// Locale and grouped document name of `file`.
    async fn locate(&self, layout: Layout, file: &Path) -> Option<(String, Option<String>)> {
        let relative = match file.strip_prefix(&self.root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => match (fs::canonicalize(&self.root).await, fs::canonicalize(file).await) {
                (Ok(root), Ok(file)) => file.strip_prefix(&root).ok()?.to_path_buf(),
                _ if file.is_relative() => file.to_path_buf(),
                _ => return None,
            },
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        match layout {
            Layout::Flat => {
                let [name] = parts.as_slice() else {
                    return None;
                };
                let locale = name.strip_suffix(".json")?;
                Some((locale.to_string(), None))
            }
            Layout::Grouped => {
                let (locale, rest) = parts.split_first()?;
                if rest.is_empty() {
                    return None;
                }
                Some((locale.clone(), Some(rest.join("/"))))
            }
        }
    }
}

struct DocumentJob {
    path: PathBuf,
    entries: Arc<Vec<(String, Value)>>,
    force: bool,
    locks: PathLocks,
    cancel: CancelFlag,
    timeout: Option<Duration>,
}

struct DocumentOutcome {
    updated: usize,
    written: Option<PathBuf>,
}

impl DocumentJob {
    async fn run(self) -> Result<DocumentOutcome, SyncFailure> {
        let lock = self.locks.lock_for(&self.path);
        let _guard = lock.lock().await;

        let mut doc = LocaleDocument::load(&self.path)
            .await
            .map_err(|e| failure(&self.path, &e))?;

        let mut updated = 0;
        for (key, value) in self.entries.iter() {
            if let Some(action) = doc.fill(key, value.clone(), self.force) {
                debug!(path = %self.path.display(), key = %key, action = action.as_str(), "filled");
                updated += 1;
            }
        }
        if updated == 0 {
            return Ok(DocumentOutcome {
                updated,
                written: None,
            });
        }

        write_document(&doc, &self.path, &self.cancel, self.timeout)
            .await
            .map_err(|e| failure(&self.path, &e))?;
        debug!(path = %self.path.display(), updated, "wrote locale document");

        Ok(DocumentOutcome {
            updated,
            written: Some(self.path),
        })
    }
}

async fn write_document(
    doc: &LocaleDocument,
    path: &Path,
    cancel: &CancelFlag,
    timeout: Option<Duration>,
) -> Result<()> {
    if cancel.is_cancelled() {
        bail!("Cancelled before write");
    }
    match timeout {
        Some(limit) => tokio::time::timeout(limit, doc.save(path))
            .await
            .map_err(|_| anyhow!("Timed out after {:?}", limit))?,
        None => doc.save(path).await,
    }
}

fn failure(path: &Path, error: &anyhow::Error) -> SyncFailure {
    warn!(path = %path.display(), error = %error, "sync failed");
    SyncFailure {
        path: path.to_path_buf(),
        error: format!("{:#}", error),
    }
}
