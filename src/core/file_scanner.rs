use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::warn;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal path prefixes.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub struct ScanResult {
    /// Source files in sorted order.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Expand `inputs` (files or directories) into rewritable source files.
///
/// Files named explicitly are kept if their extension is supported; `ignores`
/// applies to everything found while walking directories.
pub fn scan_sources(base_dir: &Path, inputs: &[PathBuf], ignores: &[String]) -> ScanResult {
    let mut literal_ignores: Vec<PathBuf> = Vec::new();
    let mut glob_ignores: Vec<Pattern> = Vec::new();
    for p in ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_ignores.push(pattern),
                Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignores.push(base_dir.join(p));
        }
    }
    let ignored = |path: &Path| {
        literal_ignores.iter().any(|i| path.starts_with(i))
            || glob_ignores
                .iter()
                .any(|p| p.matches_path(path) || p.matches_path(path.strip_prefix(base_dir).unwrap_or(path)))
    };

    let mut files = Vec::new();
    let mut skipped_count = 0;
    for input in inputs {
        let input = if input.is_absolute() {
            input.clone()
        } else {
            base_dir.join(input)
        };
        if input.is_file() {
            if is_source_file(&input) {
                files.push(input);
            }
            continue;
        }

        for entry in WalkDir::new(&input) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && is_source_file(path) && !ignored(path) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    ScanResult {
        files,
        skipped_count,
    }
}

pub fn is_source_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js" | "mjs" | "cjs" | "vue" | "php")
    )
}

/// Files the syntax-tree normalizer can parse.
pub fn is_script_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js" | "mjs" | "cjs")
    )
}

#[cfg(test)]
mod tests {
    use crate::core::file_scanner::*;
    use pretty_assertions::assert_eq;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_scan_supported_files() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        fs::create_dir_all(base.join("src/views")).unwrap();
        File::create(base.join("src/App.tsx")).unwrap();
        File::create(base.join("src/Card.vue")).unwrap();
        File::create(base.join("src/views/home.blade.php")).unwrap();
        File::create(base.join("src/style.css")).unwrap();

        let result = scan_sources(base, &[PathBuf::from("src")], &[]);
        let names: Vec<String> = result
            .files
            .iter()
            .map(|f| f.strip_prefix(base).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["src/App.tsx", "src/Card.vue", "src/views/home.blade.php"]);
    }

    #[test]
    fn test_scan_ignores() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        fs::create_dir_all(base.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(base.join("legacy")).unwrap();
        File::create(base.join("node_modules/pkg/index.js")).unwrap();
        File::create(base.join("legacy/old.js")).unwrap();
        File::create(base.join("app.js")).unwrap();

        let result = scan_sources(
            base,
            &[PathBuf::from(".")],
            &["**/node_modules/**".to_string(), "legacy".to_string()],
        );
        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].ends_with("app.js"));
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.md");
        File::create(&file).unwrap();
        let tsx = dir.path().join("App.tsx");
        File::create(&tsx).unwrap();

        let result = scan_sources(dir.path(), &[file, tsx.clone()], &[]);
        assert_eq!(result.files, vec![tsx]);
    }

    #[test]
    fn test_is_script_file() {
        assert!(is_script_file(Path::new("a.tsx")));
        assert!(!is_script_file(Path::new("a.vue")));
        assert!(is_source_file(Path::new("a.blade.php")));
    }
}
