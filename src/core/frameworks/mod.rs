//! Framework parsers and replacers.
//!
//! Each syntax family implements [`FrameworkHandler::scan`], which walks the
//! buffer once and returns every recognized [`Candidate`]. Parsing and
//! rewriting are both derived from that single scan so they cannot drift
//! apart.

pub mod blade;
pub mod generic;
pub mod jsx;
pub(crate) mod markup;
pub mod rewrite;
pub mod vue;

use std::{path::Path, str::FromStr};

use anyhow::{Result, bail};
use enum_dispatch::enum_dispatch;

use crate::config::Config;
use crate::core::data::{ExtractionResult, SourceRange};
use crate::core::keymap::KeyMap;
use crate::core::validator::{IgnoreConfig, should_translate};

pub use blade::Blade;
pub use generic::GenericText;
pub use jsx::Jsx;
pub use rewrite::{Candidate, KeyLikeRule, Replacement};
pub use vue::Vue;

/// Knobs shared by every variant.
#[derive(Debug, Clone)]
pub struct FrameworkOptions {
    /// Attribute names whose string values are user-facing.
    pub checked_attributes: Vec<String>,
    /// Translation function used in script code.
    pub function_name: String,
    /// Module the translation function is imported from.
    pub import_source: String,
    pub ignore: IgnoreConfig,
    pub key_like: KeyLikeRule,
}

pub fn default_checked_attributes() -> Vec<String> {
    [
        "placeholder",
        "title",
        "alt",
        "label",
        "aria-label",
        "aria-description",
        "aria-placeholder",
        "aria-roledescription",
        "aria-valuetext",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for FrameworkOptions {
    fn default() -> Self {
        Self {
            checked_attributes: default_checked_attributes(),
            function_name: "t".to_string(),
            import_source: "i18next".to_string(),
            ignore: IgnoreConfig::default(),
            key_like: KeyLikeRule::default(),
        }
    }
}

impl FrameworkOptions {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            checked_attributes: config.checked_attributes.clone(),
            function_name: config.translation_function.clone(),
            import_source: config.import_source.clone(),
            ignore: IgnoreConfig::new(&config.ignore_patterns, &config.ignore_texts)?,
            key_like: KeyLikeRule::new(&config.key_like_pattern)?,
        })
    }

    pub fn is_checked_attribute(&self, name: &str) -> bool {
        self.checked_attributes
            .iter()
            .any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Output of [`FrameworkHandler::replace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub content: String,
    pub change_count: usize,
    /// Eligible candidates with no Key Map entry.
    pub unresolved_count: usize,
}

#[enum_dispatch]
pub trait FrameworkHandler {
    fn name(&self) -> &'static str;

    /// Every recognized candidate in source order, before validation.
    fn scan(&self, content: &str, options: &FrameworkOptions) -> Vec<Candidate>;

    /// Post-processing after at least one substitution (import injection).
    fn finish(&self, content: String, _options: &FrameworkOptions) -> String {
        content
    }

    fn parse(&self, content: &str, options: &FrameworkOptions) -> ExtractionResult {
        let mut result = ExtractionResult::default();
        for candidate in self.scan(content, options) {
            if should_translate(&candidate.text, &options.ignore) {
                result.push(candidate.to_item());
            } else {
                result.skip();
            }
        }
        result
    }

    fn replace(
        &self,
        content: &str,
        key_map: &KeyMap,
        namespace: &str,
        options: &FrameworkOptions,
    ) -> ReplaceOutcome {
        let mut edits: Vec<(SourceRange, String)> = Vec::new();
        let mut unresolved_count = 0;

        for candidate in self.scan(content, options) {
            if options.key_like.matches(&candidate.text)
                || !should_translate(&candidate.text, &options.ignore)
            {
                continue;
            }
            match key_map.lookup(namespace, candidate.kind, &candidate.text) {
                Some(key) => edits.push((candidate.replace_range, candidate.replacement.render(key))),
                None => unresolved_count += 1,
            }
        }

        let change_count = edits.len();
        if change_count == 0 {
            return ReplaceOutcome {
                content: content.to_string(),
                change_count,
                unresolved_count,
            };
        }

        let rewritten = rewrite::apply_edits(content, edits);
        ReplaceOutcome {
            content: self.finish(rewritten, options),
            change_count,
            unresolved_count,
        }
    }
}

/// Syntax family of a source buffer.
#[enum_dispatch(FrameworkHandler)]
#[derive(Debug, Clone, Copy)]
pub enum Framework {
    Generic(GenericText),
    MarkupExpression(Jsx),
    TemplateTagged(Vue),
    ArrayPairTagged(Blade),
}

const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

impl Framework {
    /// Pick a variant from the file name, falling back to content markers.
    pub fn detect(path: Option<&Path>, content: &str) -> Self {
        if let Some(path) = path {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if name.ends_with(".blade.php") {
                return Blade.into();
            }
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if ext == "vue" {
                return Vue.into();
            }
            if SCRIPT_EXTENSIONS.contains(&ext.as_str()) {
                return Jsx.into();
            }
            if ext == "php" && has_blade_markers(content) {
                return Blade.into();
            }
        }

        if content.contains("<template") {
            Vue.into()
        } else if has_blade_markers(content) {
            Blade.into()
        } else if has_script_markers(content) {
            Jsx.into()
        } else {
            GenericText.into()
        }
    }
}

fn has_blade_markers(content: &str) -> bool {
    ["@section", "@extends", "@yield", "@include", "@if", "@foreach", "{!!", "=>"]
        .iter()
        .any(|m| content.contains(m))
}

fn has_script_markers(content: &str) -> bool {
    content.contains('<') && content.contains('>')
        || ["import ", "export ", "const ", "function ", "return "]
            .iter()
            .any(|m| content.contains(m))
}

impl FromStr for Framework {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "generic" | "text" => GenericText.into(),
            "jsx" | "tsx" | "react" => Jsx.into(),
            "vue" => Vue.into(),
            "blade" | "laravel" => Blade.into(),
            other => bail!("Unknown framework: \"{}\"", other),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::data::Kind;
    use crate::core::frameworks::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_by_extension() {
        let detect = |p: &str| Framework::detect(Some(PathBuf::from(p).as_path()), "").name();
        assert_eq!(detect("src/App.tsx"), "jsx");
        assert_eq!(detect("src/App.vue"), "vue");
        assert_eq!(detect("views/home.blade.php"), "blade");
        assert_eq!(detect("notes.txt"), "generic");
    }

    #[test]
    fn test_detect_by_content() {
        assert_eq!(Framework::detect(None, "<template><p>Hi</p></template>").name(), "vue");
        assert_eq!(Framework::detect(None, "@section('title', 'Home')").name(), "blade");
        assert_eq!(Framework::detect(None, "<p>Hello</p>").name(), "jsx");
        assert_eq!(Framework::detect(None, "Hello world").name(), "generic");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("vue".parse::<Framework>().unwrap().name(), "vue");
        assert_eq!("React".parse::<Framework>().unwrap().name(), "jsx");
        assert!("svelte".parse::<Framework>().is_err());
    }

    #[test]
    fn test_key_like_text_is_left_alone() {
        let mut map = KeyMap::new();
        map.insert("app", Kind::Text, "app.title", "app.text.app_title");
        let outcome = Framework::from(GenericText).replace(
            "app.title",
            &map,
            "app",
            &FrameworkOptions::default(),
        );
        assert_eq!(outcome.change_count, 0);
        assert_eq!(outcome.content, "app.title");
    }

    #[test]
    fn test_checked_attribute_case_insensitive() {
        let options = FrameworkOptions::default();
        assert!(options.is_checked_attribute("Placeholder"));
        assert!(!options.is_checked_attribute("className"));
    }
}
