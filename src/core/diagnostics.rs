//! Parsing of translation diagnostic messages.
//!
//! Recognized shapes:
//!
//! - `Missing translation for "<key>" [<locale>]`
//! - `Style suggestion "<key>" [<locale>] (suggested: <text>)`
//! - `Missing default locale translation for "<key>" [<locale>] (exists in: <a>, <b>)`
//!
//! plus the older phrasings `Missing translation for key "<key>" in locale <locale>`,
//! `Missing translation: "<key>" (<locale>)`, `Missing "<key>" in <locale>`,
//! `Style suggestion for "<key>" in <locale>: <text>` and
//! `Missing "<key>" in default locale <locale> (found in: <a>, <b>)`.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    MissingTranslation {
        key: String,
        locale: String,
    },
    StyleSuggestion {
        key: String,
        locale: String,
        suggested: String,
    },
    MissingDefaultLocale {
        key: String,
        default_locale: String,
        existing_locales: Vec<String>,
    },
}

impl Diagnostic {
    pub fn key(&self) -> &str {
        match self {
            Diagnostic::MissingTranslation { key, .. }
            | Diagnostic::StyleSuggestion { key, .. }
            | Diagnostic::MissingDefaultLocale { key, .. } => key,
        }
    }
}

struct Shapes {
    missing: Vec<Regex>,
    style: Vec<Regex>,
    missing_default: Vec<Regex>,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid diagnostic shape {pattern}: {e}"))
}

static SHAPES: LazyLock<Shapes> = LazyLock::new(|| Shapes {
    missing: [
        r#"^Missing translation for "(?P<key>[^"]+)" \[(?P<locale>[\w-]+)\]$"#,
        r#"^Missing translation for key "(?P<key>[^"]+)" in locale (?P<locale>[\w-]+)$"#,
        r#"^Missing translation: "(?P<key>[^"]+)" \((?P<locale>[\w-]+)\)$"#,
        r#"^Missing "(?P<key>[^"]+)" in (?P<locale>[\w-]+)$"#,
    ]
    .into_iter()
    .map(compile)
    .collect(),
    style: [
        r#"^Style suggestion "(?P<key>[^"]+)" \[(?P<locale>[\w-]+)\] \(suggested: (?P<text>.*)\)$"#,
        r#"^Style suggestion for "(?P<key>[^"]+)" in (?P<locale>[\w-]+): (?P<text>.+)$"#,
    ]
    .into_iter()
    .map(compile)
    .collect(),
    missing_default: [
        r#"^Missing default locale translation for "(?P<key>[^"]+)" \[(?P<locale>[\w-]+)\] \(exists in: (?P<list>[^)]*)\)$"#,
        r#"^Missing "(?P<key>[^"]+)" in default locale (?P<locale>[\w-]+) \(found in: (?P<list>[^)]*)\)$"#,
    ]
    .into_iter()
    .map(compile)
    .collect(),
});

fn first_match<'h>(patterns: &[Regex], message: &'h str) -> Option<Captures<'h>> {
    patterns.iter().find_map(|re| re.captures(message))
}

fn group(caps: &Captures<'_>, name: &str) -> Option<String> {
    caps.name(name).map(|m| m.as_str().to_string())
}

/// Parse a diagnostic message. `None` for anything that is not a known shape.
pub fn parse_diagnostic(message: &str) -> Option<Diagnostic> {
    let message = message.trim();

    if let Some(caps) = first_match(&SHAPES.missing_default, message) {
        let existing_locales: Vec<String> = caps
            .name("list")?
            .as_str()
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        return Some(Diagnostic::MissingDefaultLocale {
            key: group(&caps, "key")?,
            default_locale: group(&caps, "locale")?,
            existing_locales,
        });
    }

    if let Some(caps) = first_match(&SHAPES.style, message) {
        return Some(Diagnostic::StyleSuggestion {
            key: group(&caps, "key")?,
            locale: group(&caps, "locale")?,
            suggested: group(&caps, "text")?,
        });
    }

    let caps = first_match(&SHAPES.missing, message)?;
    Some(Diagnostic::MissingTranslation {
        key: group(&caps, "key")?,
        locale: group(&caps, "locale")?,
    })
}
