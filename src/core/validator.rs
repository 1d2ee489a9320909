//! Translation eligibility predicate.
//!
//! `should_translate` is the single decision point used by both parsing and
//! rewriting, so an item the parser extracts is exactly an item the replacer
//! is willing to rewrite.

use std::collections::HashSet;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Regex, RegexSet};

use crate::core::patterns::SHARED;
use crate::utils::contains_alphabetic;

/// Caller-supplied exclusions.
#[derive(Debug, Clone, Default)]
pub struct IgnoreConfig {
    patterns: Vec<Regex>,
    texts: HashSet<String>,
}

impl IgnoreConfig {
    pub fn new(patterns: &[String], texts: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid ignore pattern: \"{}\"", p)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            patterns,
            texts: texts.iter().map(|t| t.trim().to_string()).collect(),
        })
    }

    pub fn is_ignored(&self, text: &str) -> bool {
        self.texts.contains(text) || self.patterns.iter().any(|p| p.is_match(text))
    }
}

static CODE_SHAPES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // assignment
        r"^[A-Za-z_$][\w$.\[\]]*\s*[-+*/%|&]?=[^=>]",
        // control flow
        r"^(?:if|for|while|switch|catch)\s*\(",
        r"^(?:else|try|finally|do)\s*(?:\{|$)",
        r"^else\s+if\s*\(",
        r"^\}?\s*(?:else|catch|finally)\b\s*(?:\{|\(|if\b|$)",
        r"^(?:return|throw|break|continue)\b.*;$",
        r"^(?:const|let|var)\s+[\w$]+\s*[=:]",
        r"^(?:async\s+)?function\b\s*[\w$]*\s*\(",
        r"^class\s+[A-Z][\w$]*",
        r"^new\s+[A-Z][\w$]*\s*\(",
        // modules
        r"^import\s.+\sfrom\s",
        r"^import\s*\(",
        r"^export\s+(?:default|const|let|function|class|\{|\*)",
        r#"\brequire\s*\(\s*['"]"#,
        // operators and call shapes
        r"=>|===|!==|&&|\|\||;\s*$",
        r"^[\w$.]+\([^()]*\)$",
        // identifier-only tokens
        r"^[a-z][a-z0-9]*(?:[A-Z][a-z0-9]*)+$",
        r"^[a-z0-9]+(?:_[a-z0-9]+)+$",
        r"^[A-Z0-9]+(?:_[A-Z0-9]+)+$",
        r"^[a-z0-9]+(?:-[a-z0-9]+)+$",
        r"^[A-Za-z_$][\w$-]*(?:\.[\w$-]+)+$",
        // urls, paths, markup
        r"^(?:https?://|mailto:|tel:|www\.|/|\./|\.\./|#)\S*$",
        r"^\S+\.(?:png|jpe?g|gif|svg|webp|ico|js|jsx|ts|tsx|css|scss|json|html|vue|php)$",
        r"^<[^>]+>.*$",
        r"^[\w.+-]+@[\w-]+(?:\.[\w-]+)+$",
    ])
    .unwrap_or_else(|e| panic!("invalid built-in code shape: {e}"))
});

/// Returns true if `text` looks like code rather than prose.
pub fn is_code_shaped(text: &str) -> bool {
    CODE_SHAPES.is_match(text) || looks_like_class_list(text)
}

/// Utility-class lists such as `flex items-center gap-2`.
fn looks_like_class_list(text: &str) -> bool {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 2 {
        return false;
    }
    let class_like = |t: &&str| {
        t.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "-:/[].".contains(c))
    };
    if !tokens.iter().all(class_like) {
        return false;
    }
    let marked = tokens
        .iter()
        .filter(|t| t.contains('-') || t.contains(':'))
        .count();
    marked * 2 > tokens.len()
}

/// Returns true if `text` is already a translation call or wraps one.
pub fn is_translated(text: &str) -> bool {
    SHARED.translated_call.is_match(text)
}

/// Decide whether a candidate string should be translated.
///
/// Rejects empty, punctuation-only and letter-free strings, code-shaped
/// strings, strings that already contain a translation call, strings whose
/// letters all live inside interpolation placeholders, and anything matched
/// by `ignore`.
pub fn should_translate(text: &str, ignore: &IgnoreConfig) -> bool {
    let text = text.trim();
    if text.is_empty() || !contains_alphabetic(text) {
        return false;
    }
    if is_translated(text) || is_code_shaped(text) {
        return false;
    }
    let without_placeholders = SHARED.interpolation.replace_all(text, "");
    if !contains_alphabetic(&without_placeholders) {
        return false;
    }
    !ignore.is_ignored(text)
}
