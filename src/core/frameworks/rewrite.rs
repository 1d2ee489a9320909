//! Shared rewrite machinery: span claiming, edit application, import injection.

use anyhow::{Context, Result};
use regex::Regex;

use crate::core::data::{ExtractedItem, ItemType, Kind, SourceRange};
use crate::core::patterns::SHARED;

/// Default idempotency marker: text that already looks like a dotted key.
pub const DEFAULT_KEY_LIKE_PATTERN: &str = r"^[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)+$";

/// "Looks like a key already" test, kept separate so it can be tuned.
#[derive(Debug, Clone)]
pub struct KeyLikeRule(Regex);

impl KeyLikeRule {
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .with_context(|| format!("Invalid key-like pattern: \"{}\"", pattern))
    }

    pub fn matches(&self, text: &str) -> bool {
        self.0.is_match(text.trim())
    }
}

impl Default for KeyLikeRule {
    fn default() -> Self {
        Self(
            Regex::new(DEFAULT_KEY_LIKE_PATTERN)
                .unwrap_or_else(|e| panic!("invalid built-in key pattern: {e}")),
        )
    }
}

/// How a resolved key is written back in place of a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// `t('key')`
    Call { function: String },
    /// `{t('key')}`
    Markup { function: String },
    /// `{{ $t('key') }}`
    Interpolation { function: String },
    /// `:name="$t('key')"`
    BoundAttribute { name: String, function: String },
}

impl Replacement {
    pub fn render(&self, key: &str) -> String {
        let key = key.replace('\\', "\\\\").replace('\'', "\\'");
        match self {
            Replacement::Call { function } => format!("{function}('{key}')"),
            Replacement::Markup { function } => format!("{{{function}('{key}')}}"),
            Replacement::Interpolation { function } => format!("{{{{ {function}('{key}') }}}}"),
            Replacement::BoundAttribute { name, function } => {
                format!(":{name}=\"{function}('{key}')\"")
            }
        }
    }
}

/// A recognized span, before validation and lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub item_type: ItemType,
    pub kind: Kind,
    /// Span of the text itself (no quotes).
    pub range: SourceRange,
    /// Span substituted on rewrite.
    pub replace_range: SourceRange,
    pub replacement: Replacement,
}

impl Candidate {
    pub fn to_item(&self) -> ExtractedItem {
        ExtractedItem {
            text: self.text.clone(),
            item_type: self.item_type,
            kind: self.kind,
            range: self.range,
        }
    }
}

/// Ordered candidate collection with first-claim-wins span ownership.
///
/// Passes run from most to least specific. A pass claims the whole span of
/// every shape it recognizes, whether or not anything in it is later
/// translated, so a less precise pass can never re-match it.
#[derive(Debug, Default)]
pub struct Scan {
    claims: Vec<SourceRange>,
    candidates: Vec<Candidate>,
    offset: usize,
}

impl Scan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a sub-slice starting at `offset` of the caller's text.
    pub fn with_offset(offset: usize) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn is_claimed(&self, span: SourceRange) -> bool {
        let span = span.shifted(self.offset);
        self.claims.iter().any(|c| c.overlaps(&span))
    }

    /// Claim `span` (slice-relative). Returns false if any part is owned.
    pub fn claim(&mut self, span: SourceRange) -> bool {
        if self.is_claimed(span) {
            return false;
        }
        self.claims.push(span.shifted(self.offset));
        true
    }

    /// Claim `span` and record the candidates found inside it.
    pub fn accept(&mut self, span: SourceRange, candidates: Vec<Candidate>) -> bool {
        if !self.claim(span) {
            return false;
        }
        let offset = self.offset;
        self.candidates.extend(candidates.into_iter().map(|mut c| {
            c.range = c.range.shifted(offset);
            c.replace_range = c.replace_range.shifted(offset);
            c
        }));
        true
    }

    /// Merge a scan of a sub-slice into this one.
    pub fn merge(&mut self, other: Scan) {
        self.claims.extend(other.claims);
        self.candidates.extend(other.candidates);
    }

    pub fn into_candidates(mut self) -> Vec<Candidate> {
        self.candidates.sort_by_key(|c| c.replace_range.start);
        self.candidates
    }
}

/// Apply non-overlapping edits to `content`.
pub fn apply_edits(content: &str, mut edits: Vec<(SourceRange, String)>) -> String {
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    let mut out = content.to_string();
    for (range, replacement) in edits {
        out.replace_range(range.as_range(), &replacement);
    }
    out
}

/// Returns true if `function` is already imported or destructured.
pub fn has_translation_import(content: &str, function: &str) -> bool {
    let f = regex::escape(function);
    let patterns = [
        format!(r"import\s*(?:[\w$]+\s*,\s*)?\{{[^}}]*\b{f}\b[^}}]*\}}\s*from"),
        format!(r"import\s+{f}\s+from"),
        format!(r"(?:const|let|var)\s*\{{[^}}]*\b{f}\b[^}}]*\}}\s*=\s*use\w*\("),
    ];
    patterns
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .any(|re| re.is_match(content))
}

/// Insert `import { <function> } from '<source>';` unless already present.
///
/// The import goes after the last existing import statement, else after a
/// leading `"use client"` directive, else at the very top.
pub fn ensure_import(content: &str, function: &str, source: &str) -> String {
    if has_translation_import(content, function) {
        return content.to_string();
    }
    let statement = format!("import {{ {} }} from '{}';", function, source);

    if let Some(last) = SHARED.import_statement.find_iter(content).last() {
        let mut out = content.to_string();
        out.insert_str(last.end(), &format!("\n{}", statement));
        return out;
    }

    let at = SHARED
        .use_directive
        .find(content)
        .map(|m| m.end())
        .unwrap_or(0);
    let mut out = content.to_string();
    let prefix = if at > 0 && !content[..at].ends_with('\n') {
        "\n"
    } else {
        ""
    };
    out.insert_str(at, &format!("{}{}\n", prefix, statement));
    out
}
