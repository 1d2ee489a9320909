//! JSX-like markup embedded in JS/TS modules.
//!
//! Passes, most specific first:
//!
//! 1. attribute values (`placeholder="..."`, `title={"..."}`)
//! 2. object-property values with descriptive names (`title: "..."`)
//! 3. descriptive variable initializers (`const errorMessage = "..."`)
//! 4. notification call arguments (`toast.success("...")`)
//! 5. markup text runs (`<p>Hello</p>`)
//! 6. expression-container literals (`{"Click me"}`)
//! 7. attribute expressions with conditionals (`title={a ? "x" : "y"}`)
//! 8. return-statement literals (`return "..."`)

use regex::{Captures, Match};

use super::rewrite::{Candidate, Replacement, Scan, ensure_import};
use super::{FrameworkHandler, FrameworkOptions};
use crate::core::data::{ItemType, Kind, SourceRange};
use crate::core::patterns::{JSX, SHARED, first_group};
use crate::utils::contains_alphabetic;

#[derive(Debug, Clone, Copy, Default)]
pub struct Jsx;

impl FrameworkHandler for Jsx {
    fn name(&self) -> &'static str {
        "jsx"
    }

    fn scan(&self, content: &str, options: &FrameworkOptions) -> Vec<Candidate> {
        let mut scan = Scan::new();
        scan_script(content, options, &mut scan);
        scan.into_candidates()
    }

    fn finish(&self, content: String, options: &FrameworkOptions) -> String {
        ensure_import(&content, &options.function_name, &options.import_source)
    }
}

/// Run every JSX pass over `content`, claiming into `scan`.
///
/// Ranges are relative to `content`; use `Scan::with_offset` when `content`
/// is a slice of a larger buffer.
pub(crate) fn scan_script(content: &str, options: &FrameworkOptions, scan: &mut Scan) {
    let call = || Replacement::Call {
        function: options.function_name.clone(),
    };
    let markup = || Replacement::Markup {
        function: options.function_name.clone(),
    };

    let tags = TagIndex::new(content);

    // 1. attribute values
    for caps in JSX.attribute.captures_iter(content) {
        let Some(name_match) = caps.get(1) else {
            continue;
        };
        if !tags.inside_tag(name_match.start()) {
            continue;
        }
        let name = name_match.as_str();
        let mut candidates = Vec::new();
        if options.is_checked_attribute(name) {
            let kind = Kind::from_attribute(name);
            if let Some(m) = first_group(&caps, 2..4) {
                candidates.push(literal(m, kind, ItemType::AttributeValue, markup()));
            } else if let Some(m) = first_group(&caps, 4..7) {
                candidates.push(literal(m, kind, ItemType::AttributeValue, call()));
            }
        }
        scan.accept(whole(&caps), candidates);
    }

    // 2. object-property values
    for caps in JSX.object_property.captures_iter(content) {
        let name = &caps[1];
        if !is_descriptive(name) && !options.is_checked_attribute(name) {
            continue;
        }
        if let Some(m) = first_group(&caps, 2..5) {
            let candidate = literal(m, Kind::from_identifier(name), ItemType::String, call());
            scan.accept(whole(&caps), vec![candidate]);
        }
    }

    // 3. descriptive variable initializers
    for caps in JSX.variable.captures_iter(content) {
        let name = &caps[1];
        if !is_descriptive(name) {
            continue;
        }
        if let Some(m) = first_group(&caps, 2..5) {
            let candidate = literal(m, Kind::from_identifier(name), ItemType::String, call());
            scan.accept(whole(&caps), vec![candidate]);
        }
    }

    // 4. notification calls
    for caps in JSX.notification_call.captures_iter(content) {
        if let Some(m) = first_group(&caps, 3..6) {
            let candidate = literal(m, Kind::Toast, ItemType::String, call());
            scan.accept(whole(&caps), vec![candidate]);
        }
    }

    // 5. markup text runs
    for caps in JSX.text_run.captures_iter(content) {
        let (Some(open), Some(run)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let opens_text = match open.as_str() {
            ">" => tags.closes_tag_at(open.start()),
            _ => tags.enclosing(open.end()).is_some(),
        };
        let closes_text = caps
            .get(3)
            .is_some_and(|close| close.as_str() == "{" || tags.opens_tag_at(close.start()));
        if !opens_text || !closes_text {
            continue;
        }
        let raw = run.as_str();
        let text = raw.trim();
        if !contains_alphabetic(text) {
            continue;
        }
        let start = run.start() + (raw.len() - raw.trim_start().len());
        let range = SourceRange::new(start, start + text.len());
        let kind = tags
            .enclosing(open.end())
            .map(Kind::from_tag)
            .unwrap_or(Kind::Text);
        scan.accept(
            range,
            vec![Candidate {
                text: text.to_string(),
                item_type: ItemType::Text,
                kind,
                range,
                replace_range: range,
                replacement: markup(),
            }],
        );
    }

    // 6. expression-container literals
    for caps in JSX.expression_string.captures_iter(content) {
        if let Some(m) = first_group(&caps, 1..4) {
            let kind = tags
                .enclosing(m.start())
                .map(Kind::from_tag)
                .unwrap_or(Kind::Text);
            let candidate = literal(m, kind, ItemType::Text, call());
            scan.accept(whole(&caps), vec![candidate]);
        }
    }

    // 7. attribute expressions with conditionals
    for caps in JSX.attribute_conditional.captures_iter(content) {
        let (Some(name_match), Some(expr)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if !tags.inside_tag(name_match.start()) {
            continue;
        }
        let name = name_match.as_str();
        let mut candidates = Vec::new();
        if options.is_checked_attribute(name) {
            let kind = Kind::from_attribute(name);
            let branches_start = expr.as_str().find('?').unwrap_or(0);
            for lit in SHARED.literal.captures_iter(expr.as_str()) {
                if let Some(m) = first_group(&lit, 1..4)
                    && m.start() > branches_start
                {
                    let mut candidate = literal(m, kind, ItemType::AttributeValue, call());
                    candidate.range = candidate.range.shifted(expr.start());
                    candidate.replace_range = candidate.replace_range.shifted(expr.start());
                    candidates.push(candidate);
                }
            }
        }
        scan.accept(whole(&caps), candidates);
    }

    // 8. return-statement literals
    for caps in JSX.return_literal.captures_iter(content) {
        if let Some(m) = first_group(&caps, 1..4) {
            let candidate = literal(m, Kind::Text, ItemType::String, call());
            scan.accept(SourceRange::new(m.start() - 1, m.end() + 1), vec![candidate]);
        }
    }
}

fn whole(caps: &Captures<'_>) -> SourceRange {
    caps.get(0)
        .map(|m| SourceRange::new(m.start(), m.end()))
        .unwrap_or_default()
}

/// Candidate for a quoted literal whose content is `m`.
fn literal(m: Match<'_>, kind: Kind, item_type: ItemType, replacement: Replacement) -> Candidate {
    Candidate {
        text: m.as_str().trim().to_string(),
        item_type,
        kind,
        range: SourceRange::new(m.start(), m.end()),
        replace_range: SourceRange::new(m.start() - 1, m.end() + 1),
        replacement,
    }
}

fn is_descriptive(name: &str) -> bool {
    SHARED.descriptive_name.is_match(name)
}

/// A markup tag as JSX sees it: `<name attr="v" attr={expr} {...rest}>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JsxTag<'a> {
    name: &'a str,
    /// Offset of `<`.
    start: usize,
    /// Offset of the final `>`.
    end: usize,
    closing: bool,
    self_closing: bool,
}

/// Every well-formed tag of a buffer, in source order.
///
/// Comparisons that only look like tags (`a<b && c>d`) fail to parse as an
/// attribute list and are left out.
pub(crate) struct TagIndex<'a> {
    tags: Vec<JsxTag<'a>>,
}

impl<'a> TagIndex<'a> {
    pub(crate) fn new(content: &'a str) -> Self {
        let mut tags = Vec::new();
        let mut next = 0;
        for (lt, _) in content.match_indices('<') {
            if lt < next {
                continue;
            }
            if let Some(tag) = parse_tag(content, lt) {
                next = tag.end + 1;
                tags.push(tag);
            }
        }
        Self { tags }
    }

    fn closes_tag_at(&self, pos: usize) -> bool {
        self.tags.iter().any(|t| t.end == pos)
    }

    fn opens_tag_at(&self, pos: usize) -> bool {
        self.tags.iter().any(|t| t.start == pos)
    }

    fn inside_tag(&self, pos: usize) -> bool {
        self.tags.iter().any(|t| t.start < pos && pos < t.end)
    }

    /// Innermost element still open at `pos`.
    pub(crate) fn enclosing(&self, pos: usize) -> Option<&'a str> {
        let mut stack: Vec<&str> = Vec::new();
        for tag in self.tags.iter().take_while(|t| t.end < pos) {
            if tag.closing {
                if let Some(i) = stack.iter().rposition(|open| *open == tag.name) {
                    stack.truncate(i);
                }
            } else if !tag.self_closing {
                stack.push(tag.name);
            }
        }
        stack.last().copied()
    }
}

/// Innermost open tag before `pos`.
pub(crate) fn enclosing_tag(content: &str, pos: usize) -> Option<&str> {
    TagIndex::new(content).enclosing(pos)
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'-' | b'.' | b':')
}

fn parse_tag(content: &str, lt: usize) -> Option<JsxTag<'_>> {
    let bytes = content.as_bytes();
    let mut i = lt + 1;
    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }
    let name_start = i;
    // Fragments: `<>` and `</>`
    if bytes.get(i) == Some(&b'>') {
        return Some(JsxTag {
            name: "",
            start: lt,
            end: i,
            closing,
            self_closing: false,
        });
    }
    if !bytes.get(i)?.is_ascii_alphabetic() {
        return None;
    }
    while bytes.get(i).is_some_and(|b| is_name_byte(*b)) {
        i += 1;
    }
    let name = &content[name_start..i];

    loop {
        let before = i;
        while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
            i += 1;
        }
        match *bytes.get(i)? {
            b'>' => {
                return Some(JsxTag {
                    name,
                    start: lt,
                    end: i,
                    closing,
                    self_closing: false,
                });
            }
            b'/' if !closing && bytes.get(i + 1) == Some(&b'>') => {
                return Some(JsxTag {
                    name,
                    start: lt,
                    end: i + 1,
                    closing,
                    self_closing: true,
                });
            }
            b'{' if !closing && i > before => i = skip_braces(bytes, i)?,
            b if !closing && i > before && (b.is_ascii_alphabetic() || b == b'_') => {
                while bytes.get(i).is_some_and(|b| is_name_byte(*b)) {
                    i += 1;
                }
                if bytes.get(i) == Some(&b'=') {
                    i += 1;
                    i = match *bytes.get(i)? {
                        quote @ (b'"' | b'\'') => skip_quoted(bytes, i, quote)?,
                        b'{' => skip_braces(bytes, i)?,
                        _ => return None,
                    };
                }
            }
            _ => return None,
        }
    }
}

/// Offset just past the quote closing the one at `open`.
fn skip_quoted(bytes: &[u8], open: usize, quote: u8) -> Option<usize> {
    let mut i = open + 1;
    while *bytes.get(i)? != quote {
        if bytes[i] == b'\\' {
            i += 1;
        }
        i += 1;
    }
    Some(i + 1)
}

/// Offset just past the `}` matching the `{` at `open`.
fn skip_braces(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    loop {
        match *bytes.get(i)? {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            quote @ (b'"' | b'\'' | b'`') => {
                i = skip_quoted(bytes, i, quote)?;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
}
