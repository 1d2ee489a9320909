//! Tag walking for template syntaxes (Vue, Blade).

use regex::Regex;

use crate::core::data::SourceRange;
use crate::core::patterns::SHARED;

/// Elements whose body is never template text.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MarkupNode<'a> {
    /// An opening or self-closing tag; `attributes` spans everything after the name.
    Tag {
        name: &'a str,
        attributes: SourceRange,
    },
    /// Text between two tags, with the innermost open element.
    Text {
        range: SourceRange,
        parent: Option<&'a str>,
    },
}

/// Walk `region` of `content`, yielding tags and the text between them.
///
/// Bodies of raw-text elements are skipped. Closing tags pop the element
/// stack back to their matching opener.
pub(crate) fn walk(content: &str, region: SourceRange) -> Vec<MarkupNode<'_>> {
    let mut nodes = Vec::new();
    let mut stack: Vec<&str> = Vec::new();
    let mut cursor = region.start;
    let haystack = &content[..region.end];

    while let Some(caps) = SHARED.element.captures_at(haystack, cursor) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
            break;
        };
        if whole.start() > cursor {
            nodes.push(MarkupNode::Text {
                range: SourceRange::new(cursor, whole.start()),
                parent: stack.last().copied(),
            });
        }
        cursor = whole.end();

        let name = name.as_str();
        let closing = caps.get(1).is_some_and(|m| !m.is_empty());
        if closing {
            if let Some(pos) = stack.iter().rposition(|open| open.eq_ignore_ascii_case(name)) {
                stack.truncate(pos);
            }
            continue;
        }

        let attributes = caps
            .get(3)
            .map(|m| SourceRange::new(m.start(), m.end()))
            .unwrap_or_default();
        nodes.push(MarkupNode::Tag { name, attributes });

        let self_closing = caps.get(4).is_some_and(|m| !m.is_empty());
        let lower = name.to_ascii_lowercase();
        if RAW_TEXT_ELEMENTS.contains(&lower.as_str()) && !self_closing {
            let close = format!("</{}", lower);
            match haystack[cursor..].to_ascii_lowercase().find(&close) {
                Some(offset) => {
                    let end = haystack[cursor + offset..]
                        .find('>')
                        .map(|p| cursor + offset + p + 1)
                        .unwrap_or(region.end);
                    cursor = end;
                }
                None => cursor = region.end,
            }
            continue;
        }
        if !self_closing && !VOID_ELEMENTS.contains(&lower.as_str()) {
            stack.push(name);
        }
    }

    if cursor < region.end {
        nodes.push(MarkupNode::Text {
            range: SourceRange::new(cursor, region.end),
            parent: stack.last().copied(),
        });
    }
    nodes
}

/// One piece of a text node after splitting on `separators`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece {
    /// Trimmed prose between separators. Never empty.
    Text(SourceRange),
    Separator(SourceRange),
}

pub(crate) fn split_text(content: &str, range: SourceRange, separators: &Regex) -> Vec<Piece> {
    let text = &content[range.as_range()];
    let mut pieces = Vec::new();
    let mut last = 0;

    let push_text = |from: usize, to: usize, pieces: &mut Vec<Piece>| {
        let raw = &text[from..to];
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let start = range.start + from + (raw.len() - raw.trim_start().len());
        pieces.push(Piece::Text(SourceRange::new(start, start + trimmed.len())));
    };

    for m in separators.find_iter(text) {
        push_text(last, m.start(), &mut pieces);
        pieces.push(Piece::Separator(SourceRange::new(
            range.start + m.start(),
            range.start + m.end(),
        )));
        last = m.end();
    }
    push_text(last, text.len(), &mut pieces);
    pieces
}
