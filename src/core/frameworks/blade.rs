//! Blade templates.
//!
//! Echoes (`{{ }}`, `{!! !!}`) and comments are opaque. Prose in template
//! text becomes `{{ __('key') }}`; strings in PHP argument position
//! (`@section('title', '...')`, `'label' => '...'`) become `__('key')`.

use super::markup::{self, MarkupNode, Piece};
use super::rewrite::{Candidate, Replacement, Scan};
use super::{FrameworkHandler, FrameworkOptions};
use crate::core::data::{ItemType, Kind, SourceRange};
use crate::core::patterns::{BLADE, VUE, first_group};
use crate::utils::contains_alphabetic;

const FUNCTION: &str = "__";

#[derive(Debug, Clone, Copy, Default)]
pub struct Blade;

impl FrameworkHandler for Blade {
    fn name(&self) -> &'static str {
        "blade"
    }

    fn scan(&self, content: &str, options: &FrameworkOptions) -> Vec<Candidate> {
        let mut scan = Scan::new();
        let call = || Replacement::Call {
            function: FUNCTION.to_string(),
        };

        for m in BLADE.echo.find_iter(content) {
            scan.claim(SourceRange::new(m.start(), m.end()));
        }

        for caps in BLADE.section_directive.captures_iter(content) {
            let (Some(whole), Some(section)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            if let Some(m) = first_group(&caps, 3..5) {
                let candidate = literal(m, Kind::from_identifier(section.as_str()), call());
                scan.accept(SourceRange::new(whole.start(), whole.end()), vec![candidate]);
            }
        }

        for caps in BLADE.array_pair.captures_iter(content) {
            let (Some(whole), Some(key)) = (caps.get(0), first_group(&caps, 1..3)) else {
                continue;
            };
            if let Some(m) = first_group(&caps, 3..5) {
                let candidate = literal(m, Kind::from_identifier(key.as_str()), call());
                scan.accept(SourceRange::new(whole.start(), whole.end()), vec![candidate]);
            }
        }

        for m in BLADE.directive.find_iter(content) {
            scan.claim(SourceRange::new(m.start(), m.end()));
        }

        for node in markup::walk(content, SourceRange::new(0, content.len())) {
            match node {
                MarkupNode::Tag { attributes, .. } => {
                    scan_attributes(content, attributes, options, &mut scan)
                }
                MarkupNode::Text { range, parent } => scan_text(content, range, parent, &mut scan),
            }
        }

        scan.into_candidates()
    }
}

fn literal(m: regex::Match<'_>, kind: Kind, replacement: Replacement) -> Candidate {
    Candidate {
        text: m.as_str().trim().to_string(),
        item_type: ItemType::String,
        kind,
        range: SourceRange::new(m.start(), m.end()),
        replace_range: SourceRange::new(m.start() - 1, m.end() + 1),
        replacement,
    }
}

fn scan_attributes(
    content: &str,
    attributes: SourceRange,
    options: &FrameworkOptions,
    scan: &mut Scan,
) {
    let area = &content[attributes.as_range()];
    for caps in VUE.static_attribute.captures_iter(area) {
        let (Some(whole), Some(name), Some(value)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if !options.is_checked_attribute(name.as_str()) {
            continue;
        }
        let range = SourceRange::new(
            attributes.start + value.start(),
            attributes.start + value.end(),
        );
        scan.accept(
            SourceRange::new(attributes.start + whole.start(), attributes.start + whole.end()),
            vec![Candidate {
                text: value.as_str().trim().to_string(),
                item_type: ItemType::AttributeValue,
                kind: Kind::from_attribute(name.as_str()),
                range,
                replace_range: range,
                replacement: Replacement::Interpolation {
                    function: FUNCTION.to_string(),
                },
            }],
        );
    }
}

fn scan_text(content: &str, range: SourceRange, parent: Option<&str>, scan: &mut Scan) {
    let kind = parent.map(Kind::from_tag).unwrap_or(Kind::Text);
    for piece in markup::split_text(content, range, &BLADE.text_separator) {
        let Piece::Text(span) = piece else {
            continue;
        };
        let text = &content[span.as_range()];
        if !contains_alphabetic(text) {
            continue;
        }
        scan.accept(
            span,
            vec![Candidate {
                text: text.to_string(),
                item_type: ItemType::Text,
                kind,
                range: span,
                replace_range: span,
                replacement: Replacement::Interpolation {
                    function: FUNCTION.to_string(),
                },
            }],
        );
    }
}
