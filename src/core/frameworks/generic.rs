use super::rewrite::{Candidate, Replacement, Scan};
use super::{FrameworkHandler, FrameworkOptions};
use crate::core::data::{ItemType, Kind, SourceRange};
use crate::core::validator::is_code_shaped;

/// Plain-text selections: the whole (trimmed) input is one candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericText;

impl FrameworkHandler for GenericText {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn scan(&self, content: &str, options: &FrameworkOptions) -> Vec<Candidate> {
        let text = content.trim();
        if text.is_empty() || is_code_shaped(text) {
            return Vec::new();
        }
        let start = content.len() - content.trim_start().len();
        let range = SourceRange::new(start, start + text.len());

        let mut scan = Scan::new();
        scan.accept(
            range,
            vec![Candidate {
                text: text.to_string(),
                item_type: ItemType::Text,
                kind: Kind::Text,
                range,
                replace_range: range,
                replacement: Replacement::Call {
                    function: options.function_name.clone(),
                },
            }],
        );
        scan.into_candidates()
    }
}
