use serde::Serialize;

use super::{Kind, SourceRange};

/// Syntactic shape a candidate was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    /// Markup text (text runs, expression-container literals, template text).
    Text,
    /// A string literal in code position (variables, properties, call arguments).
    String,
    /// The value of a markup attribute.
    AttributeValue,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Text => "text",
            ItemType::String => "string",
            ItemType::AttributeValue => "attribute-value",
        }
    }
}

/// A translatable string found by a parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedItem {
    /// Raw candidate text (trimmed, quotes removed, escapes kept).
    pub text: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub kind: Kind,
    pub range: SourceRange,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    pub extracted_count: usize,
    /// Candidates the validator rejected.
    pub skipped_count: usize,
}

/// Output of `FrameworkHandler::parse`, items in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub items: Vec<ExtractedItem>,
    pub stats: ExtractionStats,
}

impl ExtractionResult {
    pub fn push(&mut self, item: ExtractedItem) {
        self.items.push(item);
        self.stats.extracted_count += 1;
    }

    pub fn skip(&mut self) {
        self.stats.skipped_count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
