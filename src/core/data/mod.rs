//! Core data types shared by parsers, replacers and the key map.
//!
//! ## Module Structure
//!
//! - `extraction`: ExtractedItem, ItemType, ExtractionResult
//! - `kind`: Kind enum and context-based kind inference
//! - `source`: SourceRange and line/column lookups

pub mod extraction;
pub mod kind;
pub mod source;

pub use extraction::{ExtractedItem, ExtractionResult, ExtractionStats, ItemType};
pub use kind::Kind;
pub use source::{LineIndex, SourceRange};
