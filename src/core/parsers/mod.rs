//! Source parsers backed by swc.
//!
//! - `jsx`: JSX/TSX source file parser used by the syntax-tree normalizer

pub mod jsx;
