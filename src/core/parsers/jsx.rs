use anyhow::{Result, anyhow};
use std::sync::Arc;
use swc_common::{BytePos, FileName, Globals, SourceMap, Span};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::data::SourceRange;

pub struct ParsedJsx {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    /// Position of the first byte of this file inside `source_map`.
    pub start_pos: BytePos,
}

impl ParsedJsx {
    /// Byte range of `span` relative to the parsed source text.
    pub fn range(&self, span: Span) -> SourceRange {
        SourceRange::new(
            (span.lo.0 - self.start_pos.0) as usize,
            (span.hi.0 - self.start_pos.0) as usize,
        )
    }
}

/// Parse JSX/TSX source code string into an AST.
///
/// Accepts a shared SourceMap so a batch can reuse one map across threads.
pub fn parse_jsx_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedJsx> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse tsx source {}: {:?}", file_path, e))?;

        Ok(ParsedJsx {
            module,
            start_pos: source_file.start_pos,
            source_map,
        })
    })
}

#[cfg(test)]
mod tests {
    use crate::core::parsers::jsx::*;
    use swc_common::Spanned;

    #[test]
    fn test_parse_and_map_spans() {
        let code = "const a = <p>Hi</p>;\n".to_string();
        let parsed = parse_jsx_source(code, "a.tsx", Arc::new(SourceMap::default())).unwrap();
        let range = parsed.range(parsed.module.body[0].span());
        assert_eq!(range, SourceRange::new(0, 20));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_jsx_source("<p>{".to_string(), "bad.tsx", Arc::default()).err();
        assert!(err.is_some());
    }
}
