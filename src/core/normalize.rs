//! Syntax-tree normalizer.
//!
//! Rewriting a text run such as `Total items (` ahead of an expression
//! leaves the markup as `{t('key')}{count})`. This pass finds that shape in
//! the parsed tree and rebuilds it as `{t('key')} ({count})`.

use std::{collections::HashSet, fs, path::Path, sync::Arc};

use anyhow::{Context, Result};
use swc_common::{SourceMap, Spanned};
use swc_ecma_ast::{
    Callee, Expr, JSXElement, JSXElementChild, JSXExpr, JSXExprContainer, JSXFragment, Lit,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::data::SourceRange;
use crate::core::frameworks::rewrite::apply_edits;
use crate::core::parsers::jsx::{ParsedJsx, parse_jsx_source};

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub function_name: String,
    /// Only repair calls whose key is in this set.
    pub keys: Option<HashSet<String>>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            function_name: "t".to_string(),
            keys: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOutcome {
    pub content: String,
    pub fix_count: usize,
}

/// Repair split parentheticals in `code`.
///
/// Fails only if `code` does not parse as TSX.
pub fn normalize_source(
    code: &str,
    file_path: &str,
    options: &NormalizeOptions,
) -> Result<NormalizeOutcome> {
    let parsed = parse_jsx_source(code.to_string(), file_path, Arc::new(SourceMap::default()))?;

    let mut collector = SplitParenCollector {
        parsed: &parsed,
        source: code,
        options,
        edits: Vec::new(),
    };
    parsed.module.visit_with(&mut collector);

    let fix_count = collector.edits.len();
    let content = if fix_count == 0 {
        code.to_string()
    } else {
        apply_edits(code, collector.edits)
    };
    Ok(NormalizeOutcome { content, fix_count })
}

/// Normalize a file in place. The file is written only if something changed
/// and `write` is set.
pub fn normalize_file(path: &Path, options: &NormalizeOptions, write: bool) -> Result<NormalizeOutcome> {
    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {}", path.display()))?;
    let outcome = normalize_source(&code, &path.to_string_lossy(), options)?;
    if write && outcome.fix_count > 0 {
        fs::write(path, &outcome.content)
            .with_context(|| format!("Failed to write source file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), fixes = outcome.fix_count, "normalized");
    }
    Ok(outcome)
}

struct SplitParenCollector<'a> {
    parsed: &'a ParsedJsx,
    source: &'a str,
    options: &'a NormalizeOptions,
    edits: Vec<(SourceRange, String)>,
}

impl SplitParenCollector<'_> {
    fn check_children(&mut self, children: &[JSXElementChild]) {
        let mut i = 0;
        while i < children.len() {
            let Some(key) = self.translated_key(&children[i]) else {
                i += 1;
                continue;
            };
            if let Some(keys) = &self.options.keys
                && !keys.contains(key)
            {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while let Some(JSXElementChild::JSXText(text)) = children.get(j)
                && text.value.trim().is_empty()
            {
                j += 1;
            }

            let (Some(JSXElementChild::JSXExprContainer(expr)), Some(JSXElementChild::JSXText(tail))) =
                (children.get(j), children.get(j + 1))
            else {
                i += 1;
                continue;
            };
            if matches!(expr.expr, JSXExpr::JSXEmptyExpr(_)) {
                i += 1;
                continue;
            }

            let tail_range = self.parsed.range(tail.span);
            let tail_text = &self.source[tail_range.as_range()];
            if !tail_text.trim_start().starts_with(')') {
                i += 1;
                continue;
            }
            let close = tail_text.find(')').map(|p| tail_range.start + p + 1).unwrap_or(tail_range.start);

            let start = self.parsed.range(children[i].span()).end;
            let expr_source = &self.source[self.parsed.range(expr.span).as_range()];
            let range = SourceRange::new(start, close);
            if !self.edits.iter().any(|(r, _)| r.overlaps(&range)) {
                self.edits.push((range, format!(" ({})", expr_source)));
            }
            i = j + 2;
        }
    }

    /// Key of a `{t('key')}` container.
    fn translated_key<'c>(&self, child: &'c JSXElementChild) -> Option<&'c str> {
        let JSXElementChild::JSXExprContainer(JSXExprContainer {
            expr: JSXExpr::Expr(expr),
            ..
        }) = child
        else {
            return None;
        };
        let Expr::Call(call) = &**expr else {
            return None;
        };
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };
        let Expr::Ident(ident) = &**callee else {
            return None;
        };
        if &*ident.sym != self.options.function_name.as_str() {
            return None;
        }
        match &*call.args.first()?.expr {
            Expr::Lit(Lit::Str(s)) => s.value.as_str(),
            _ => None,
        }
    }
}

impl Visit for SplitParenCollector<'_> {
    fn visit_jsx_element(&mut self, node: &JSXElement) {
        self.check_children(&node.children);
        node.visit_children_with(self);
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        self.check_children(&node.children);
        node.visit_children_with(self);
    }
}
