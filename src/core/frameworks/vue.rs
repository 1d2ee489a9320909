//! Vue single-file components.
//!
//! Template text becomes `{{ $t('key') }}`, static attributes become
//! `:name="$t('key')"`, and `<script>` blocks go through the JSX passes with
//! the plain translation function. A buffer without a `<template>` root is
//! treated as a template fragment in its entirety.

use regex::Regex;

use super::jsx::scan_script;
use super::markup::{self, MarkupNode, Piece};
use super::rewrite::{Candidate, Replacement, Scan, ensure_import};
use super::{FrameworkHandler, FrameworkOptions};
use crate::core::data::{ItemType, Kind, SourceRange};
use crate::core::patterns::{VUE, first_group};
use crate::utils::contains_alphabetic;

/// Template-side translation function.
const TEMPLATE_FUNCTION: &str = "$t";

#[derive(Debug, Clone, Copy, Default)]
pub struct Vue;

impl FrameworkHandler for Vue {
    fn name(&self) -> &'static str {
        "vue"
    }

    fn scan(&self, content: &str, options: &FrameworkOptions) -> Vec<Candidate> {
        let mut scan = Scan::new();

        for caps in VUE.script_block.captures_iter(content) {
            let (Some(block), Some(body)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            scan.claim(SourceRange::new(block.start(), block.end()));
            let mut script = Scan::with_offset(body.start());
            scan_script(body.as_str(), options, &mut script);
            scan.merge(script);
        }

        let region = template_region(content);
        for node in markup::walk(content, region) {
            match node {
                MarkupNode::Tag { attributes, .. } => {
                    scan_attributes(content, attributes, options, &mut scan)
                }
                MarkupNode::Text { range, parent } => scan_text(content, range, parent, &mut scan),
            }
        }

        scan.into_candidates()
    }

    fn finish(&self, content: String, options: &FrameworkOptions) -> String {
        let Some(body) = VUE
            .script_block
            .captures(&content)
            .and_then(|caps| caps.get(1))
            .map(|m| SourceRange::new(m.start(), m.end()))
        else {
            return content;
        };
        let script = &content[body.as_range()];
        if !uses_function(script, &options.function_name) {
            return content;
        }

        let lead = script.len() - script.trim_start_matches(['\r', '\n']).len();
        let updated = ensure_import(&script[lead..], &options.function_name, &options.import_source);
        let mut out = content.clone();
        out.replace_range(body.start + lead..body.end, &updated);
        out
    }
}

/// Span between the first `<template>` and the last `</template>`.
fn template_region(content: &str) -> SourceRange {
    let Some(open) = VUE.template_open.find(content) else {
        return SourceRange::new(0, content.len());
    };
    let end = VUE
        .template_close
        .find_iter(&content[open.end()..])
        .last()
        .map(|m| open.end() + m.start())
        .unwrap_or(content.len());
    SourceRange::new(open.end(), end)
}

fn scan_attributes(
    content: &str,
    attributes: SourceRange,
    options: &FrameworkOptions,
    scan: &mut Scan,
) {
    let area = &content[attributes.as_range()];
    let at = |start: usize, end: usize| SourceRange::new(attributes.start + start, attributes.start + end);

    for caps in VUE.bound_attribute.captures_iter(area) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let mut candidates = Vec::new();
        if options.is_checked_attribute(name.as_str())
            && let Some(m) = first_group(&caps, 2..4)
        {
            candidates.push(Candidate {
                text: m.as_str().trim().to_string(),
                item_type: ItemType::AttributeValue,
                kind: Kind::from_attribute(name.as_str()),
                range: at(m.start(), m.end()),
                replace_range: at(m.start() - 1, m.end() + 1),
                replacement: Replacement::Call {
                    function: TEMPLATE_FUNCTION.to_string(),
                },
            });
        }
        scan.accept(at(whole.start(), whole.end()), candidates);
    }

    for caps in VUE.static_attribute.captures_iter(area) {
        let (Some(whole), Some(name), Some(value)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let mut candidates = Vec::new();
        if options.is_checked_attribute(name.as_str()) {
            candidates.push(Candidate {
                text: value.as_str().trim().to_string(),
                item_type: ItemType::AttributeValue,
                kind: Kind::from_attribute(name.as_str()),
                range: at(value.start(), value.end()),
                replace_range: at(name.start(), whole.end()),
                replacement: Replacement::BoundAttribute {
                    name: name.as_str().to_string(),
                    function: TEMPLATE_FUNCTION.to_string(),
                },
            });
        }
        scan.accept(at(whole.start(), whole.end()), candidates);
    }
}

fn scan_text(content: &str, range: SourceRange, parent: Option<&str>, scan: &mut Scan) {
    let kind = parent.map(Kind::from_tag).unwrap_or(Kind::Text);
    let interpolation = || Replacement::Interpolation {
        function: TEMPLATE_FUNCTION.to_string(),
    };

    for piece in markup::split_text(content, range, &VUE.text_separator) {
        match piece {
            Piece::Separator(span) => {
                let mut candidates = Vec::new();
                if let Some(caps) = VUE.mustache_literal.captures(&content[span.as_range()])
                    && caps.get(0).is_some_and(|m| m.len() == span.len())
                    && let Some(m) = first_group(&caps, 1..3)
                {
                    candidates.push(Candidate {
                        text: m.as_str().trim().to_string(),
                        item_type: ItemType::Text,
                        kind,
                        range: SourceRange::new(span.start + m.start(), span.start + m.end()),
                        replace_range: span,
                        replacement: interpolation(),
                    });
                }
                scan.accept(span, candidates);
            }
            Piece::Text(span) => {
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
                        replacement: interpolation(),
                    }],
                );
            }
        }
    }
}

fn uses_function(script: &str, function: &str) -> bool {
    Regex::new(&format!(r"(?:^|[^\w$.]){}\(", regex::escape(function)))
        .map(|re| re.is_match(script))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use crate::core::frameworks::vue::*;
    use crate::core::keymap::KeyMap;
    use pretty_assertions::assert_eq;

    const SFC: &str = r#"<template>
  <div class="page">
    <h1>Welcome back</h1>
    <input placeholder="Search files" :title="'Open menu'" />
    <p>Signed in as {{ user.name }}</p>
    <span>{{ 'Loading' }}</span>
  </div>
</template>

<script setup>
const pageTitle = "Dashboard";
</script>
"#;

    #[test]
    fn test_parse_sfc() {
        let result = Vue.parse(SFC, &FrameworkOptions::default());
        let found: Vec<(&str, Kind, ItemType)> = result
            .items
            .iter()
            .map(|i| (i.text.as_str(), i.kind, i.item_type))
            .collect();
        assert_eq!(
            found,
            vec![
                ("Welcome back", Kind::Title, ItemType::Text),
                ("Search files", Kind::Placeholder, ItemType::AttributeValue),
                ("Open menu", Kind::Title, ItemType::AttributeValue),
                ("Signed in as", Kind::Text, ItemType::Text),
                ("Loading", Kind::Text, ItemType::Text),
                ("Dashboard", Kind::Title, ItemType::String),
            ]
        );
    }

    #[test]
    fn test_replace_sfc() {
        let mut map = KeyMap::new();
        map.insert("home", Kind::Title, "Welcome back", "home.title.welcome_back");
        map.insert("home", Kind::Placeholder, "Search files", "home.placeholder.search_files");
        map.insert("home", Kind::Title, "Open menu", "home.title.open_menu");
        map.insert("home", Kind::Text, "Signed in as", "home.text.signed_in_as");
        map.insert("home", Kind::Text, "Loading", "home.text.loading");
        map.insert("home", Kind::Title, "Dashboard", "home.title.dashboard");

        let options = FrameworkOptions::default();
        let outcome = Vue.replace(SFC, &map, "home", &options);
        assert_eq!(outcome.change_count, 6);
        assert_eq!(
            outcome.content,
            r#"<template>
  <div class="page">
    <h1>{{ $t('home.title.welcome_back') }}</h1>
    <input :placeholder="$t('home.placeholder.search_files')" :title="$t('home.title.open_menu')" />
    <p>{{ $t('home.text.signed_in_as') }} {{ user.name }}</p>
    <span>{{ $t('home.text.loading') }}</span>
  </div>
</template>

<script setup>
import { t } from 'i18next';
const pageTitle = t('home.title.dashboard');
</script>
"#
        );

        let again = Vue.replace(&outcome.content, &map, "home", &options);
        assert_eq!(again.change_count, 0);
        assert_eq!(again.content, outcome.content);
    }

    #[test]
    fn test_fragment_without_template_root() {
        let result = Vue.parse(
            "<p>Hello there</p>\n<button title=\"Close dialog\">{{ '---' }}</button>",
            &FrameworkOptions::default(),
        );
        let texts: Vec<&str> = result.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello there", "Close dialog"]);
        assert_eq!(result.stats.skipped_count, 1);
    }

    #[test]
    fn test_template_only_needs_no_import() {
        let mut map = KeyMap::new();
        map.insert("app", Kind::Text, "Hello there", "app.text.hello_there");
        let outcome = Vue.replace(
            "<template><p>Hello there</p></template>",
            &map,
            "app",
            &FrameworkOptions::default(),
        );
        assert_eq!(
            outcome.content,
            "<template><p>{{ $t('app.text.hello_there') }}</p></template>"
        );
    }
}
