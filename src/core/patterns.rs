//! Pattern library shared by every framework variant.
//!
//! All recognizers are compiled once on first use and never mutated. Each
//! syntax family gets its own table; the `SHARED` table holds the markers
//! every family needs (interpolations, translated calls, imports).
//!
//! Quoted literals are captured without their quotes. A literal group always
//! sits directly between its two quote bytes, so `m.start() - 1 .. m.end() + 1`
//! is the quoted span.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Match, Regex};

const DQ: &str = r#""((?:[^"\\\n]|\\.)*)""#;
const SQ: &str = r#"'((?:[^'\\\n]|\\.)*)'"#;
const BT: &str = r#"`((?:[^`\\$]|\\.)*)`"#;

fn literal3() -> String {
    format!("(?:{DQ}|{SQ}|{BT})")
}

fn compile(pattern: &str) -> Regex {
    // Patterns are compile-time constants covered by the tests below.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern}: {e}"))
}

/// Returns the first participating group in `groups`.
pub fn first_group<'h>(caps: &Captures<'h>, groups: Range<usize>) -> Option<Match<'h>> {
    groups.into_iter().find_map(|i| caps.get(i))
}

/// Markers used by every syntax family.
pub struct SharedPatterns {
    /// A translation call: `t(`, `$t(`, `i18n.t(`, `__(`, `trans(`, `@lang(`.
    pub translated_call: Regex,
    /// `${...}`, `{{ ... }}`, `{!! ... !!}` and bare `{name}` placeholders.
    pub interpolation: Regex,
    /// A complete ES import statement (may span lines).
    pub import_statement: Regex,
    pub require_call: Regex,
    pub export_statement: Regex,
    /// A leading `"use client"` / `"use server"` directive.
    pub use_directive: Regex,
    /// Quote-aware markup tag: closing slash, name, attribute area, self-closing slash.
    pub element: Regex,
    /// Identifiers whose initializer or value is likely user-facing prose.
    pub descriptive_name: Regex,
    /// Any single quoted literal.
    pub literal: Regex,
}

pub static SHARED: LazyLock<SharedPatterns> = LazyLock::new(|| SharedPatterns {
    translated_call: compile(
        r"(?:^|[^\w$.])(?:\$?t|i18n\.t|\$i18n\.t|__|trans|trans_choice|@lang|@choice)\s*\(",
    ),
    interpolation: compile(r"(?s)\$\{[^}]*\}|\{\{.*?\}\}|\{!!.*?!!\}|\{[A-Za-z_$][\w$.]*\}"),
    import_statement: compile(
        r#"(?m)^[ \t]*import\s(?:[^;'"]*?\sfrom\s*)?['"][^'"\n]+['"][ \t]*;?[ \t]*$"#,
    ),
    require_call: compile(r#"\brequire\s*\(\s*['"]"#),
    export_statement: compile(
        r"^\s*export\s+(?:default\b|const\b|let\b|function\b|class\b|type\b|interface\b|\{|\*)",
    ),
    use_directive: compile(r#"\A\s*['"]use (?:client|server)['"][ \t]*;?[ \t]*\n?"#),
    element: compile(r#"<(/?)([A-Za-z][\w.:-]*)((?:[^<>"']|"[^"]*"|'[^']*')*?)(/?)>"#),
    descriptive_name: compile(
        r"(?i)message|msg|error|warning|success|notice|alert|confirm|prompt|title|heading|header|label|text|description|desc|subtitle|caption|hint|help|tooltip|placeholder|toast|notification|summary",
    ),
    literal: compile(&literal3()),
});

/// JSX-like markup and the script around it.
pub struct JsxPatterns {
    /// `name="v"`, `name='v'` (groups 2, 3) or `name={"v"}` (groups 4..=6).
    pub attribute: Regex,
    /// `name: "v"` inside object literals.
    pub object_property: Regex,
    /// `const name = "v"` with optional type annotation.
    pub variable: Regex,
    /// `toast("v")`, `toast.success("v")`, `message.error("v")`, `alert("v")`.
    pub notification_call: Regex,
    /// Text between `>`/`}` and `<`/`{`.
    pub text_run: Regex,
    /// `{"v"}` expression container holding only a literal.
    pub expression_string: Regex,
    /// `name={cond ? "a" : "b"}`.
    pub attribute_conditional: Regex,
    /// `return "v"`.
    pub return_literal: Regex,
}

pub static JSX: LazyLock<JsxPatterns> = LazyLock::new(|| {
    let lit = literal3();
    JsxPatterns {
        attribute: compile(&format!(
            r#"(?:^|\s)([A-Za-z][\w:-]*)=(?:"([^"\n]*)"|'([^'\n]*)'|\{{\s*{lit}\s*\}})"#
        )),
        object_property: compile(&format!(r"(?:^|[{{,\s])([A-Za-z_$][\w$]*)\s*:\s*{lit}")),
        variable: compile(&format!(
            r"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::\s*[\w$<>\[\]|. ]+?)?\s*=\s*{lit}"
        )),
        notification_call: compile(&format!(
            r"\b(toast|notify|notification|message|snackbar|enqueueSnackbar|alert)(?:\.(\w+))?\s*\(\s*{lit}"
        )),
        text_run: compile(r"([>}])([^<>{}=;`]+)([<{])"),
        expression_string: compile(&format!(r"\{{\s*{lit}\s*\}}")),
        attribute_conditional: compile(r"(?:^|\s)([A-Za-z][\w:-]*)=\{([^{}]*\?[^{}]*:[^{}]*)\}"),
        return_literal: compile(&format!(r"\breturn\s+{lit}\s*(?:;|\n|\}})")),
    }
});

/// Vue single-file-component templates.
pub struct VuePatterns {
    pub template_open: Regex,
    pub template_close: Regex,
    /// `<script ...>` body in group 1.
    pub script_block: Regex,
    /// `:name="'v'"` / `v-bind:name="'v'"`.
    pub bound_attribute: Regex,
    /// `name="v"` static attribute.
    pub static_attribute: Regex,
    /// `{{ 'v' }}` interpolation holding only a literal.
    pub mustache_literal: Regex,
    /// Mustaches and comments, which split template text.
    pub text_separator: Regex,
}

pub static VUE: LazyLock<VuePatterns> = LazyLock::new(|| VuePatterns {
    template_open: compile(r"<template(?:\s[^>]*)?>"),
    template_close: compile(r"</template\s*>"),
    script_block: compile(r"(?s)<script(?:\s[^>]*)?>(.*?)</script\s*>"),
    bound_attribute: compile(
        r#"(?:^|\s)(?::|v-bind:)([A-Za-z][\w-]*)="\s*(?:'((?:[^'\\"\n]|\\.)*)'|`((?:[^`\\$"]|\\.)*)`)\s*""#,
    ),
    static_attribute: compile(r#"(?:^|\s)([A-Za-z][\w-]*)="([^"\n]*)""#),
    mustache_literal: compile(&format!(r"\{{\{{\s*(?:{SQ}|{DQ})\s*\}}\}}")),
    text_separator: compile(r"(?s)\{\{.*?\}\}|<!--.*?-->"),
});

/// Blade templates.
pub struct BladePatterns {
    /// Echoes and comments: `{{ }}`, `{!! !!}`, `{{-- --}}`.
    pub echo: Regex,
    /// `@section('name', 'v')` / `@yield('name', 'v')`.
    pub section_directive: Regex,
    /// Any `@directive` or `@directive(args)`.
    pub directive: Regex,
    /// `'key' => 'value'`.
    pub array_pair: Regex,
    /// Echoes, comments and directives, which split template text.
    pub text_separator: Regex,
}

pub static BLADE: LazyLock<BladePatterns> = LazyLock::new(|| BladePatterns {
    echo: compile(r"(?s)\{\{--.*?--\}\}|\{!!.*?!!\}|@?\{\{.*?\}\}"),
    section_directive: compile(&format!(
        r"@(section|yield|slot)\s*\(\s*'([^'\n]*)'\s*,\s*(?:{SQ}|{DQ})\s*\)"
    )),
    directive: compile(r"@[A-Za-z_]+(?:\s*\([^)\n]*\))?"),
    array_pair: compile(&format!(
        r#"(?:'([^'\n]+)'|"([^"\n]+)")\s*=>\s*(?:{SQ}|{DQ})"#
    )),
    text_separator: compile(
        r"(?s)\{\{--.*?--\}\}|\{!!.*?!!\}|@?\{\{.*?\}\}|<!--.*?-->|@[A-Za-z_]+(?:\s*\([^)\n]*\))?",
    ),
});

#[cfg(test)]
mod tests {
    use crate::core::patterns::*;

    #[test]
    fn test_all_tables_compile() {
        LazyLock::force(&SHARED);
        LazyLock::force(&JSX);
        LazyLock::force(&VUE);
        LazyLock::force(&BLADE);
    }

    #[test]
    fn test_translated_call() {
        let re = &SHARED.translated_call;
        assert!(re.is_match("t('app.title')"));
        assert!(re.is_match("{t(\"x\")}"));
        assert!(re.is_match("{{ $t('x') }}"));
        assert!(re.is_match("{{ __('Welcome') }}"));
        assert!(re.is_match("@lang('auth.failed')"));
        assert!(!re.is_match("Get started (free)"));
        assert!(!re.is_match("Format(s)"));
    }

    #[test]
    fn test_attribute_groups() {
        let caps = JSX.attribute.captures(r#"<input placeholder="Your name" />"#).unwrap();
        assert_eq!(&caps[1], "placeholder");
        assert_eq!(first_group(&caps, 2..7).unwrap().as_str(), "Your name");

        let caps = JSX.attribute.captures(r#"<img alt={"Logo"} />"#).unwrap();
        assert_eq!(&caps[1], "alt");
        assert!(caps.get(2).is_none());
        assert_eq!(first_group(&caps, 2..7).unwrap().as_str(), "Logo");
    }

    #[test]
    fn test_variable_with_type_annotation() {
        let caps = JSX
            .variable
            .captures(r#"const errorMessage: string = "Something went wrong";"#)
            .unwrap();
        assert_eq!(&caps[1], "errorMessage");
        assert_eq!(first_group(&caps, 2..5).unwrap().as_str(), "Something went wrong");
    }

    #[test]
    fn test_notification_call() {
        let caps = JSX.notification_call.captures(r#"toast.success('Saved!')"#).unwrap();
        assert_eq!(&caps[1], "toast");
        assert_eq!(&caps[2], "success");
        assert_eq!(first_group(&caps, 3..6).unwrap().as_str(), "Saved!");
        assert!(JSX.notification_call.captures(r#"errorMessage("x")"#).is_none());
    }

    #[test]
    fn test_import_statement_multiline() {
        let src = "import {\n  a,\n  b,\n} from './x';\nconst c = 1;\n";
        let m = SHARED.import_statement.find(src).unwrap();
        assert_eq!(m.as_str(), "import {\n  a,\n  b,\n} from './x';");
    }

    #[test]
    fn test_array_pair() {
        let caps = BLADE.array_pair.captures(r#"['title' => 'Dashboard']"#).unwrap();
        assert_eq!(&caps[1], "title");
        assert_eq!(first_group(&caps, 3..5).unwrap().as_str(), "Dashboard");
    }

    #[test]
    fn test_element_ignores_quoted_angle_brackets() {
        let src = r#"<button @click="count > 0 && go()">Go</button>"#;
        let caps = SHARED.element.captures(src).unwrap();
        assert_eq!(&caps[2], "button");
        assert_eq!(caps.get(0).unwrap().end(), src.find("Go<").unwrap());

        let caps = SHARED.element.captures("<input placeholder=\"x\" />").unwrap();
        assert_eq!(&caps[4], "/");
    }

    #[test]
    fn test_mustache_literal() {
        let caps = VUE.mustache_literal.captures("{{ 'Hello there' }}").unwrap();
        assert_eq!(first_group(&caps, 1..3).unwrap().as_str(), "Hello there");
    }
}
