//! Report formatting and printing utilities.
//!
//! Separate from the engine so lingo can be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::{
    data::{ExtractionResult, LineIndex},
    sync::SyncResult,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Path relative to `base` when possible, for shorter output.
pub fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

pub fn print_success(message: &str) {
    let _ = writeln!(io::stdout().lock(), "{} {}", SUCCESS_MARK.green(), message.green());
}

pub fn print_failure(message: &str) {
    let _ = writeln!(io::stderr().lock(), "{} {}", FAILURE_MARK.red(), message.red());
}

/// Longest text shown per extracted item, in terminal columns.
const MAX_TEXT_WIDTH: usize = 60;

/// Cut `text` to at most `max` display columns, marking the cut with `…`.
///
/// Widths are terminal columns, so CJK text is cut at half the characters.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('\u{2026}');
    out
}

/// One line per item: `path:line:col  kind  "text"`.
pub fn print_extraction_to<W: Write>(
    file: &str,
    content: &str,
    result: &ExtractionResult,
    writer: &mut W,
) {
    let index = LineIndex::new(content);
    for item in &result.items {
        let (line, col) = index.line_col(item.range.start);
        let _ = writeln!(
            writer,
            "{}:{}:{}  {}  \"{}\"",
            file,
            line,
            col,
            item.kind.as_str().cyan(),
            truncate_to_width(&item.text, MAX_TEXT_WIDTH)
        );
    }
}

pub fn print_sync_result(result: &SyncResult, base: &Path, apply_verb: &str) {
    print_sync_result_to(result, base, apply_verb, &mut io::stdout().lock());
}

pub fn print_sync_result_to<W: Write>(
    result: &SyncResult,
    base: &Path,
    apply_verb: &str,
    writer: &mut W,
) {
    for path in &result.written_files {
        let _ = writeln!(writer, "  {} {}", "wrote".green(), display_path(path, base));
    }
    for failure in &result.failures {
        let _ = writeln!(
            writer,
            "  {} {}: {}",
            "failed".red().bold(),
            display_path(&failure.path, base),
            failure.error
        );
    }

    if result.written_files.is_empty() && result.is_success() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Locales already up to date".green()
        );
    } else if result.is_success() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} {} in {}",
                apply_verb,
                plural(result.updated_count, "key"),
                plural(result.written_files.len(), "file")
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} ({} written)",
            FAILURE_MARK.red(),
            format!("{} could not be synced", plural(result.failures.len(), "file")).red(),
            plural(result.written_files.len(), "file")
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::report::*;
    use crate::core::data::{ExtractedItem, ItemType, Kind, SourceRange};
    use crate::core::sync::SyncFailure;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn strip_ansi(s: &str) -> String {
        let mut result = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                result.push(c);
            }
        }
        result
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "file"), "1 file");
        assert_eq!(plural(3, "key"), "3 keys");
    }

    #[test]
    fn test_print_extraction() {
        let content = "<h1>\n  Hello world\n</h1>";
        let mut result = ExtractionResult::default();
        result.push(ExtractedItem {
            text: "Hello world".to_string(),
            item_type: ItemType::Text,
            kind: Kind::Title,
            range: SourceRange::new(7, 18),
        });

        let mut out = Vec::new();
        print_extraction_to("src/App.tsx", content, &result, &mut out);
        assert_eq!(
            strip_ansi(&String::from_utf8(out).unwrap()),
            "src/App.tsx:2:3  title  \"Hello world\"\n"
        );
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Save", 10), "Save");
        assert_eq!(truncate_to_width("Save changes", 6), "Save \u{2026}");
        // Wide characters take two columns each
        assert_eq!(truncate_to_width("保存更改设置", 7), "保存更\u{2026}");
    }

    #[test]
    fn test_print_sync_result() {
        let base = PathBuf::from("/project/locales");
        let result = SyncResult {
            updated_count: 3,
            written_files: vec![base.join("fr.json")],
            failures: Vec::new(),
        };
        let mut out = Vec::new();
        print_sync_result_to(&result, &base, "Added", &mut out);
        assert_eq!(
            strip_ansi(&String::from_utf8(out).unwrap()),
            "  wrote fr.json\n\u{2713} Added 3 keys in 1 file\n"
        );
    }

    #[test]
    fn test_print_sync_failures() {
        let base = PathBuf::from("/project/locales");
        let result = SyncResult {
            updated_count: 0,
            written_files: Vec::new(),
            failures: vec![SyncFailure {
                path: base.join("de.json"),
                error: "Cancelled before write".to_string(),
            }],
        };
        let mut out = Vec::new();
        print_sync_result_to(&result, &base, "Added", &mut out);
        let text = strip_ansi(&String::from_utf8(out).unwrap());
        assert!(text.contains("failed de.json: Cancelled before write"));
        assert!(text.contains("1 file could not be synced (0 files written)"));
    }
}
