use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// "extrac-\ntion" split across a line break by the PDF layout.
static BROKEN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)-[ \t]*\r?\n[ \t]*(\w)").expect("static regex"));

static INLINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("static regex"));

/// Normalizes text lifted from a PDF page.
///
/// Applies NFKC (ligatures such as `ﬁ` become `fi`), rejoins hyphenated line breaks,
/// collapses horizontal whitespace, and keeps at most one blank line between paragraphs.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let joined = BROKEN_WORD.replace_all(&normalized, "$1$2");

    let mut lines: Vec<String> = Vec::new();
    for line in joined.lines() {
        let line = INLINE_WHITESPACE.replace_all(line.trim(), " ").into_owned();
        let previous_blank = lines.last().is_some_and(|l| l.is_empty());
        if line.is_empty() && (lines.is_empty() || previous_blank) {
            continue;
        }
        lines.push(line);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}
