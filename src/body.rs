//! Body segmentation: the document minus its frontmatter.
//!
//! The body is cut from the original source rather than re-rendered, so
//! block order, link reference definitions and inline spacing all survive.
//! Only surrounding blank lines are trimmed, and CRLF line endings are
//! normalized to `\n`.

use std::ops::Range;

/// Drop a leading UTF-8 byte order mark.
pub fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{FEFF}').unwrap_or(source)
}

/// Return the document text with the frontmatter span removed.
///
/// An empty result marks a metadata-only document.
pub fn segment(source: &str, frontmatter: Option<&Range<usize>>) -> String {
    let text = match frontmatter {
        Some(span) => format!("{}{}", &source[..span.start], &source[span.end..]),
        None => source.to_string(),
    };
    trim_blank_lines(&text.replace("\r\n", "\n"))
}

/// Drop leading and trailing whitespace-only lines. Indentation of the
/// first kept line is preserved.
pub fn trim_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let Some(first) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .unwrap_or(first);
    lines[first..=last].join("\n")
}
