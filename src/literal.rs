//! C# string literal formatting.
//!
//! Document bodies are embedded verbatim in generated code. Two forms are
//! used:
//!
//! - **Escaped** (`"..."`): single-line content with no quotes.
//! - **Raw** (C# 11 multi-line raw string): content with newlines or quotes.
//!   The fence is one quote longer than the longest quote run in the content
//!   (minimum three), so the content can never close the literal early.
//!
//! ```text
//! """
//!             # Title
//!             Say "hi"
//!             """
//! ```
//!
//! The compiler strips the closing fence's indentation from every content
//! line. Content a raw literal cannot reproduce exactly (carriage returns,
//! other control characters, lines holding only whitespace) falls back to
//! the escaped form, which represents any string.

/// Which literal syntax to emit for a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralForm {
    Escaped,
    /// Multi-line raw literal fenced by `fence` double quotes.
    Raw { fence: usize },
}

/// Characters C# treats as line terminators.
fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Decide the literal form for `content`.
pub fn choose_form(content: &str) -> LiteralForm {
    if !content.contains(|c: char| is_line_break(c) || c == '"') {
        return LiteralForm::Escaped;
    }
    if can_embed_raw(content) {
        LiteralForm::Raw {
            fence: longest_quote_run(content).max(2) + 1,
        }
    } else {
        LiteralForm::Escaped
    }
}

/// True if a multi-line raw literal reproduces `content` exactly.
pub fn can_embed_raw(content: &str) -> bool {
    let bad_char = content
        .chars()
        .any(|c| c != '\n' && c != '\t' && (c.is_control() || is_line_break(c)));
    let blank_padded_line = content
        .split('\n')
        .any(|line| !line.is_empty() && line.trim().is_empty());
    !bad_char && !blank_padded_line
}

fn longest_quote_run(content: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '"' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Format `content` as a C# literal.
///
/// For raw literals, every line after the opening fence is prefixed with
/// `indent`; the caller places the opening fence itself.
pub fn format_literal(content: &str, indent: &str) -> String {
    match choose_form(content) {
        LiteralForm::Escaped => escaped(content),
        LiteralForm::Raw { fence } => raw_block(content, fence, indent),
    }
}

/// A regular `"..."` literal; always valid, always single-line.
pub fn escaped(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 2);
    out.push('"');
    for c in content.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() || is_line_break(c) => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn raw_block(content: &str, fence: usize, indent: &str) -> String {
    let quotes = "\"".repeat(fence);
    let mut out = String::with_capacity(content.len() + 2 * fence + 16);
    out.push_str(&quotes);
    out.push('\n');
    for line in content.split('\n') {
        // Empty lines are exempt from the indentation rule; leaving them
        // bare avoids trailing whitespace in the generated file.
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(line);
        }
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str(&quotes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decode a C# regular or multi-line raw string literal.
    fn decode(literal: &str) -> String {
        let fence = literal.chars().take_while(|&c| c == '"').count();
        if fence >= 3 {
            decode_raw(literal, fence)
        } else {
            decode_escaped(literal)
        }
    }

    fn decode_raw(literal: &str, fence: usize) -> String {
        let quotes = "\"".repeat(fence);
        let mut lines: Vec<&str> = literal.split('\n').collect();
        assert_eq!(lines.remove(0), quotes, "opening fence must stand alone");
        let closing = lines.pop().expect("closing fence line");
        let indent = closing
            .strip_suffix(quotes.as_str())
            .expect("closing line ends with the fence");
        assert!(indent.trim().is_empty(), "only whitespace before closing fence");
        lines
            .iter()
            .map(|line| {
                if line.trim().is_empty() {
                    assert!(line.is_empty(), "whitespace-only lines are not emitted");
                    ""
                } else {
                    line.strip_prefix(indent)
                        .expect("content line carries the closing indentation")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn decode_escaped(literal: &str) -> String {
        let inner = literal
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .expect("quoted literal");
        let mut out = String::new();
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            assert!(c != '"' && c != '\n', "unescaped {c:?} in regular literal");
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next().unwrap() {
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                '0' => out.push('\0'),
                'u' => {
                    let hex: String = chars.by_ref().take(4).collect();
                    let code = u32::from_str_radix(&hex, 16).unwrap();
                    out.push(char::from_u32(code).unwrap());
                }
                other => panic!("unknown escape \\{other}"),
            }
        }
        out
    }

    fn assert_round_trip(content: &str) {
        let literal = format_literal(content, "            ");
        assert_eq!(decode(&literal), content, "literal was:\n{literal}");
    }

    #[test]
    fn plain_single_line_is_escaped() {
        assert_eq!(choose_form("# Hi"), LiteralForm::Escaped);
        assert_eq!(format_literal("# Hi", "    "), "\"# Hi\"");
    }

    #[test]
    fn backslashes_and_tabs_are_escaped() {
        assert_eq!(escaped("C:\\path\there"), "\"C:\\\\path\\there\"");
    }

    #[test]
    fn quote_and_newline_use_raw_form() {
        let content = "Say \"hi\"\nand bye";
        assert_eq!(choose_form(content), LiteralForm::Raw { fence: 3 });
        assert_eq!(
            format_literal(content, "    "),
            "\"\"\"\n    Say \"hi\"\n    and bye\n    \"\"\""
        );
        assert_round_trip(content);
    }

    #[test]
    fn quote_without_newline_uses_raw_form() {
        assert_eq!(choose_form("a \"b\""), LiteralForm::Raw { fence: 3 });
        assert_round_trip("a \"b\"");
    }

    #[test]
    fn fence_outgrows_quote_runs() {
        let content = "```\nprint(\"\"\"doc\"\"\")\n```\nand \"\"\"\"four\"\"\"\"";
        assert_eq!(choose_form(content), LiteralForm::Raw { fence: 5 });
        assert_round_trip(content);
    }

    #[test]
    fn empty_lines_are_left_bare() {
        let literal = format_literal("a\n\nb", "  ");
        assert_eq!(literal, "\"\"\"\n  a\n\n  b\n  \"\"\"");
        assert_round_trip("a\n\nb");
    }

    #[test]
    fn whitespace_only_lines_fall_back_to_escaped() {
        let content = "a\n   \nb";
        assert_eq!(choose_form(content), LiteralForm::Escaped);
        assert_round_trip(content);
    }

    #[test]
    fn carriage_returns_fall_back_to_escaped() {
        let content = "line\r\nnext";
        assert_eq!(choose_form(content), LiteralForm::Escaped);
        assert_round_trip(content);
    }

    #[test]
    fn unicode_line_separators_are_escaped() {
        let content = "a\u{2028}b";
        assert_eq!(format_literal(content, ""), "\"a\\u2028b\"");
        assert_round_trip(content);
    }

    #[test]
    fn round_trip_markdown_samples() {
        for content in [
            "# Title\n\nSome *markdown* with `code`.",
            "Say \"hi\"\nand bye",
            "    indented code\n\tand a tab",
            "trailing quote\"",
            "\"leading quote\nsecond",
            "ends with newline\n",
            "\n\nstarts with blank lines",
            "back\\slash \"quoted\"\n{braces} and $dollar",
            "unicode: café 日本語 \"ok\"",
        ] {
            assert_round_trip(content);
        }
    }
}
