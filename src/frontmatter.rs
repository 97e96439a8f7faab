//! Frontmatter detection and metadata deserialization.
//!
//! A document may open with a YAML block fenced by `---`:
//!
//! ```text
//! ---
//! icon: Rocket
//! order: 5
//! title: Getting Started
//! viewBase: SampleBase
//! groupExpanded: true
//! ---
//! # Body starts here
//! ```
//!
//! The block is located through pulldown-cmark's metadata-block support, so
//! a `---` thematic break further down the document is never mistaken for
//! frontmatter. Keys are camelCase; unknown keys are ignored. Documents
//! without a block get [`Metadata::default`].

use pulldown_cmark::{Event, MetadataBlockKind, Options, Parser, Tag};
use serde::Deserialize;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid frontmatter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Values a document can declare about its generated view.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub icon: Option<String>,
    /// Explicit order. `None` when the key is absent, so callers can tell
    /// "declared 0" from "not declared".
    pub order: Option<i32>,
    pub title: Option<String>,
    /// Base type for the generated class; the configured default applies when absent.
    pub view_base: Option<String>,
    pub group_expanded: bool,
}

/// A located frontmatter block.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    /// Byte range in the source, delimiters included.
    pub span: Range<usize>,
    /// Source text of the block, delimiters included.
    pub raw: String,
}

impl Frontmatter {
    /// The block's YAML with the opening and closing fence lines removed.
    pub fn yaml(&self) -> String {
        let mut lines: Vec<&str> = self.raw.lines().collect();
        if lines.first().is_some_and(|l| l.trim_end() == "---") {
            lines.remove(0);
        }
        if lines
            .last()
            .is_some_and(|l| matches!(l.trim_end(), "---" | "..."))
        {
            lines.pop();
        }
        lines.join("\n")
    }
}

/// Find a frontmatter block at the very start of `source`.
pub fn find(source: &str) -> Option<Frontmatter> {
    if let Some(span) = empty_block(source) {
        return Some(Frontmatter {
            raw: source[span.clone()].to_string(),
            span,
        });
    }
    let parser = Parser::new_ext(source, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    match parser.into_offset_iter().next() {
        Some((Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)), span))
            if source[..span.start].trim().is_empty() =>
        {
            let span = span.start..closing_fence_end(source, &span);
            Some(Frontmatter {
                raw: source[span.clone()].to_string(),
                span,
            })
        }
        _ => None,
    }
}

fn is_fence(line: &str) -> bool {
    matches!(line.trim_end(), "---" | "...")
}

/// A `---` line directly followed by a closing fence. pulldown-cmark does
/// not report a metadata block with no content.
fn empty_block(source: &str) -> Option<Range<usize>> {
    let mut lines = source.split_inclusive('\n');
    let open = lines.next()?;
    if open.trim_end() != "---" {
        return None;
    }
    let close = lines.next()?;
    is_fence(close).then(|| 0..open.len() + close.len())
}

/// End of the block including its closing fence line.
///
/// The parser's span may stop before the closing fence; in that case the
/// fence line following it is absorbed so it never leaks into the body.
fn closing_fence_end(source: &str, span: &Range<usize>) -> usize {
    let raw = &source[span.clone()];
    if raw.lines().skip(1).last().is_some_and(is_fence) {
        return span.end;
    }
    let mut offset = span.end;
    for line in source[span.end..].split_inclusive('\n') {
        if is_fence(line) {
            return offset + line.len();
        }
        if !line.trim().is_empty() {
            break;
        }
        offset += line.len();
    }
    span.end
}

/// Deserialize a block's YAML. An empty block yields default metadata.
pub fn parse_metadata(frontmatter: &Frontmatter) -> Result<Metadata, FrontmatterError> {
    let yaml = frontmatter.yaml();
    if yaml.trim().is_empty() {
        return Ok(Metadata::default());
    }
    Ok(serde_yaml::from_str(&yaml)?)
}

/// Locate and parse a document's frontmatter.
///
/// Returns the metadata together with the block (if any) so the body can be
/// cut around it.
pub fn extract(source: &str) -> Result<(Metadata, Option<Frontmatter>), FrontmatterError> {
    match find(source) {
        Some(frontmatter) => {
            let metadata = parse_metadata(&frontmatter)?;
            Ok((metadata, Some(frontmatter)))
        }
        None => Ok((Metadata::default(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_frontmatter() {
        let source = "---\nicon: Rocket\norder: 5\ntitle: Getting Started\nviewBase: SampleBase\ngroupExpanded: true\n---\n# Hello\n";
        let (meta, fm) = extract(source).unwrap();

        assert_eq!(meta.icon.as_deref(), Some("Rocket"));
        assert_eq!(meta.order, Some(5));
        assert_eq!(meta.title.as_deref(), Some("Getting Started"));
        assert_eq!(meta.view_base.as_deref(), Some("SampleBase"));
        assert!(meta.group_expanded);

        let fm = fm.unwrap();
        assert_eq!(fm.span.start, 0);
        assert!(fm.raw.starts_with("---"));
        assert!(!source[fm.span.end..].contains("---"));
        assert!(source[fm.span.end..].contains("# Hello"));
    }

    #[test]
    fn absent_keys_use_defaults() {
        let (meta, _) = extract("---\ntitle: Only Title\n---\nBody").unwrap();
        assert_eq!(meta.title.as_deref(), Some("Only Title"));
        assert_eq!(meta.order, None);
        assert_eq!(meta.icon, None);
        assert_eq!(meta.view_base, None);
        assert!(!meta.group_expanded);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let (meta, _) = extract("---\norder: 3\nprepare: something\n---\nBody").unwrap();
        assert_eq!(meta.order, Some(3));
    }

    #[test]
    fn explicit_zero_order_is_kept() {
        let (meta, _) = extract("---\norder: 0\n---\nBody").unwrap();
        assert_eq!(meta.order, Some(0));
    }

    #[test]
    fn no_frontmatter_gives_default() {
        let (meta, fm) = extract("# Hi\n\nJust content.").unwrap();
        assert_eq!(meta, Metadata::default());
        assert!(fm.is_none());
    }

    #[test]
    fn thematic_break_later_is_not_frontmatter() {
        let source = "# Title\n\n---\norder: 3\n---\n";
        let (meta, fm) = extract(source).unwrap();
        assert!(fm.is_none());
        assert_eq!(meta.order, None);
    }

    #[test]
    fn empty_block_gives_default_metadata() {
        let source = "---\n---\n";
        let (meta, fm) = extract(source).unwrap();
        assert_eq!(meta, Metadata::default());
        assert_eq!(fm.unwrap().span, 0..source.len());
    }

    #[test]
    fn empty_block_before_body() {
        let source = "---\n...\n# Body\n";
        let fm = find(source).unwrap();
        assert_eq!(&source[fm.span.end..], "# Body\n");
    }

    #[test]
    fn invalid_yaml_is_error() {
        let result = extract("---\norder: [unclosed\n---\nBody");
        assert!(matches!(result, Err(FrontmatterError::Yaml(_))));
    }

    #[test]
    fn wrong_type_is_error() {
        let result = extract("---\norder: first\n---\nBody");
        assert!(matches!(result, Err(FrontmatterError::Yaml(_))));
    }

    #[test]
    fn yaml_strips_fence_lines() {
        let fm = Frontmatter {
            span: 0..24,
            raw: "---\ntitle: A\norder: 1\n---\n".to_string(),
        };
        assert_eq!(fm.yaml(), "title: A\norder: 1");
    }

    #[test]
    fn yaml_accepts_dot_terminator() {
        let fm = Frontmatter {
            span: 0..16,
            raw: "---\ntitle: A\n...".to_string(),
        };
        assert_eq!(fm.yaml(), "title: A");
    }
}
