//! Output folder and namespace derivation.
//!
//! A document's containing folder, relative to the input root, decides both
//! where its generated file goes and which namespace it declares. Every
//! segment loses its ordinal prefix first:
//!
//! ```text
//! Docs/2_Setup/10_Install/1_Intro.md
//!      └── relative folder: 2_Setup/10_Install
//!          output folder:   Setup/Install
//!          suffix:          Setup.Install
//!          namespace:       {Root}.Apps.Setup.Install
//! ```
//!
//! Segments that are empty after stripping (`3_`) are dropped. A leading
//! `generated_root` segment is kept in the output folder but removed from the
//! namespace.

use crate::naming::{parse_ordinal, to_identifier};
use std::path::{Component, Path};

/// Where a document lands and which namespace suffix it gets.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedLocation {
    /// `/`-joined stripped segments, relative to the output root.
    pub output_folder: String,
    /// `.`-joined stripped segments; empty for root-level documents.
    pub namespace_suffix: String,
}

/// Derive output folder and namespace suffix from a folder path relative to
/// the input root.
pub fn derive(relative_folder: &Path, generated_root: &str) -> DerivedLocation {
    let segments: Vec<String> = relative_folder
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(parse_ordinal(&name.to_string_lossy()).name),
            _ => None,
        })
        .filter(|name| !name.is_empty())
        .collect();

    let namespace_segments = match segments.first() {
        Some(first) if !generated_root.is_empty() && first == generated_root => &segments[1..],
        _ => &segments[..],
    };

    DerivedLocation {
        output_folder: segments.join("/"),
        namespace_suffix: namespace_segments
            .iter()
            .map(|s| to_identifier(s))
            .collect::<Vec<_>>()
            .join("."),
    }
}

/// `{root}.{apps}` for root-level documents, `{root}.{apps}.{suffix}` otherwise.
pub fn full_namespace(root_namespace: &str, apps_segment: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        format!("{root_namespace}.{apps_segment}")
    } else {
        format!("{root_namespace}.{apps_segment}.{suffix}")
    }
}
