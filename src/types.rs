//! Shared types passed from discovery to generation.

use std::path::PathBuf;

/// One discovered input document.
///
/// Built once during [`crate::scan`] and consumed once by
/// [`crate::generate`]; nothing is kept between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDescriptor {
    pub absolute_path: PathBuf,
    /// Path relative to the input root, as written on disk.
    pub relative_path: PathBuf,
    /// File stem with any ordinal prefix removed.
    pub stem: String,
    /// Order taken from the filename, or from the parent folder for index
    /// documents. Frontmatter may still override it during synthesis.
    pub order_override: Option<i32>,
    /// Dot-joined ordinal-stripped folder path. Empty at the input root.
    pub namespace_suffix: String,
    /// Slash-joined mirror of the folder path under the output root.
    pub output_folder: String,
}

impl DocumentDescriptor {
    /// Output path relative to the output root: `{folder}/{Stem}.g.{ext}`.
    pub fn output_file(&self, extension: &str) -> PathBuf {
        let file_name = format!("{}.g.{}", self.stem, extension);
        if self.output_folder.is_empty() {
            PathBuf::from(file_name)
        } else {
            PathBuf::from(&self.output_folder).join(file_name)
        }
    }
}

/// A successfully written file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub source: PathBuf,
    /// Output path relative to the output root.
    pub output: PathBuf,
    pub namespace: String,
    pub class_name: String,
    pub order: i32,
    /// True when the document had no body and `Build()` returns null.
    pub metadata_only: bool,
}
