//! Document discovery.
//!
//! First half of a `convert` run. Resolves the input pattern, walks the
//! input root and builds one [`DocumentDescriptor`] per matching file.
//!
//! ## Directory Structure
//!
//! ```text
//! Docs/                            # Input root (from Docs/*.md)
//! ├── docgen.toml                  # Generator config (optional)
//! ├── 1_Welcome.md                 # → Welcome.g.cs, order 1
//! ├── 2_Setup/
//! │   ├── _Index.md                # → Setup/_Index.g.cs, order 2 (from folder)
//! │   ├── 1_Intro.md               # → Setup/Intro.g.cs, order 1
//! │   └── 2_Install.md
//! ├── Widgets/                     # Unnumbered folders work too
//! │   └── Button.md                # → Widgets/Button.g.cs, order 0
//! └── .drafts/                     # Hidden entries are skipped
//! ```
//!
//! ## Validation
//!
//! Two documents that map to the same generated file (e.g. `1_Intro.md` and
//! `2_Intro.md` side by side) or to the same class (e.g. `Intro.md` and
//! `Generated/Intro.md`) abort the scan before anything is written.

use crate::codegen::class_name;
use crate::config::NamingConfig;
use crate::namespace;
use crate::naming::parse_ordinal;
use crate::types::DocumentDescriptor;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Input pattern has no file name part: {0:?}")]
    MissingFilePattern(String),
    #[error("Input folder not found: {0}")]
    RootNotFound(PathBuf),
    #[error("{first} and {second} both generate {output}")]
    DuplicateOutput {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("{first} and {second} both declare class {class}")]
    DuplicateClass {
        class: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// A parsed `<inputPattern>` argument.
///
/// The literal directory prefix is the input root; the file name part is
/// matched against every file below it, at any depth.
#[derive(Debug, Clone)]
pub struct InputPattern {
    pub root: PathBuf,
    pub pattern: glob::Pattern,
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

impl InputPattern {
    /// Split `Docs/**/*.md` into root `Docs` and pattern `*.md`.
    ///
    /// Directory components from the first wildcard onward are dropped since
    /// matching is recursive anyway. An empty directory part means `.`.
    pub fn parse(input: &str) -> Result<Self, ScanError> {
        let path = Path::new(input);
        let file_part = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .filter(|f| !f.is_empty())
            .ok_or_else(|| ScanError::MissingFilePattern(input.to_string()))?;

        let mut root = PathBuf::new();
        if let Some(parent) = path.parent() {
            for component in parent.components() {
                if has_glob_meta(&component.as_os_str().to_string_lossy()) {
                    break;
                }
                root.push(component);
            }
        }
        if root.as_os_str().is_empty() {
            root.push(".");
        }

        Ok(Self {
            root,
            pattern: glob::Pattern::new(&file_part)?,
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.matches(file_name)
    }
}

/// Walk the input root and describe every matching document.
///
/// Results are sorted by relative path.
pub fn scan(
    input: &InputPattern,
    naming: &NamingConfig,
    extension: &str,
) -> Result<Vec<DocumentDescriptor>, ScanError> {
    if !input.root.is_dir() {
        return Err(ScanError::RootNotFound(input.root.clone()));
    }

    let mut documents = Vec::new();
    let walker = WalkDir::new(&input.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if input.matches(&entry.file_name().to_string_lossy()) {
            documents.push(describe(&input.root, entry.path(), naming));
        }
    }

    documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    check_duplicates(&documents, extension)?;
    Ok(documents)
}

/// Build the descriptor for one document below `root`.
pub fn describe(root: &Path, path: &Path, naming: &NamingConfig) -> DocumentDescriptor {
    let relative_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    let relative_folder = relative_path.parent().unwrap_or(Path::new(""));

    let file_stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let parsed = parse_ordinal(&file_stem);

    // Index documents are not numbered themselves; the folder's prefix orders them.
    let order_override = if parsed.name == naming.index_name {
        folder_ordinal(relative_folder)
    } else {
        parsed.ordinal
    };

    let location = namespace::derive(relative_folder, &naming.generated_root);

    DocumentDescriptor {
        absolute_path: std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
        relative_path,
        stem: parsed.name,
        order_override,
        namespace_suffix: location.namespace_suffix,
        output_folder: location.output_folder,
    }
}

/// Ordinal of the innermost folder, `None` at the input root.
fn folder_ordinal(relative_folder: &Path) -> Option<i32> {
    relative_folder
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name),
            _ => None,
        })
        .next_back()
        .and_then(|name| parse_ordinal(&name.to_string_lossy()).ordinal)
}

/// Reject two documents writing the same file or declaring the same
/// fully qualified class.
fn check_duplicates(documents: &[DocumentDescriptor], extension: &str) -> Result<(), ScanError> {
    let mut outputs: BTreeMap<PathBuf, &Path> = BTreeMap::new();
    let mut classes: BTreeMap<String, &Path> = BTreeMap::new();
    for doc in documents {
        // Nameless documents fail individually during generation.
        if doc.stem.is_empty() {
            continue;
        }
        let output = doc.output_file(extension);
        if let Some(first) = outputs.get(&output) {
            return Err(ScanError::DuplicateOutput {
                output,
                first: first.to_path_buf(),
                second: doc.relative_path.clone(),
            });
        }
        outputs.insert(output, &doc.relative_path);

        let class = match doc.namespace_suffix.as_str() {
            "" => class_name(&doc.stem),
            suffix => format!("{suffix}.{}", class_name(&doc.stem)),
        };
        if let Some(first) = classes.get(&class) {
            return Err(ScanError::DuplicateClass {
                class,
                first: first.to_path_buf(),
                second: doc.relative_path.clone(),
            });
        }
        classes.insert(class, &doc.relative_path);
    }
    Ok(())
}
