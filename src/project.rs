//! Project descriptor lookup.
//!
//! Generated code lives under the root namespace declared by the nearest
//! project file above the input folder:
//!
//! ```text
//! MyApp/
//! ├── MyApp.csproj        <RootNamespace>MyApp</RootNamespace>
//! └── Docs/               ← input root; lookup starts here and walks up
//!     └── 1_Intro.md
//! ```
//!
//! A directory only counts when it holds exactly one descriptor; folders
//! with several are ambiguous and the walk continues past them. Failing to
//! find one, or finding one without `<RootNamespace>`, is fatal for the run.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No .{extension} project file found in {start} or any parent directory")]
    NotFound { start: PathBuf, extension: String },
    #[error("Project file {0} does not declare <RootNamespace>")]
    MissingRootNamespace(PathBuf),
}

/// The resolved root namespace together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RootNamespace {
    pub name: String,
    pub descriptor: PathBuf,
}

static ROOT_NAMESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn root_namespace_regex() -> &'static Regex {
    ROOT_NAMESPACE_REGEX
        .get_or_init(|| Regex::new(r"<RootNamespace>\s*([^<]*?)\s*</RootNamespace>").unwrap())
}

/// Walk upward from `start` and read the root namespace of the first
/// directory holding exactly one `.{extension}` file.
///
/// `start` is canonicalized first so `..` components walk real ancestors.
pub fn locate(start: &Path, extension: &str) -> Result<RootNamespace, ProjectError> {
    let start = fs::canonicalize(start)?;
    let mut dir = Some(start.as_path());
    while let Some(current) = dir {
        if let Some(descriptor) = single_descriptor(current, extension)? {
            return read(&descriptor);
        }
        dir = current.parent();
    }
    Err(ProjectError::NotFound {
        start,
        extension: extension.to_string(),
    })
}

/// Read the root namespace from an explicit descriptor file.
pub fn read(descriptor: &Path) -> Result<RootNamespace, ProjectError> {
    let content = fs::read_to_string(descriptor)?;
    let name = parse_root_namespace(&content)
        .ok_or_else(|| ProjectError::MissingRootNamespace(descriptor.to_path_buf()))?;
    Ok(RootNamespace {
        name,
        descriptor: descriptor.to_path_buf(),
    })
}

/// Extract the first non-empty `<RootNamespace>` value.
pub fn parse_root_namespace(content: &str) -> Option<String> {
    root_namespace_regex()
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .find(|s| !s.is_empty())
}

fn single_descriptor(dir: &Path, extension: &str) -> Result<Option<PathBuf>, ProjectError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        // Unreadable ancestors are skipped rather than ending the walk.
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut found: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case(extension))
                    .unwrap_or(false)
        })
        .collect();
    if found.len() == 1 {
        Ok(found.pop())
    } else {
        Ok(None)
    }
}
