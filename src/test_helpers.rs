//! Shared test utilities for the docs-codegen test suite.
//!
//! Fixture setup, document writers and lookup helpers that panic with a
//! readable message on a miss.
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! write_doc(tmp.path(), "Docs/3_Extra/1_Notes.md", "# Notes");
//!
//! let report = convert(&options).unwrap();
//! let notes = find_generated(&report, "NotesApp");
//! assert_eq!(notes.order, 1);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::generate::ConvertReport;
use crate::types::{DocumentDescriptor, GeneratedFile};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/project/` to a temp directory and return it.
///
/// The copy holds `Docs.csproj` (root namespace `Acme.Docs`) and a `Docs/`
/// input folder. Tests get an isolated copy they can mutate freely.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/project");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/rel`, creating parent folders.
pub fn write_doc(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a discovered document by stripped stem. Panics if not found.
pub fn find_doc<'a>(docs: &'a [DocumentDescriptor], stem: &str) -> &'a DocumentDescriptor {
    docs.iter().find(|d| d.stem == stem).unwrap_or_else(|| {
        let stems = doc_stems(docs);
        panic!("document '{stem}' not found. Available: {stems:?}")
    })
}

/// Find a generated file by class name. Panics if not found.
pub fn find_generated<'a>(report: &'a ConvertReport, class_name: &str) -> &'a GeneratedFile {
    report
        .generated
        .iter()
        .find(|g| g.class_name == class_name)
        .unwrap_or_else(|| {
            let names: Vec<&str> = report
                .generated
                .iter()
                .map(|g| g.class_name.as_str())
                .collect();
            let failures: Vec<String> = report
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.source.display(), f.error))
                .collect();
            panic!("class '{class_name}' not generated. Available: {names:?}, failures: {failures:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All document stems in scan order.
pub fn doc_stems(docs: &[DocumentDescriptor]) -> Vec<&str> {
    docs.iter().map(|d| d.stem.as_str()).collect()
}

/// All generated output paths, `/`-separated and sorted.
pub fn generated_outputs(report: &ConvertReport) -> Vec<String> {
    let mut outputs: Vec<String> = report
        .generated
        .iter()
        .map(|g| g.output.to_string_lossy().replace('\\', "/"))
        .collect();
    outputs.sort();
    outputs
}
