//! The `convert` driver.
//!
//! ```text
//! Idle → resolve config → resolve root namespace ──(fail)──→ Aborted
//!                              │
//!                              ▼
//!                      discover documents → generate (parallel) → report
//! ```
//!
//! Everything that can fail for the whole run (bad pattern, bad config, no
//! project descriptor, duplicate outputs) happens before the first file is
//! written. After that, each document is an independent task returning a
//! tagged result: a broken document is reported and skipped while the rest
//! are still generated.
//!
//! ## Parallel Processing
//!
//! Documents are generated on a [rayon](https://docs.rs/rayon) pool sized by
//! `processing.max_threads` (all cores by default). Tasks share nothing but
//! read-only run context; results are tallied after the join.

use crate::body;
use crate::codegen::{self, SynthesisContext};
use crate::config::{self, ConfigError, GeneratorConfig};
use crate::frontmatter::{self, FrontmatterError};
use crate::namespace;
use crate::naming::is_identifier_path;
use crate::project::{self, ProjectError, RootNamespace};
use crate::scan::{self, InputPattern, ScanError};
use crate::types::{DocumentDescriptor, GeneratedFile};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("{failed} of {total} documents failed to generate")]
    DocumentsFailed { failed: usize, total: usize },
}

/// Failure of a single document. Never aborts the batch.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    #[error("File name is empty once the ordinal prefix is removed")]
    EmptyName,
    #[error("viewBase {0:?} is not a valid type name")]
    InvalidViewBase(String),
}

/// Inputs of one `convert` run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Glob such as `Docs/*.md`.
    pub input_pattern: String,
    pub output_dir: PathBuf,
    /// Explicit project descriptor; located by walking up when absent.
    pub project_file: Option<PathBuf>,
    /// Explicit config file; `docgen.toml` in the input root when absent.
    pub config_file: Option<PathBuf>,
}

#[derive(Debug)]
pub struct DocumentFailure {
    pub source: PathBuf,
    pub error: DocumentError,
}

/// Outcome of a run that got past the fatal checks.
#[derive(Debug)]
pub struct ConvertReport {
    pub root_namespace: RootNamespace,
    pub generated: Vec<GeneratedFile>,
    pub failures: Vec<DocumentFailure>,
}

impl ConvertReport {
    pub fn total(&self) -> usize {
        self.generated.len() + self.failures.len()
    }

    /// Turn a report with failures into [`GenerateError::DocumentsFailed`].
    pub fn ensure_success(&self) -> Result<(), GenerateError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(GenerateError::DocumentsFailed {
                failed: self.failures.len(),
                total: self.total(),
            })
        }
    }
}

/// Read-only state shared by every generation task.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    pub root_namespace: &'a str,
    pub config: &'a GeneratorConfig,
    pub output_dir: &'a Path,
}

/// Run the whole pipeline.
pub fn convert(options: &ConvertOptions) -> Result<ConvertReport, GenerateError> {
    let input = InputPattern::parse(&options.input_pattern)?;
    let config = match &options.config_file {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(&input.root)?,
    };

    let root_namespace = match &options.project_file {
        Some(path) => project::read(path)?,
        None => project::locate(&input.root, &config.project.descriptor_extension)?,
    };
    info!(
        namespace = %root_namespace.name,
        descriptor = %root_namespace.descriptor.display(),
        "resolved root namespace"
    );

    let documents = scan::scan(&input, &config.naming, &config.target.extension)?;
    info!(
        count = documents.len(),
        root = %input.root.display(),
        "discovered documents"
    );

    fs::create_dir_all(&options.output_dir)?;

    let ctx = RunContext {
        root_namespace: &root_namespace.name,
        config: &config,
        output_dir: &options.output_dir,
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config::effective_threads(&config.processing))
        .build()?;
    let results: Vec<(PathBuf, Result<GeneratedFile, DocumentError>)> = pool.install(|| {
        documents
            .par_iter()
            .map(|doc| (doc.relative_path.clone(), generate_document(doc, &ctx)))
            .collect()
    });

    let mut generated = Vec::new();
    let mut failures = Vec::new();
    for (source, result) in results {
        match result {
            Ok(file) => generated.push(file),
            Err(error) => {
                warn!(source = %source.display(), %error, "document failed");
                failures.push(DocumentFailure { source, error });
            }
        }
    }

    Ok(ConvertReport {
        root_namespace,
        generated,
        failures,
    })
}

/// Generate and write the file for one document.
pub fn generate_document(
    doc: &DocumentDescriptor,
    ctx: &RunContext<'_>,
) -> Result<GeneratedFile, DocumentError> {
    if doc.stem.is_empty() {
        return Err(DocumentError::EmptyName);
    }
    let target = &ctx.config.target;

    let raw = fs::read_to_string(&doc.absolute_path)?;
    let source = body::strip_bom(&raw);
    let (metadata, block) = frontmatter::extract(source)?;
    if let Some(view_base) = metadata.view_base.as_deref().map(str::trim)
        && !view_base.is_empty()
        && !is_identifier_path(view_base)
    {
        return Err(DocumentError::InvalidViewBase(view_base.to_string()));
    }
    let body = body::segment(source, block.as_ref().map(|b| &b.span));

    let order = codegen::resolve_order(
        doc.order_override,
        &metadata,
        ctx.config.ordering.precedence,
    );
    let namespace = namespace::full_namespace(
        ctx.root_namespace,
        &target.apps_segment,
        &doc.namespace_suffix,
    );
    let class_name = codegen::class_name(&doc.stem);
    let code = codegen::synthesize(
        &SynthesisContext {
            namespace: &namespace,
            target,
        },
        &class_name,
        order,
        &metadata,
        &body,
    );

    let output = doc.output_file(&target.extension);
    let output_path = ctx.output_dir.join(&output);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, code)?;
    debug!(
        source = %doc.relative_path.display(),
        output = %output.display(),
        order,
        "generated"
    );

    Ok(GeneratedFile {
        source: doc.relative_path.clone(),
        output,
        namespace,
        class_name,
        order,
        metadata_only: body.is_empty(),
    })
}
