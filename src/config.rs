//! Generator configuration module.
//!
//! Handles loading, validating, and merging `docgen.toml`. Stock defaults are
//! overridden by an optional file in the input root (or one passed with
//! `--config`).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [naming]
//! index_name = "_Index"         # Folder landing page; inherits the folder's order
//! generated_root = "Generated"  # Leading folder kept out of the namespace
//!
//! [project]
//! descriptor_extension = "csproj"
//!
//! [target]
//! apps_segment = "Apps"         # {RootNamespace}.Apps.{suffix}
//! extension = "cs"              # {Stem}.g.cs
//! view_base = "ViewBase"        # Base type when frontmatter has no viewBase
//! attribute = "App"             # [App(order:1, ...)]
//! icon_type = "Icons"           # icon:Icons.Rocket
//! view_type = "Markdown"        # new Markdown(...)
//! imports = ["Ivy", "Ivy.Apps", "Ivy.Shared", "Ivy.Core", "Ivy.Views"]
//!
//! [ordering]
//! precedence = "filename"       # or "metadata"
//!
//! [processing]
//! max_threads = 4               # omit for auto = CPU cores
//! ```
//!
//! Config files are sparse: override only the keys you need. Unknown keys
//! are rejected to catch typos early.

use crate::naming::is_identifier_path;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File looked up in the input root when no explicit config path is given.
pub const CONFIG_FILE: &str = "docgen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `docgen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Document and folder naming conventions.
    pub naming: NamingConfig,
    /// Project descriptor lookup.
    pub project: ProjectConfig,
    /// Shape of the emitted source files.
    pub target: TargetConfig,
    /// Order resolution between filename ordinals and frontmatter.
    pub ordering: OrderingConfig,
    /// Parallel generation settings.
    pub processing: ProcessingConfig,
}

impl GeneratorConfig {
    /// Validate that configured names can appear in generated code.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_empty = [
            ("naming.index_name", &self.naming.index_name),
            ("project.descriptor_extension", &self.project.descriptor_extension),
            ("target.extension", &self.target.extension),
        ];
        for (key, value) in non_empty {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }

        let identifiers = [
            ("target.apps_segment", &self.target.apps_segment),
            ("target.view_base", &self.target.view_base),
            ("target.attribute", &self.target.attribute),
            ("target.icon_type", &self.target.icon_type),
            ("target.view_type", &self.target.view_type),
        ];
        for (key, value) in identifiers {
            if !is_identifier_path(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be an identifier, got {value:?}"
                )));
            }
        }

        for import in &self.target.imports {
            let path = import.strip_prefix("static ").unwrap_or(import);
            if !is_identifier_path(path) {
                return Err(ConfigError::Validation(format!(
                    "target.imports entry {import:?} is not a namespace"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Stem of a folder's landing document. Its order comes from the folder.
    pub index_name: String,
    /// Leading folder name dropped from namespaces (output folders keep it).
    pub generated_root: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            index_name: "_Index".to_string(),
            generated_root: "Generated".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Extension (without dot) of the project descriptor carrying `<RootNamespace>`.
    pub descriptor_extension: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            descriptor_extension: "csproj".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// Conventional segment between the root namespace and the folder suffix.
    pub apps_segment: String,
    /// Extension of generated files, written as `{Stem}.g.{extension}`.
    pub extension: String,
    /// Base class used when frontmatter does not declare `viewBase`.
    pub view_base: String,
    /// Attribute carrying order, icon, title and group state.
    pub attribute: String,
    /// Type that icon names are members of.
    pub icon_type: String,
    /// View constructed around the embedded body.
    pub view_type: String,
    /// `using` directives at the top of every file.
    pub imports: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            apps_segment: "Apps".to_string(),
            extension: "cs".to_string(),
            view_base: "ViewBase".to_string(),
            attribute: "App".to_string(),
            icon_type: "Icons".to_string(),
            view_type: "Markdown".to_string(),
            imports: ["Ivy", "Ivy.Apps", "Ivy.Shared", "Ivy.Core", "Ivy.Views"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Which order source wins when a document has both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderPrecedence {
    /// Filename (or parent folder) ordinal first, frontmatter `order` as fallback.
    #[default]
    Filename,
    /// Frontmatter `order` first, filename ordinal as fallback.
    Metadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderingConfig {
    pub precedence: OrderPrecedence,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of generation workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_threads
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GeneratorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<GeneratorConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GeneratorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a specific config file. The file must exist.
pub fn load_config_file(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Load `docgen.toml` from the input root, falling back to stock defaults.
pub fn load_config(root: &Path) -> Result<GeneratorConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if config_path.is_file() {
        load_config_file(&config_path)
    } else {
        resolve_config(None)
    }
}

/// Returns a fully-commented stock `docgen.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docs-codegen configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Place this file as docgen.toml in the input root, or pass --config.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Naming conventions
# ---------------------------------------------------------------------------
[naming]
# Stem of a folder's landing document. Index documents are not numbered
# themselves; they take their order from the parent folder's prefix.
index_name = "_Index"

# A leading folder with this name is kept out of generated namespaces.
generated_root = "Generated"

# ---------------------------------------------------------------------------
# Project descriptor (source of <RootNamespace>)
# ---------------------------------------------------------------------------
[project]
descriptor_extension = "csproj"

# ---------------------------------------------------------------------------
# Generated code
# ---------------------------------------------------------------------------
[target]
# Namespace: {RootNamespace}.{apps_segment}.{Folder.Path}
apps_segment = "Apps"

# Generated files are written as {Stem}.g.{extension}
extension = "cs"

# Base class when a document's frontmatter has no viewBase key.
view_base = "ViewBase"

# Attribute listing order, icon, title and groupExpanded.
attribute = "App"

# Icons are emitted as {icon_type}.{icon}
icon_type = "Icons"

# View constructed around the document body.
view_type = "Markdown"

imports = ["Ivy", "Ivy.Apps", "Ivy.Shared", "Ivy.Core", "Ivy.Views"]

# ---------------------------------------------------------------------------
# Ordering
# ---------------------------------------------------------------------------
[ordering]
# "filename": the NNN_ prefix wins, frontmatter order is the fallback.
# "metadata": frontmatter order wins, the NNN_ prefix is the fallback.
precedence = "filename"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel generation workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4
"##
}
