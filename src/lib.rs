//! # docs-codegen
//!
//! Turns a folder of markdown documentation into C# view classes. Every
//! document becomes one `*.g.cs` file declaring an app class whose `Build()`
//! returns the document body as a markdown view. The folder tree supplies
//! namespaces and ordering; optional YAML frontmatter supplies the app
//! attribute (icon, title, order, group state) and the base class.
//!
//! # Pipeline
//!
//! ```text
//! 1. Resolve   docgen.toml + *.csproj  →  config, root namespace
//! 2. Scan      Docs/**/*.md            →  document descriptors
//! 3. Generate  descriptor              →  Out/**/*.g.cs   (parallel)
//! ```
//!
//! Stage 1 and 2 failures abort the run before anything is written. Stage 3
//! failures are per document: the batch completes and the report lists what
//! failed.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`generate`] | The `convert` driver: fatal checks, parallel generation, report |
//! | [`scan`] | Input pattern parsing, document discovery, duplicate output detection |
//! | [`project`] | Locates the project descriptor and reads its root namespace |
//! | [`config`] | `docgen.toml` loading, validation, merging over stock defaults |
//! | [`naming`] | `N_name` ordinal prefix parser and identifier sanitizing |
//! | [`namespace`] | Folder path → output folder and namespace suffix |
//! | [`frontmatter`] | YAML frontmatter detection and metadata parsing |
//! | [`body`] | Body segmentation: frontmatter removal, line ending normalization |
//! | [`literal`] | C# string literal encoding (raw or escaped) |
//! | [`codegen`] | Order resolution, attribute line and class synthesis |
//! | [`types`] | Shared types: `DocumentDescriptor`, `GeneratedFile` |
//! | [`output`] | CLI output formatting for a convert report |
//!
//! # Design Decisions
//!
//! ## Filename Ordinals Win
//!
//! A `2_Intro.md` file is ordered 2 even when its frontmatter says
//! `order: 5`. The file tree is what authors see and reorder; frontmatter
//! order only fills in for unnumbered files. Projects that want the reverse
//! set `ordering.precedence = "metadata"`.
//!
//! ## Raw Literals With a Fallback
//!
//! Bodies are emitted as C# 11 raw string literals so the generated file
//! reads like the markdown it came from. The fence grows past the longest
//! run of quotes in the body. Content a raw literal cannot carry (carriage
//! returns, other control characters, whitespace-only lines) switches to a
//! regular escaped literal.

pub mod body;
pub mod codegen;
pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod literal;
pub mod namespace;
pub mod naming;
pub mod output;
pub mod project;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
