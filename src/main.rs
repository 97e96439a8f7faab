use clap::{Parser, Subcommand};
use docs_codegen::{config, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docs-codegen")]
#[command(about = "Generate C# app classes from markdown documentation")]
#[command(long_about = "\
Generate C# app classes from markdown documentation

Every markdown file matched by the input pattern becomes one *.g.cs file
declaring an app class that renders the document. Numeric prefixes order
documents and folders and are stripped from generated names.

Input structure:

  Acme.Docs.csproj                 # <RootNamespace> is read from here
  Docs/
  ├── docgen.toml                  # Generator config (optional)
  ├── 1_Welcome.md                 # → Welcome.g.cs, order 1
  ├── 2_Setup/
  │   ├── _Index.md                # Folder landing page, order 2 (folder's)
  │   └── 1_Intro.md               # → Setup/Intro.g.cs, namespace ….Apps.Setup
  └── Widgets/
      └── Button.md                # Unnumbered: order from frontmatter or 0

Frontmatter (optional YAML at the top of a document):
  icon, title, order, viewBase, groupExpanded

Run 'docs-codegen gen-config' to generate a documented docgen.toml.")]
#[command(version)]
struct Cli {
    /// Log pipeline progress at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one C# file per matched markdown document
    Convert {
        /// Glob selecting the documents, e.g. "Docs/*.md"
        input_pattern: String,
        /// Folder the generated files are written to
        output_folder: PathBuf,
        /// Project descriptor to read the root namespace from
        project_file: Option<PathBuf>,
        /// Config file to use instead of docgen.toml in the input root
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print a stock docgen.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 1; --help and --version exit 0.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Convert {
            input_pattern,
            output_folder,
            project_file,
            config,
        } => {
            let options = generate::ConvertOptions {
                input_pattern,
                output_dir: output_folder,
                project_file,
                config_file: config,
            };
            let report = generate::convert(&options)?;
            output::print_convert_output(&report);
            report.ensure_success()?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
