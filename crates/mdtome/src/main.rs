//! mdtome CLI - documentation pipeline.
//!
//! Provides commands for:
//! - `parse` / `write`: convert between Markdown text and document trees
//! - corpus passes: `macros`, `planarize`, `superlinks`, `snippets`,
//!   `canonical`
//! - backends and collaterals: `mkdocs`, `latex`, `graphviz`, `copy-images`

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CanonicalArgs, GraphvizArgs, ImagesArgs, LatexArgs, MacrosArgs, MkdocsArgs, ParseArgs,
    PlanarizeArgs, SnippetsArgs, SuperlinksArgs, WriteArgs,
};
use output::Output;

/// mdtome - documentation pipeline.
#[derive(Parser)]
#[command(name = "mdtome", version, about)]
struct Cli {
    /// Enable verbose logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse Markdown sources into document trees.
    Parse(ParseArgs),
    /// Write document trees back to Markdown text.
    Write(WriteArgs),
    /// Substitute configured macros in Markdown sources.
    Macros(MacrosArgs),
    /// Flatten a corpus into id-addressed documents.
    Planarize(PlanarizeArgs),
    /// Resolve anchor links across the corpus.
    Superlinks(SuperlinksArgs),
    /// Inline declared snippets at their references.
    Snippets(SnippetsArgs),
    /// Stamp canonical attributes onto each document.
    Canonical(CanonicalArgs),
    /// Render embedded graph descriptions to images.
    Graphviz(GraphvizArgs),
    /// Copy referenced images into the output tree.
    CopyImages(ImagesArgs),
    /// Emit the mkdocs configuration for a project.
    Mkdocs(MkdocsArgs),
    /// Merge a project into a single LaTeX body.
    Latex(LatexArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Parse(args) => args.execute(),
        Commands::Write(args) => args.execute(),
        Commands::Macros(args) => args.execute(),
        Commands::Planarize(args) => args.execute(),
        Commands::Superlinks(args) => args.execute(),
        Commands::Snippets(args) => args.execute(),
        Commands::Canonical(args) => args.execute(),
        Commands::Graphviz(args) => args.execute(),
        Commands::CopyImages(args) => args.execute(),
        Commands::Mkdocs(args) => args.execute(),
        Commands::Latex(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["mdtome", "superlinks", "docs", "--relative"]).unwrap();
        assert!(matches!(cli.command, Commands::Superlinks(_)));

        let cli = Cli::try_parse_from(["mdtome", "copy-images", "docs", "images", "out"]).unwrap();
        assert!(matches!(cli.command, Commands::CopyImages(_)));

        let cli =
            Cli::try_parse_from(["mdtome", "latex", "--config", "p.yml", "docs", "book.tex"])
                .unwrap();
        assert!(matches!(cli.command, Commands::Latex(_)));
    }
}
