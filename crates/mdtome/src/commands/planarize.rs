//! `mdtome planarize` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdtome_corpus::{planarize, planarize_with_nav};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the planarize command.
#[derive(Args)]
pub(crate) struct PlanarizeArgs {
    /// Input corpus directory, or a project config with `--config`.
    input: PathBuf,

    /// Output directory, or the path for the rewritten config.
    output: PathBuf,

    /// Treat both paths as project config files: flatten the docs dir next
    /// to the input config and rewrite the navigation tree.
    #[arg(long)]
    config: bool,
}

impl PlanarizeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        if self.config {
            planarize_with_nav(&self.input, &self.output)?;
            output.success(&format!(
                "Planarized project into {}",
                self.output.display()
            ));
        } else {
            let renames = planarize(&self.input, &self.output)?;
            output.success(&format!(
                "Flattened {} documents into {}",
                renames.len(),
                self.output.display()
            ));
        }
        Ok(())
    }
}
