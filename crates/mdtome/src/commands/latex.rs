//! `mdtome latex` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use mdtome_config::ProjectConfig;
use mdtome_latex::{latex, merge_corpus};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the latex command.
#[derive(Args)]
pub(crate) struct LatexArgs {
    /// Project config file carrying the navigation tree.
    #[arg(short, long)]
    config: PathBuf,

    /// Directory of processed document trees.
    dir: PathBuf,

    /// Path for the generated LaTeX body.
    output: PathBuf,
}

impl LatexArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = ProjectConfig::load(&self.config)?;
        let merged = merge_corpus(&config, &self.dir)?;
        fs::write(&self.output, latex(&merged))?;
        output.success(&format!("Wrote LaTeX body to {}", self.output.display()));
        Ok(())
    }
}
