//! `mdtome mkdocs` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdtome_config::ProjectConfig;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the mkdocs command.
#[derive(Args)]
pub(crate) struct MkdocsArgs {
    /// Project config file.
    #[arg(short, long)]
    config: PathBuf,

    /// Path for the generated mkdocs configuration.
    output: PathBuf,
}

impl MkdocsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = ProjectConfig::load(&self.config)?;
        config.save_mkdocs(&self.output)?;
        output.success(&format!("Wrote mkdocs config to {}", self.output.display()));
        Ok(())
    }
}
