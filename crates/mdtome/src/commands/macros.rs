//! `mdtome macros` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdtome_config::ProjectConfig;
use mdtome_corpus::substitute_dir;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the macros command.
#[derive(Args)]
pub(crate) struct MacrosArgs {
    /// Directory of Markdown sources.
    input: PathBuf,

    /// Output directory for the substituted sources.
    output: PathBuf,

    /// Project config carrying the macro table.
    #[arg(short, long)]
    config: PathBuf,
}

impl MacrosArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = ProjectConfig::load(&self.config)?;
        let macros = config.macros();
        output.info(&format!(
            "{} macros from {}",
            macros.len(),
            self.config.display()
        ));
        substitute_dir(&self.input, &self.output, &macros)?;
        output.success(&format!(
            "Substituted macros into {}",
            self.output.display()
        ));
        Ok(())
    }
}
