//! `mdtome canonical` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdtome_corpus::add_canonical;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the canonical command.
#[derive(Args)]
pub(crate) struct CanonicalArgs {
    /// Corpus directory, rewritten in place.
    dir: PathBuf,
}

impl CanonicalArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        add_canonical(&self.dir)?;
        output.success(&format!(
            "Stamped canonical attributes in {}",
            self.dir.display()
        ));
        Ok(())
    }
}
