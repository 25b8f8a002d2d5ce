//! `mdtome snippets` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdtome_corpus::inline_snippets;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the snippets command.
#[derive(Args)]
pub(crate) struct SnippetsArgs {
    /// Corpus directory, rewritten in place.
    dir: PathBuf,
}

impl SnippetsArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        inline_snippets(&self.dir)?;
        output.success(&format!("Inlined snippets in {}", self.dir.display()));
        Ok(())
    }
}
