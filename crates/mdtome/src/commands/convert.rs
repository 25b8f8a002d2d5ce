//! `mdtome parse` and `mdtome write` command implementations.

use std::path::PathBuf;

use clap::Args;
use mdtome_corpus::{parse_corpus, render_corpus};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the parse command.
#[derive(Args)]
pub(crate) struct ParseArgs {
    /// Directory of Markdown sources.
    input: PathBuf,

    /// Output directory for the parsed trees.
    output: PathBuf,
}

impl ParseArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        parse_corpus(&self.input, &self.output)?;
        output.success(&format!(
            "Parsed {} into {}",
            self.input.display(),
            self.output.display()
        ));
        Ok(())
    }
}

/// Arguments for the write command.
#[derive(Args)]
pub(crate) struct WriteArgs {
    /// Directory of persisted document trees.
    input: PathBuf,

    /// Output directory for the Markdown text.
    output: PathBuf,
}

impl WriteArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        render_corpus(&self.input, &self.output)?;
        output.success(&format!(
            "Wrote Markdown into {}",
            self.output.display()
        ));
        Ok(())
    }
}
