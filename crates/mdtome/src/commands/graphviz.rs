//! `mdtome graphviz` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdtome_diagrams::render_graphs;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the graphviz command.
#[derive(Args)]
pub(crate) struct GraphvizArgs {
    /// Corpus directory, rewritten in place.
    dir: PathBuf,

    /// Directory receiving the rendered images.
    images: PathBuf,
}

impl GraphvizArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        render_graphs(&self.dir, &self.images)?;
        output.success(&format!("Rendered graphs into {}", self.images.display()));
        Ok(())
    }
}
