//! `mdtome superlinks` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdtome_corpus::{LinkPolicy, resolve_superlinks};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the superlinks command.
#[derive(Args)]
pub(crate) struct SuperlinksArgs {
    /// Corpus directory, rewritten in place.
    dir: PathBuf,

    /// Emit hrefs relative to the linking document instead of bare target
    /// paths.
    #[arg(long)]
    relative: bool,
}

impl SuperlinksArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let policy = if self.relative {
            LinkPolicy::RelativeToOrigin
        } else {
            LinkPolicy::TargetFile
        };
        resolve_superlinks(&self.dir, policy)?;
        output.success(&format!("Resolved anchor links in {}", self.dir.display()));
        Ok(())
    }
}
