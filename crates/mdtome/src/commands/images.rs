//! `mdtome copy-images` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdtome_diagrams::copy_images;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the copy-images command.
#[derive(Args)]
pub(crate) struct ImagesArgs {
    /// Corpus directory.
    dir: PathBuf,

    /// Directory holding the source images.
    images: PathBuf,

    /// Output directory for the copied images.
    output: PathBuf,
}

impl ImagesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        copy_images(&self.dir, &self.images, &self.output)?;
        output.success(&format!(
            "Copied referenced images into {}",
            self.output.display()
        ));
        Ok(())
    }
}
