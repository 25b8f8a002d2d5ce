//! Collateral assets for built corpora.
//!
//! Two passes that run after the text pipeline: `graphviz` renders every
//! embedded graph description to a PNG and swaps the tag for an image
//! reference, and `images` copies every image a corpus references into
//! the output tree.

use std::io;
use std::path::PathBuf;

mod graphviz;
mod images;

pub use graphviz::render_graphs;
pub use images::copy_images;

/// Errors from collateral processing.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error(transparent)]
    Corpus(#[from] mdtome_corpus::CorpusError),

    #[error(transparent)]
    Ast(#[from] mdtome_ast::AstError),

    #[error("Failed to run dot for {}: {source}", path.display())]
    Spawn { path: PathBuf, source: io::Error },

    #[error("Rendering graph from {} failed: {detail}", path.display())]
    Render { path: PathBuf, detail: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Image without src in {}", path.display())]
    ImageWithoutSrc { path: PathBuf },

    #[error("Invalid image link {src} in {}: {source}", path.display())]
    UnreadableImage {
        path: PathBuf,
        src: String,
        source: io::Error,
    },
}
