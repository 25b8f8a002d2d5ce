//! Error types for corpus passes.

use std::path::PathBuf;

use mdtome_ast::AstError;
use mdtome_config::ConfigError;

use crate::macros::MacroError;

/// Errors raised by the corpus passes.
///
/// Every validation error names the offending file (both files, for
/// duplicate declarations) so a failed run points straight at the source.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Ast(#[from] AstError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Heading {id} double declared in {first} and {second}")]
    DuplicateHeading {
        id: String,
        first: String,
        second: String,
    },

    #[error("Failed to find heading {anchor} for file {}", path.display())]
    UnresolvedAnchor { anchor: String, path: PathBuf },

    #[error("Snippet without id in {}", path.display())]
    SnippetWithoutId { path: PathBuf },

    #[error("Snippet {id} double declared in {} and {}", first.display(), second.display())]
    DuplicateSnippet {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to find snippet {id} for file {}", path.display())]
    UnknownSnippet { id: String, path: PathBuf },

    #[error("{source} in file {}", path.display())]
    Macro { path: PathBuf, source: MacroError },

    #[error("No heading and title in {}", path.display())]
    NoHeading { path: PathBuf },

    #[error("Documents {first} and {second} both flatten to {id}.md")]
    DuplicateFlatId {
        id: String,
        first: String,
        second: String,
    },
}
