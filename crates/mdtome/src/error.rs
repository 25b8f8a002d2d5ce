//! CLI error types.

use mdtome_config::ConfigError;
use mdtome_corpus::CorpusError;
use mdtome_diagrams::DiagramError;
use mdtome_latex::LatexError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Corpus(#[from] CorpusError),

    #[error("{0}")]
    Diagram(#[from] DiagramError),

    #[error("{0}")]
    Latex(#[from] LatexError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
