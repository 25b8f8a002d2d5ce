//! LaTeX book backend.
//!
//! Turns a processed corpus into a LaTeX body: `merge` folds the
//! navigation tree and every document it references into one tree, and
//! `writer` renders that tree as LaTeX sectioning, environments, and
//! inline commands. The output slots into a standalone preamble that
//! loads `minted` and `hyperref`.

mod merge;
mod writer;

pub use merge::merge_corpus;
pub use writer::latex;

/// Errors from the LaTeX backend.
#[derive(Debug, thiserror::Error)]
pub enum LatexError {
    #[error(transparent)]
    Ast(#[from] mdtome_ast::AstError),

    #[error("Unexpected navigation item: {0}")]
    Nav(String),
}
