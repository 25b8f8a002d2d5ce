//! JSON interchange for document trees.
//!
//! Trees persist between pipeline stages as compact JSON. Empty children,
//! literals, and attribute maps are omitted on the wire and restored as
//! empty defaults on read, so `from_json(to_json(tree)) == tree` holds for
//! every tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Node;

/// Errors from tree serialization and persistence.
#[derive(Debug, thiserror::Error)]
pub enum AstError {
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

    #[error("Invalid document tree in {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode document tree: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Serialize a tree to compact JSON.
pub fn to_json(node: &Node) -> Result<String, AstError> {
    Ok(serde_json::to_string(node)?)
}

/// Deserialize a tree from JSON text.
pub fn from_json(text: &str) -> Result<Node, AstError> {
    Ok(serde_json::from_str(text)?)
}

/// Read a persisted tree from a file.
pub fn read_json_file(path: &Path) -> Result<Node, AstError> {
    let text = fs::read_to_string(path).map_err(|source| AstError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AstError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist a tree to a file as compact JSON.
pub fn write_json_file(path: &Path, node: &Node) -> Result<(), AstError> {
    let text = to_json(node)?;
    fs::write(path, text).map_err(|source| AstError::Write {
        path: path.to_path_buf(),
        source,
    })
}
