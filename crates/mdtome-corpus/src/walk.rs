//! Corpus discovery and loading.
//!
//! Passes consume a directory of persisted trees. Discovery is recursive and
//! the result is sorted, so every pass sees the corpus in the same order and
//! reports the same error for the same input regardless of filesystem
//! ordering. Loading is the expensive step (read plus JSON decode) and runs
//! on the rayon pool; errors are then surfaced in sorted path order.

use std::fs;
use std::path::{Path, PathBuf};

use mdtome_ast::{Node, read_json_file};
use rayon::prelude::*;

use crate::error::CorpusError;

/// Recursively collect every `.md` file under `root`, sorted by path.
pub fn list_markdown_files(root: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let mut files = Vec::new();
    collect_markdown_files(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_markdown_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), CorpusError> {
    let entries = fs::read_dir(dir).map_err(|source| CorpusError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| CorpusError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_markdown_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}

/// Load every persisted tree under `root` in parallel.
///
/// The result is ordered by sorted path. A read or decode failure anywhere
/// aborts the load; the error reported is the first in path order.
pub fn read_corpus(root: &Path) -> Result<Vec<(PathBuf, Node)>, CorpusError> {
    let files = list_markdown_files(root)?;
    let results: Vec<Result<(PathBuf, Node), CorpusError>> = files
        .into_par_iter()
        .map(|path| {
            let doc = read_json_file(&path)?;
            Ok((path, doc))
        })
        .collect();
    results.into_iter().collect()
}

/// Root-relative document name: the path under `root` with the `.md`
/// suffix removed. This is the identity used in heading registries, link
/// targets, and error messages.
pub(crate) fn document_name(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    rel.strip_suffix(".md").unwrap_or(&rel).to_owned()
}
