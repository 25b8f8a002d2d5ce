//! Whole-corpus conversion between Markdown text and persisted trees.
//!
//! `parse_corpus` is the pipeline's entry stage and `render_corpus` its
//! exit: everything in between operates on the persisted trees. Parsing is
//! per-file independent and runs on the rayon pool; failures surface in
//! sorted path order.

use std::fs;
use std::path::{Path, PathBuf};

use mdtome_ast::write_json_file;
use rayon::prelude::*;

use crate::error::CorpusError;
use crate::walk::{list_markdown_files, read_corpus};

/// Parse every `.md` file under `input` and persist the trees under
/// `output` at the same relative paths.
pub fn parse_corpus(input: &Path, output: &Path) -> Result<(), CorpusError> {
    let files = list_markdown_files(input)?;
    let results: Vec<Result<(), CorpusError>> = files
        .par_iter()
        .map(|path| parse_file(path, input, output))
        .collect();
    results.into_iter().collect()
}

fn parse_file(path: &Path, input: &Path, output: &Path) -> Result<(), CorpusError> {
    let text = fs::read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = mdtome_markdown::parse(&text);
    let target = relocate(path, input, output);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| CorpusError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(write_json_file(&target, &doc)?)
}

/// Render every persisted tree under `input` back to Markdown text under
/// `output` at the same relative paths.
pub fn render_corpus(input: &Path, output: &Path) -> Result<(), CorpusError> {
    for (path, doc) in read_corpus(input)? {
        let target = relocate(&path, input, output);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| CorpusError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&target, mdtome_markdown::write(&doc)).map_err(|source| CorpusError::Write {
            path: target.clone(),
            source,
        })?;
    }
    Ok(())
}

fn relocate(path: &Path, input: &Path, output: &Path) -> PathBuf {
    output.join(path.strip_prefix(input).unwrap_or(path))
}
