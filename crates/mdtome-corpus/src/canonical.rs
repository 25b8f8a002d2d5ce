//! Canonical identity attributes.
//!
//! Stamps each document with where it lives and what it is called:
//! `canonical` (root-relative path), `title` (first level-1 heading), and
//! `path` (slugified transliteration of the title). Downstream site tooling
//! reads these instead of re-deriving them. Documents without a level-1
//! heading are left alone.

use std::path::Path;

use mdtome_ast::write_json_file;
use tracing::debug;

use crate::error::CorpusError;
use crate::translit::{slugify, transliterate};
use crate::walk::{document_name, read_corpus};

/// Stamp canonical attributes onto every document under `root`, rewriting
/// changed files in place.
pub fn add_canonical(root: &Path) -> Result<(), CorpusError> {
    let mut corpus = read_corpus(root)?;

    let mut changed = Vec::new();
    for (index, (path, doc)) in corpus.iter_mut().enumerate() {
        let Some(title) = doc.heading_title() else {
            debug!("No level-1 heading in {}, skipping", path.display());
            continue;
        };
        let title = title.to_owned();
        let name = document_name(root, path);
        doc.attributes.insert("canonical".to_owned(), name);
        doc.attributes
            .insert("path".to_owned(), slugify(&transliterate(&title)));
        doc.attributes.insert("title".to_owned(), title);
        changed.push(index);
    }
    for index in changed {
        let (path, doc) = &corpus[index];
        write_json_file(path, doc)?;
    }
    Ok(())
}
