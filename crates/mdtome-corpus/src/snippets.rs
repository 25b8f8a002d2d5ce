//! Snippet declaration and inlining.
//!
//! A `<snippet id="x">` tag declares a reusable block of content; an
//! `<include-snippet id="x"/>` tag pulls it in. The pass registers every
//! declaration in the corpus, then replaces each include by a `Snippet`
//! node carrying the declared content. Declarations stay in place, so the
//! pass is a fixed point: a second run finds nothing left to replace.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mdtome_ast::{Node, NodeKind, write_json_file};

use crate::error::CorpusError;
use crate::walk::read_corpus;

/// Inline every snippet reference under `root`, rewriting changed files in
/// place.
pub fn inline(root: &Path) -> Result<(), CorpusError> {
    let mut corpus = read_corpus(root)?;
    let snippets = collect_declarations(&corpus)?;

    let mut changed = Vec::new();
    for (index, (path, doc)) in corpus.iter_mut().enumerate() {
        let mut dirty = false;
        doc.try_walk_mut(&mut |node| {
            replace_include(node, &snippets, path, &mut dirty)
        })?;
        if dirty {
            changed.push(index);
        }
    }
    for index in changed {
        let (path, doc) = &corpus[index];
        write_json_file(path, doc)?;
    }
    Ok(())
}

/// Register every snippet declaration, in sorted path order. A declaration
/// without an id, or an id declared twice, is an error.
fn collect_declarations(
    corpus: &[(PathBuf, Node)],
) -> Result<BTreeMap<String, (String, PathBuf)>, CorpusError> {
    let mut snippets: BTreeMap<String, (String, PathBuf)> = BTreeMap::new();
    for (path, doc) in corpus {
        let mut found = Vec::new();
        let mut missing_id = false;
        doc.walk(&mut |node| {
            if node.is_tag("snippet") {
                match node.attr("id") {
                    Some(id) => found.push((id.to_owned(), node.literal.clone())),
                    None => missing_id = true,
                }
            }
        });
        if missing_id {
            return Err(CorpusError::SnippetWithoutId { path: path.clone() });
        }
        for (id, content) in found {
            if let Some((_, first)) = snippets.get(&id) {
                return Err(CorpusError::DuplicateSnippet {
                    id,
                    first: first.clone(),
                    second: path.clone(),
                });
            }
            snippets.insert(id, (content, path.clone()));
        }
    }
    Ok(snippets)
}

fn replace_include(
    node: &mut Node,
    snippets: &BTreeMap<String, (String, PathBuf)>,
    path: &Path,
    dirty: &mut bool,
) -> Result<(), CorpusError> {
    if !node.is_tag("include-snippet") {
        return Ok(());
    }
    let Some(id) = node.attr("id") else {
        return Ok(());
    };
    let Some((content, _)) = snippets.get(id) else {
        return Err(CorpusError::UnknownSnippet {
            id: id.to_owned(),
            path: path.to_path_buf(),
        });
    };
    node.kind = NodeKind::Snippet;
    node.attributes.remove("tag");
    node.literal = content.clone();
    *dirty = true;
    Ok(())
}
