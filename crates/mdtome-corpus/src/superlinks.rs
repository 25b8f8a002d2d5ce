//! Corpus-wide anchor link resolution.
//!
//! Documents link to each other by heading anchor, not by path: a
//! `<link anchor="x">` tag points at whichever document declares heading id
//! `x`. The pass collects every heading id in the corpus, validates
//! uniqueness, then retypes each link tag to a `Link` node with a concrete
//! `href`. The whole corpus is validated in memory before any file is
//! rewritten, so a failed run leaves the tree untouched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mdtome_ast::{Node, NodeKind, write_json_file};

use crate::error::CorpusError;
use crate::walk::{document_name, read_corpus};

/// How a resolved anchor turns into an `href`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkPolicy {
    /// Bare corpus-relative target, `<target>.md`. The writer appends the
    /// `#anchor` fragment on emission.
    #[default]
    TargetFile,
    /// Path from the origin document's directory to the target document.
    RelativeToOrigin,
}

impl LinkPolicy {
    fn href(self, origin: &str, target: &str) -> String {
        match self {
            Self::TargetFile => format!("{target}.md"),
            Self::RelativeToOrigin => relative_href(origin, target),
        }
    }
}

/// Resolve every anchor link under `root`, rewriting changed files in
/// place.
pub fn resolve(root: &Path, policy: LinkPolicy) -> Result<(), CorpusError> {
    let mut corpus = read_corpus(root)?;
    let headings = collect_headings(root, &corpus)?;

    let mut changed = Vec::new();
    for (index, (path, doc)) in corpus.iter_mut().enumerate() {
        let origin = document_name(root, path);
        let mut dirty = false;
        doc.try_walk_mut(&mut |node| {
            rewrite_link(node, &headings, policy, &origin, path, &mut dirty)
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

/// Register every heading id in the corpus, in sorted path order, erroring
/// on the first id declared twice.
fn collect_headings(
    root: &Path,
    corpus: &[(PathBuf, Node)],
) -> Result<BTreeMap<String, String>, CorpusError> {
    let mut headings: BTreeMap<String, String> = BTreeMap::new();
    for (path, doc) in corpus {
        let name = document_name(root, path);
        let mut found = Vec::new();
        doc.walk(&mut |node| {
            if node.kind == NodeKind::Heading {
                if let Some(id) = node.attr("id") {
                    found.push(id.to_owned());
                }
            }
        });
        for id in found {
            if let Some(first) = headings.get(&id) {
                return Err(CorpusError::DuplicateHeading {
                    id,
                    first: first.clone(),
                    second: name,
                });
            }
            headings.insert(id, name.clone());
        }
    }
    Ok(headings)
}

fn rewrite_link(
    node: &mut Node,
    headings: &BTreeMap<String, String>,
    policy: LinkPolicy,
    origin: &str,
    path: &Path,
    dirty: &mut bool,
) -> Result<(), CorpusError> {
    let eligible =
        node.is_tag("link") || (node.kind == NodeKind::Link && node.attr("href").is_none());
    if !eligible {
        return Ok(());
    }
    let Some(anchor) = node.attr("anchor") else {
        return Ok(());
    };
    let Some(target) = headings.get(anchor) else {
        return Err(CorpusError::UnresolvedAnchor {
            anchor: anchor.to_owned(),
            path: path.to_path_buf(),
        });
    };
    let href = policy.href(origin, target);
    node.kind = NodeKind::Link;
    node.attributes.remove("tag");
    node.attributes.insert("href".to_owned(), href);
    *dirty = true;
    Ok(())
}

/// `../`-style path from the origin document's directory to the target
/// document file.
fn relative_href(origin: &str, target: &str) -> String {
    let origin_parts: Vec<&str> = origin.split('/').collect();
    let target_parts: Vec<&str> = target.split('/').collect();
    let origin_dir = &origin_parts[..origin_parts.len() - 1];
    let target_dir = &target_parts[..target_parts.len() - 1];

    let common = origin_dir
        .iter()
        .zip(target_dir.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<&str> = Vec::new();
    for _ in common..origin_dir.len() {
        segments.push("..");
    }
    segments.extend(&target_parts[common..]);
    format!("{}.md", segments.join("/"))
}
