//! Graphviz rendering.
//!
//! Every `<graphviz>` tag holds a DOT description. The pass renders each
//! distinct description to a PNG named by a content hash, so identical
//! graphs share one file and unchanged graphs are never re-rendered, then
//! replaces the tag with a paragraph holding the image reference.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use mdtome_ast::{write_json_file, Node, NodeKind};
use mdtome_corpus::read_corpus;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::DiagramError;

/// Render every graph under `root` into `image_dir` and rewrite the
/// documents to reference the rendered files.
pub fn render_graphs(root: &Path, image_dir: &Path) -> Result<(), DiagramError> {
    let mut corpus = read_corpus(root)?;

    // One render per distinct graph; the first document declaring it
    // gets the blame if rendering fails.
    let mut pending: BTreeMap<String, (String, PathBuf)> = BTreeMap::new();
    for (path, doc) in &corpus {
        doc.walk(&mut |node| {
            if node.is_tag("graphviz") {
                pending
                    .entry(image_name(&node.literal))
                    .or_insert_with(|| (node.literal.clone(), path.clone()));
            }
        });
    }
    if pending.is_empty() {
        return Ok(());
    }

    fs::create_dir_all(image_dir).map_err(|source| DiagramError::Write {
        path: image_dir.to_path_buf(),
        source,
    })?;
    let results: Vec<Result<(), DiagramError>> = pending
        .par_iter()
        .map(|(name, (graph, origin))| render_png(graph, &image_dir.join(name), origin))
        .collect();
    for result in results {
        result?;
    }

    let mut changed = Vec::new();
    for (index, (_, doc)) in corpus.iter_mut().enumerate() {
        let mut dirty = false;
        doc.walk_mut(&mut |node| {
            if node.is_tag("graphviz") {
                *node = replacement(&node.literal);
                dirty = true;
            }
        });
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

/// File name for a graph, derived from a hash of its description.
fn image_name(graph: &str) -> String {
    let hash = hex::encode(Sha256::digest(graph.as_bytes()));
    format!("diagram_{}.png", &hash[..12])
}

fn replacement(graph: &str) -> Node {
    let image = Node::new(NodeKind::Image).with_attr("src", format!("img/{}", image_name(graph)));
    Node::with_children(NodeKind::Paragraph, vec![image])
}

fn render_png(graph: &str, target: &Path, origin: &Path) -> Result<(), DiagramError> {
    if target.exists() {
        debug!("Skip rendering {}", target.display());
        return Ok(());
    }

    let spawn_error = |source| DiagramError::Spawn {
        path: origin.to_path_buf(),
        source,
    };
    let mut child = Command::new("dot")
        .arg("-Tpng")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(graph.as_bytes()).map_err(spawn_error)?;
    }
    let output = child.wait_with_output().map_err(spawn_error)?;
    if !output.status.success() {
        return Err(DiagramError::Render {
            path: origin.to_path_buf(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }
    fs::write(target, &output.stdout).map_err(|source| DiagramError::Write {
        path: target.to_path_buf(),
        source,
    })
}
