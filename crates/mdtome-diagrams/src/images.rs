//! Image collection.
//!
//! A built site ships only the images its documents actually reference.
//! The pass walks every tree, gathers the `src` of every image, and copies
//! those files from the image root into the output tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use mdtome_ast::{Node, NodeKind};
use mdtome_corpus::read_corpus;

use crate::DiagramError;

/// Copy every image referenced under `root` from `image_root` to
/// `out_dir`, preserving relative paths.
pub fn copy_images(root: &Path, image_root: &Path, out_dir: &Path) -> Result<(), DiagramError> {
    let corpus = read_corpus(root)?;

    let mut required = BTreeMap::new();
    for (path, doc) in &corpus {
        collect_sources(doc, path, &mut required)?;
    }

    for (src, path) in &required {
        let body =
            fs::read(image_root.join(src)).map_err(|source| DiagramError::UnreadableImage {
                path: path.clone(),
                src: src.clone(),
                source,
            })?;
        let dest = out_dir.join(src);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| DiagramError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&dest, body).map_err(|source| DiagramError::Write {
            path: dest.clone(),
            source,
        })?;
    }
    Ok(())
}

fn collect_sources(
    doc: &Node,
    path: &Path,
    sources: &mut BTreeMap<String, PathBuf>,
) -> Result<(), DiagramError> {
    let mut missing = false;
    doc.walk(&mut |node| {
        if node.kind == NodeKind::Image {
            match node.attr("src") {
                Some(src) => {
                    sources
                        .entry(src.to_owned())
                        .or_insert_with(|| path.to_path_buf());
                }
                None => missing = true,
            }
        }
    });
    if missing {
        return Err(DiagramError::ImageWithoutSrc {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
