//! Corpus merging for book output.
//!
//! A site is many pages; a book is one stream. The merger walks the
//! navigation tree in order and produces a single document: every
//! navigation key becomes a heading at its nesting depth (top-level keys
//! are parts, the next level chapters) and every referenced document is
//! appended with its own headings demoted to sit under that structure.

use std::path::Path;

use mdtome_ast::{read_json_file, Node, NodeKind};
use mdtome_config::ProjectConfig;
use serde_yaml::Value;

use crate::LatexError;

/// Merge every document named by the project navigation into one tree,
/// in navigation order. `src_dir` is the directory the navigation paths
/// are relative to.
pub fn merge_corpus(config: &ProjectConfig, src_dir: &Path) -> Result<Node, LatexError> {
    let mut children = Vec::new();
    if let Some(chapters) = config.chapters() {
        merge_nav(chapters, src_dir, 0, &mut children)?;
    }
    Ok(Node::with_children(NodeKind::Document, children))
}

fn merge_nav(
    nav: &Value,
    src_dir: &Path,
    depth: usize,
    out: &mut Vec<Node>,
) -> Result<(), LatexError> {
    match nav {
        Value::Sequence(items) => {
            for item in items {
                merge_nav(item, src_dir, depth, out)?;
            }
            Ok(())
        }
        Value::Mapping(map) => {
            for (key, value) in map {
                if let Some(title) = key.as_str() {
                    out.push(
                        Node::with_literal(NodeKind::Heading, title)
                            .with_attr("level", depth.to_string()),
                    );
                }
                merge_nav(value, src_dir, depth + 1, out)?;
            }
            Ok(())
        }
        Value::String(entry) => {
            // Non-Markdown entries (attachments) have no place in the book.
            if entry.ends_with(".md") {
                let mut doc = read_json_file(&src_dir.join(entry))?;
                demote_headings(&mut doc, depth.saturating_sub(1));
                out.append(&mut doc.children);
            }
            Ok(())
        }
        other => Err(LatexError::Nav(format!("{other:?}"))),
    }
}

/// Push every heading in the tree down by `levels`. A document enters the
/// book with its level-1 heading sitting one step below the navigation key
/// above it.
fn demote_headings(node: &mut Node, levels: usize) {
    if levels == 0 {
        return;
    }
    node.walk_mut(&mut |node| {
        if node.kind == NodeKind::Heading {
            if let Some(level) = node.attr("level").and_then(|level| level.parse::<usize>().ok())
            {
                node.attributes
                    .insert("level".to_owned(), (level + levels).to_string());
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mdtome_ast::write_json_file;
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(title: &str, id: &str) -> Node {
        Node::with_children(
            NodeKind::Document,
            vec![
                Node::with_literal(NodeKind::Heading, title)
                    .with_attr("level", "1")
                    .with_attr("id", id),
                Node::with_children(NodeKind::Paragraph, vec![Node::text("body")]),
            ],
        )
    }

    fn config(text: &str) -> ProjectConfig {
        ProjectConfig::from_value(serde_yaml::from_str(text).unwrap()).unwrap()
    }

    #[test]
    fn test_flat_nav_keeps_document_levels() {
        let dir = tempfile::tempdir().unwrap();
        write_json_file(&dir.path().join("intro.md"), &page("Intro", "intro")).unwrap();

        let cfg = config("chapters:\n  - intro.md\n");
        let merged = merge_corpus(&cfg, dir.path()).unwrap();

        assert_eq!(merged.children.len(), 2);
        assert_eq!(merged.children[0].kind, NodeKind::Heading);
        assert_eq!(merged.children[0].attr("level"), Some("1"));
        assert_eq!(merged.children[0].literal, "Intro");
    }

    #[test]
    fn test_nav_keys_become_headings_by_depth() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("ops")).unwrap();
        write_json_file(&dir.path().join("ops/setup.md"), &page("Setup", "setup")).unwrap();

        let cfg = config("chapters:\n  - Operations:\n      - Basics:\n          - ops/setup.md\n");
        let merged = merge_corpus(&cfg, dir.path()).unwrap();

        let kinds: Vec<_> = merged
            .children
            .iter()
            .map(|node| (node.kind, node.attr("level").map(str::to_owned)))
            .collect();
        assert_eq!(kinds[0], (NodeKind::Heading, Some("0".to_owned())));
        assert_eq!(merged.children[0].literal, "Operations");
        assert_eq!(kinds[1], (NodeKind::Heading, Some("1".to_owned())));
        assert_eq!(merged.children[1].literal, "Basics");
        // The document's own level-1 heading lands under Basics.
        assert_eq!(kinds[2], (NodeKind::Heading, Some("2".to_owned())));
        assert_eq!(merged.children[2].literal, "Setup");
    }

    #[test]
    fn test_document_under_part_becomes_chapter() {
        let dir = tempfile::tempdir().unwrap();
        write_json_file(&dir.path().join("guide.md"), &page("Guide", "guide")).unwrap();

        let cfg = config("chapters:\n  - Manual:\n      - guide.md\n");
        let merged = merge_corpus(&cfg, dir.path()).unwrap();

        assert_eq!(merged.children[0].attr("level"), Some("0"));
        assert_eq!(merged.children[1].attr("level"), Some("1"));
        assert_eq!(merged.children[1].literal, "Guide");
    }

    #[test]
    fn test_non_markdown_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_json_file(&dir.path().join("a.md"), &page("A", "a")).unwrap();

        let cfg = config("chapters:\n  - a.md\n  - attachment.pdf\n");
        let merged = merge_corpus(&cfg, dir.path()).unwrap();
        assert_eq!(merged.children.len(), 2);
    }

    #[test]
    fn test_scalar_nav_item_is_rejected() {
        let cfg = config("chapters:\n  - 5\n");
        let err = merge_corpus(&cfg, Path::new(".")).unwrap_err();
        assert!(matches!(err, LatexError::Nav(_)));
    }

    #[test]
    fn test_missing_document_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config("chapters:\n  - gone.md\n");
        let err = merge_corpus(&cfg, dir.path()).unwrap_err();
        assert!(err.to_string().contains("gone.md"));
    }

    #[test]
    fn test_empty_nav_yields_empty_document() {
        let cfg = config("title: T");
        let merged = merge_corpus(&cfg, Path::new(".")).unwrap();
        assert!(merged.children.is_empty());
    }
}
