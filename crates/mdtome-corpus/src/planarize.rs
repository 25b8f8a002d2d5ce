//! Corpus flattening.
//!
//! A nested corpus becomes a single directory keyed by heading id: each
//! document is renamed to `<id>.md` after its first titled level-1 heading,
//! and the original path survives as a document attribute. The returned
//! rename map is the join key for navigation rewriting and document
//! merging.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use mdtome_ast::{Node, write_json_file};
use mdtome_config::ProjectConfig;

use crate::error::CorpusError;
use crate::walk::{document_name, read_corpus};

struct Flattened {
    renames: BTreeMap<String, String>,
    docs: Vec<(String, Node)>,
}

/// Validate and stage the whole corpus in memory. Nothing is written here,
/// so any error leaves the output untouched.
fn flatten(input: &Path) -> Result<Flattened, CorpusError> {
    let corpus = read_corpus(input)?;

    let mut renames = BTreeMap::new();
    let mut claimed: BTreeMap<String, String> = BTreeMap::new();
    let mut docs = Vec::new();
    for (path, mut doc) in corpus {
        let Some((title, id)) = doc.heading_with_id() else {
            return Err(CorpusError::NoHeading { path });
        };
        let (title, id) = (title.to_owned(), id.to_owned());
        let original = document_name(input, &path);
        if let Some(first) = claimed.get(&id) {
            return Err(CorpusError::DuplicateFlatId {
                id,
                first: first.clone(),
                second: original,
            });
        }
        claimed.insert(id.clone(), original.clone());

        doc.attributes.insert("original".to_owned(), original.clone());
        doc.attributes.insert("title".to_owned(), title);
        renames.insert(format!("{original}.md"), format!("{id}.md"));
        docs.push((id, doc));
    }
    Ok(Flattened { renames, docs })
}

fn write_flattened(output: &Path, docs: &[(String, Node)]) -> Result<(), CorpusError> {
    for (id, doc) in docs {
        let dest = output.join(format!("{id}.md"));
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| CorpusError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        write_json_file(&dest, doc)?;
    }
    Ok(())
}

/// Flatten every document under `input` into `output`, returning the
/// `original.md -> id.md` rename map.
///
/// A document without a titled level-1 heading, or two documents claiming
/// the same id, aborts the run before anything is written.
pub fn planarize(input: &Path, output: &Path) -> Result<BTreeMap<String, String>, CorpusError> {
    let flat = flatten(input)?;
    write_flattened(output, &flat.docs)?;
    Ok(flat.renames)
}

/// Flatten the corpus referenced by a project config and rewrite its
/// navigation tree through the rename map.
///
/// The docs directory is resolved relative to each config file, so the
/// flattened corpus lands next to the written config. Navigation entries
/// are validated against the rename map before any document is written.
pub fn planarize_with_nav(config_in: &Path, config_out: &Path) -> Result<(), CorpusError> {
    let mut config = ProjectConfig::load(config_in)?;
    let docs_dir = config.docs_dir().to_owned();
    let input = config_in.parent().unwrap_or(Path::new(".")).join(&docs_dir);
    let output = config_out.parent().unwrap_or(Path::new(".")).join(&docs_dir);

    let flat = flatten(&input)?;
    config.rename_chapters(&flat.renames)?;
    write_flattened(&output, &flat.docs)?;
    config.save(config_out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use mdtome_ast::{NodeKind, read_json_file};

    use super::*;

    fn titled(title: &str, id: &str) -> Node {
        Node::with_children(
            NodeKind::Document,
            vec![
                Node::with_literal(NodeKind::Heading, title)
                    .with_attr("level", "1")
                    .with_attr("id", id),
            ],
        )
    }

    fn write(dir: &Path, name: &str, doc: &Node) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        write_json_file(&path, doc).unwrap();
    }

    #[test]
    fn test_planarize_flattens_by_heading_id() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        write(&input, "guide/hello.md", &titled("Hello World", "hw"));
        write(&input, "index.md", &titled("Start", "start"));

        let renames = planarize(&input, &output).unwrap();

        assert_eq!(renames.get("guide/hello.md").map(String::as_str), Some("hw.md"));
        assert_eq!(renames.get("index.md").map(String::as_str), Some("start.md"));
        assert_eq!(renames.len(), 2);

        let flat = read_json_file(&output.join("hw.md")).unwrap();
        assert_eq!(flat.attr("original"), Some("guide/hello"));
        assert_eq!(flat.attr("title"), Some("Hello World"));
    }

    #[test]
    fn test_missing_heading_aborts_without_writes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        write(&input, "a.md", &titled("Ok", "ok"));
        write(
            &input,
            "bare.md",
            &Node::with_children(NodeKind::Document, vec![Node::text("no heading")]),
        );

        let err = planarize(&input, &output).unwrap_err();
        assert!(err.to_string().contains("No heading and title"));
        assert!(err.to_string().contains("bare.md"));
        assert!(!output.exists());
    }

    #[test]
    fn test_duplicate_id_names_both_originals() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        write(&input, "a.md", &titled("One", "same"));
        write(&input, "b.md", &titled("Two", "same"));

        let err = planarize(&input, &dir.path().join("out")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Documents a and b both flatten to same.md"
        );
    }

    #[test]
    fn test_planarize_with_nav_rewrites_chapters() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("flat");
        fs::create_dir_all(&out_dir).unwrap();
        write(
            &dir.path().join("src"),
            "guide/hello.md",
            &titled("Hello", "hw"),
        );
        let config_in = dir.path().join("project.yml");
        fs::write(
            &config_in,
            "title: Book\nsrc_dir: src\nchapters:\n  - Intro: guide/hello.md\n",
        )
        .unwrap();

        let config_out = out_dir.join("project.yml");
        planarize_with_nav(&config_in, &config_out).unwrap();

        let written = ProjectConfig::load(&config_out).unwrap();
        let chapters = written.chapters().unwrap().as_sequence().unwrap();
        let renamed = chapters[0]
            .as_mapping()
            .unwrap()
            .values()
            .next()
            .unwrap()
            .as_str()
            .unwrap();
        assert_eq!(renamed, "hw.md");
        assert!(out_dir.join("src/hw.md").exists());
    }

    #[test]
    fn test_planarize_with_nav_rejects_unknown_chapter() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("src"), "a.md", &titled("A", "a"));
        let config_in = dir.path().join("project.yml");
        fs::write(
            &config_in,
            "src_dir: src\nchapters:\n  - a.md\n  - phantom.md\n",
        )
        .unwrap();

        let out_config = dir.path().join("out/project.yml");
        let err = planarize_with_nav(&config_in, &out_config).unwrap_err();
        assert!(err.to_string().contains("phantom.md"));
        assert!(!dir.path().join("out").exists());
    }
}
