//! Project configuration for mdtome.
//!
//! The project file is the YAML layout used by the original toolchain:
//! `title`, `src_dir`, a `chapters` navigation tree, optional
//! `preprocessors` (the macro mapping lives there), and a `backend_config`
//! section carrying backend-specific fragments. The file is loaded into a
//! schemaless value tree with typed accessors on top, because real project
//! files carry arbitrary extra keys that must survive a load/save cycle.
//!
//! `!include <path>` tags anywhere in the tree are resolved at load time
//! relative to the config file's directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config root must be a mapping")]
    NotAMapping,

    #[error("Unexpected navigation item: {0}")]
    Nav(String),
}

/// A loaded project configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    root: Value,
}

impl ProjectConfig {
    /// Load a config file, resolving `!include` tags relative to its
    /// directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut root: Value = serde_yaml::from_str(&text)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        resolve_includes(&mut root, base)?;
        Self::from_value(root)
    }

    /// Wrap an already-parsed value tree.
    pub fn from_value(root: Value) -> Result<Self, ConfigError> {
        if root.as_mapping().is_none() {
            return Err(ConfigError::NotAMapping);
        }
        Ok(Self { root })
    }

    /// The underlying value tree.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Project title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.root.get("title").and_then(Value::as_str)
    }

    /// Source directory holding the Markdown corpus. Checks `src_dir`
    /// first, then `docs_dir`, and defaults to `src`.
    #[must_use]
    pub fn docs_dir(&self) -> &str {
        self.root
            .get("src_dir")
            .or_else(|| self.root.get("docs_dir"))
            .and_then(Value::as_str)
            .unwrap_or("src")
    }

    /// The navigation tree, if present. Project files call it `chapters`;
    /// mkdocs-shaped files call it `nav`.
    #[must_use]
    pub fn chapters(&self) -> Option<&Value> {
        self.root.get("chapters").or_else(|| self.root.get("nav"))
    }

    /// The macro substitution table.
    ///
    /// Collected from a top-level `macros` mapping and from every
    /// `preprocessors` entry carrying a `macros` key (with or without the
    /// nested `macros` option mapping the original preprocessor used).
    #[must_use]
    pub fn macros(&self) -> BTreeMap<String, String> {
        let mut macros = BTreeMap::new();
        if let Some(table) = self.root.get("macros").and_then(Value::as_mapping) {
            collect_macro_table(table, &mut macros);
        }
        let entries = self
            .root
            .get("preprocessors")
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for entry in entries {
            let Some(options) = entry.get("macros") else {
                continue;
            };
            let Some(options) = options.as_mapping() else {
                continue;
            };
            match options.get("macros").and_then(Value::as_mapping) {
                Some(nested) => collect_macro_table(nested, &mut macros),
                None => collect_macro_table(options, &mut macros),
            }
        }
        macros
    }

    /// Rewrite every `*.md` string in the navigation tree through the
    /// rename map. A `*.md` entry missing from the map is an error (the nav
    /// references a document the corpus does not contain); strings without
    /// the suffix pass through; anything that is not a sequence, mapping,
    /// or string is an error.
    pub fn rename_chapters(
        &mut self,
        renames: &BTreeMap<String, String>,
    ) -> Result<(), ConfigError> {
        let nav = match self.root.get_mut("chapters") {
            Some(chapters) => Some(chapters),
            None => self.root.get_mut("nav"),
        };
        match nav {
            Some(nav) => rename_nav(nav, renames),
            None => Ok(()),
        }
    }

    /// Build the mkdocs configuration: the `backend_config.mkdocs."mkdocs.yml"`
    /// fragment (or an empty mapping) with `site_name` and `nav` filled in
    /// from the project.
    pub fn to_mkdocs(&self) -> Result<Value, ConfigError> {
        let mut mkdocs = self
            .root
            .get("backend_config")
            .and_then(|backend| backend.get("mkdocs"))
            .and_then(|mkdocs| mkdocs.get("mkdocs.yml"))
            .cloned()
            .unwrap_or_else(|| Value::Mapping(Mapping::new()));
        let Some(map) = mkdocs.as_mapping_mut() else {
            return Err(ConfigError::NotAMapping);
        };
        if let Some(title) = self.title() {
            map.insert(Value::from("site_name"), Value::from(title));
        }
        if let Some(chapters) = self.chapters() {
            map.insert(Value::from("nav"), chapters.clone());
        }
        Ok(mkdocs)
    }

    /// Write the mkdocs configuration for this project to a file.
    pub fn save_mkdocs(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_yaml::to_string(&self.to_mkdocs()?)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize back to YAML text.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Write the config to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = self.to_yaml()?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn collect_macro_table(table: &Mapping, macros: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let Some(key) = key.as_str() else { continue };
        if key == "macros" {
            continue;
        }
        if let Some(value) = scalar_to_string(value) {
            macros.insert(key.to_owned(), value);
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Replace `!include <path>` tags by the parsed content of the referenced
/// file, recursively.
fn resolve_includes(value: &mut Value, base: &Path) -> Result<(), ConfigError> {
    match value {
        Value::Tagged(tagged) if is_include_tag(&tagged.tag) => {
            let target = tagged
                .value
                .as_str()
                .map(|rel| base.join(rel))
                .ok_or_else(|| ConfigError::Nav("!include expects a path".to_owned()))?;
            let text = fs::read_to_string(&target).map_err(|source| ConfigError::Read {
                path: target.clone(),
                source,
            })?;
            let mut included: Value = serde_yaml::from_str(&text)?;
            let nested_base = target.parent().unwrap_or(base).to_path_buf();
            resolve_includes(&mut included, &nested_base)?;
            *value = included;
        }
        Value::Sequence(items) => {
            for item in items {
                resolve_includes(item, base)?;
            }
        }
        Value::Mapping(map) => {
            for (_, item) in map.iter_mut() {
                resolve_includes(item, base)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn is_include_tag(tag: &serde_yaml::value::Tag) -> bool {
    tag.to_string().trim_start_matches('!') == "include"
}

fn rename_nav(value: &mut Value, renames: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    match value {
        Value::Sequence(items) => {
            for item in items {
                rename_nav(item, renames)?;
            }
            Ok(())
        }
        Value::Mapping(map) => {
            for (_, item) in map.iter_mut() {
                rename_nav(item, renames)?;
            }
            Ok(())
        }
        Value::String(chapter) => {
            if chapter.ends_with(".md") {
                match renames.get(chapter.as_str()) {
                    Some(renamed) => *chapter = renamed.clone(),
                    None => {
                        return Err(ConfigError::Nav(format!(
                            "Unknown navigation item {chapter}"
                        )));
                    }
                }
            }
            Ok(())
        }
        other => Err(ConfigError::Nav(format!("{other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(text: &str) -> ProjectConfig {
        ProjectConfig::from_value(serde_yaml::from_str(text).unwrap()).unwrap()
    }

    #[test]
    fn test_title_and_docs_dir() {
        let cfg = config("title: My Book\nsrc_dir: docs");
        assert_eq!(cfg.title(), Some("My Book"));
        assert_eq!(cfg.docs_dir(), "docs");
    }

    #[test]
    fn test_docs_dir_defaults_to_src() {
        assert_eq!(config("title: T").docs_dir(), "src");
    }

    #[test]
    fn test_docs_dir_falls_back_to_mkdocs_key() {
        assert_eq!(config("docs_dir: content").docs_dir(), "content");
    }

    #[test]
    fn test_root_must_be_mapping() {
        let err = ProjectConfig::from_value(serde_yaml::from_str("- a\n- b").unwrap());
        assert!(err.is_err());
    }

    #[test]
    fn test_macros_from_preprocessors() {
        let cfg = config(
            "preprocessors:\n  - flatten\n  - macros:\n      macros:\n        version: \"1.2\"\n        host: example.com\n",
        );
        let macros = cfg.macros();
        assert_eq!(macros.get("version").map(String::as_str), Some("1.2"));
        assert_eq!(macros.get("host").map(String::as_str), Some("example.com"));
    }

    #[test]
    fn test_macros_without_nested_option_mapping() {
        let cfg = config("preprocessors:\n  - macros:\n      host: example.com\n");
        assert_eq!(
            cfg.macros().get("host").map(String::as_str),
            Some("example.com")
        );
    }

    #[test]
    fn test_macros_from_top_level_table() {
        let cfg = config("macros:\n  answer: 42\n");
        assert_eq!(cfg.macros().get("answer").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_macros_empty_when_absent() {
        assert!(config("title: T").macros().is_empty());
    }

    #[test]
    fn test_rename_chapters_walks_nested_nav() {
        let mut cfg = config(
            "chapters:\n  - intro.md\n  - Guide:\n      - one/first.md\n      - keep.txt\n",
        );
        let mut renames = BTreeMap::new();
        renames.insert("intro.md".to_owned(), "overview.md".to_owned());
        renames.insert("one/first.md".to_owned(), "first-chapter.md".to_owned());
        cfg.rename_chapters(&renames).unwrap();

        let chapters = serde_yaml::to_string(cfg.chapters().unwrap()).unwrap();
        assert!(chapters.contains("overview.md"));
        assert!(chapters.contains("first-chapter.md"));
        assert!(chapters.contains("keep.txt"));
        assert!(!chapters.contains("intro.md"));
    }

    #[test]
    fn test_rename_chapters_rejects_unmapped_md_entry() {
        let mut cfg = config("chapters:\n  - solo.md\n");
        let err = cfg.rename_chapters(&BTreeMap::new()).unwrap_err();
        assert!(err.to_string().contains("solo.md"));
    }

    #[test]
    fn test_rename_chapters_rejects_unknown_shapes() {
        let mut cfg = config("chapters:\n  - 7\n");
        let err = cfg.rename_chapters(&BTreeMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Nav(_)));
    }

    #[test]
    fn test_rename_chapters_accepts_nav_key() {
        let mut cfg = config("nav:\n  - page.md\n");
        let mut renames = BTreeMap::new();
        renames.insert("page.md".to_owned(), "p.md".to_owned());
        cfg.rename_chapters(&renames).unwrap();
        let nav = serde_yaml::to_string(cfg.chapters().unwrap()).unwrap();
        assert!(nav.contains("p.md"));
    }

    #[test]
    fn test_rename_chapters_without_nav_is_noop() {
        let mut cfg = config("title: T");
        cfg.rename_chapters(&BTreeMap::new()).unwrap();
    }

    #[test]
    fn test_to_mkdocs_sets_site_name_and_nav() {
        let cfg = config("title: Handbook\nchapters:\n  - index.md\n");
        let mkdocs = cfg.to_mkdocs().unwrap();
        assert_eq!(
            mkdocs.get("site_name").and_then(Value::as_str),
            Some("Handbook")
        );
        assert!(mkdocs.get("nav").is_some());
    }

    #[test]
    fn test_to_mkdocs_starts_from_backend_fragment() {
        let cfg = config(
            "title: T\nbackend_config:\n  mkdocs:\n    mkdocs.yml:\n      theme: material\n",
        );
        let mkdocs = cfg.to_mkdocs().unwrap();
        assert_eq!(mkdocs.get("theme").and_then(Value::as_str), Some("material"));
        assert_eq!(mkdocs.get("site_name").and_then(Value::as_str), Some("T"));
    }

    #[test]
    fn test_save_mkdocs_writes_loadable_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config("title: Handbook\nchapters:\n  - index.md\n");
        let path = dir.path().join("mkdocs.yml");
        cfg.save_mkdocs(&path).unwrap();

        let written: Value = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written.get("site_name").and_then(Value::as_str),
            Some("Handbook")
        );
        assert!(written.get("nav").is_some());
    }

    #[test]
    fn test_load_resolves_includes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("chapters.yml"), "- intro.md\n- guide.md\n").unwrap();
        let config_path = dir.path().join("project.yml");
        fs::write(&config_path, "title: T\nchapters: !include chapters.yml\n").unwrap();

        let cfg = ProjectConfig::load(&config_path).unwrap();
        let chapters = cfg.chapters().unwrap().as_sequence().unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].as_str(), Some("intro.md"));
    }

    #[test]
    fn test_load_resolves_nested_includes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("inner.yml"), "- deep.md\n").unwrap();
        fs::write(dir.path().join("outer.yml"), "sub: !include inner.yml\n").unwrap();
        let config_path = dir.path().join("project.yml");
        fs::write(&config_path, "tree: !include outer.yml\n").unwrap();

        let cfg = ProjectConfig::load(&config_path).unwrap();
        let deep = cfg
            .as_value()
            .get("tree")
            .and_then(|t| t.get("sub"))
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(deep[0].as_str(), Some("deep.md"));
    }

    #[test]
    fn test_load_missing_include_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("project.yml");
        fs::write(&config_path, "chapters: !include missing.yml\n").unwrap();

        let err = ProjectConfig::load(&config_path).unwrap_err();
        assert!(err.to_string().contains("missing.yml"));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = ProjectConfig::load(Path::new("/nonexistent/project.yml")).unwrap_err();
        assert!(err.to_string().contains("project.yml"));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config("title: T\nchapters:\n  - a.md\n");
        let path = dir.path().join("out.yml");
        cfg.save(&path).unwrap();
        assert_eq!(ProjectConfig::load(&path).unwrap(), cfg);
    }
}
