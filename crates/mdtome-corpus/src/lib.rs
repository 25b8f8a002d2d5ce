//! Corpus-wide transformation passes.
//!
//! A corpus is a directory of persisted document trees (JSON payloads under
//! `.md` names, mirroring the source layout). Every pass here is
//! whole-corpus and fail-fast: collect what the pass needs from all files,
//! validate, then rewrite. A validation error anywhere aborts the run
//! before any file is modified, and files are always visited in sorted
//! path order so errors are deterministic.
//!
//! The passes:
//! - [`macros`]: raw-text `<m>NAME</m>` substitution, before parsing
//! - [`convert`]: parse Markdown text into trees and render trees back
//! - [`planarize`]: flatten a nested corpus into id-addressed files
//! - [`superlinks`]: resolve corpus-wide anchor links to concrete hrefs
//! - [`snippets`]: inline declared snippets at their references
//! - [`canonical`]: stamp canonical path/title/slug attributes
//!
//! Loading runs on the rayon pool; see [`read_corpus`].

mod canonical;
mod convert;
mod error;
mod macros;
mod planarize;
mod snippets;
mod superlinks;
mod translit;
mod walk;

pub use canonical::add_canonical;
pub use convert::{parse_corpus, render_corpus};
pub use error::CorpusError;
pub use macros::{MacroError, substitute, substitute_dir, substitute_file};
pub use planarize::{planarize, planarize_with_nav};
pub use snippets::inline as inline_snippets;
pub use superlinks::{LinkPolicy, resolve as resolve_superlinks};
pub use translit::{slugify, transliterate};
pub use walk::{list_markdown_files, read_corpus};
