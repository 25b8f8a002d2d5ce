//! Parser and writer for the mdtome Markdown dialect.
//!
//! The dialect is a deliberately small subset of Markdown extended with a
//! few literal tags (`<snippet>`, `<include-snippet>`, `<link>`,
//! `<graphviz>`, …) that the corpus passes rewrite. Parsing is total: any
//! input produces a document tree, and unrecognized text degrades to
//! paragraphs rather than errors. Writing is the inverse over the parser's
//! image: re-parsing written output always reproduces the tree, and text the
//! writer itself produced round-trips byte for byte.
//!
//! # Quick Start
//!
//! ```
//! let doc = mdtome_markdown::parse("# Hello {#h1}\n\nWorld\n");
//! assert_eq!(mdtome_markdown::write(&doc), "# Hello {#h1}\n\nWorld\n");
//! ```
//!
//! Supported constructs: front matter, ATX headings with `{#id}` suffixes,
//! paragraphs, `* ` lists with four-space nested blocks, `!!! ` admonitions,
//! fenced code, pipe tables, comments, bold/emphasis/code spans, links,
//! images, and the tag shapes above.

mod cursor;
mod inline;
mod parser;
mod writer;

pub use parser::parse;
pub use writer::write;
