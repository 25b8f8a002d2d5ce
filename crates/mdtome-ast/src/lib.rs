//! Document tree model for the mdtome pipeline.
//!
//! Every stage of the pipeline operates on one data type: [`Node`], a tagged
//! tree with a kind, optional children, an optional literal payload, and a
//! string attribute map. Parsed documents are persisted between stages as
//! JSON (see [`read_json_file`] / [`write_json_file`]); the wire format omits
//! empty fields, so trees survive an encode/decode cycle unchanged.
//!
//! # Quick Start
//!
//! ```
//! use mdtome_ast::{Node, NodeKind};
//!
//! let doc = Node::with_children(
//!     NodeKind::Document,
//!     vec![Node::with_children(NodeKind::Paragraph, vec![Node::text("Hello")])],
//! );
//!
//! let json = mdtome_ast::to_json(&doc).unwrap();
//! assert_eq!(mdtome_ast::from_json(&json).unwrap(), doc);
//! ```

mod json;
mod node;

pub use json::{from_json, read_json_file, to_json, write_json_file, AstError};
pub use node::{Node, NodeKind};
