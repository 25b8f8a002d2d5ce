//! CLI command implementations.

pub(crate) mod canonical;
pub(crate) mod convert;
pub(crate) mod graphviz;
pub(crate) mod images;
pub(crate) mod latex;
pub(crate) mod macros;
pub(crate) mod mkdocs;
pub(crate) mod planarize;
pub(crate) mod snippets;
pub(crate) mod superlinks;

pub(crate) use canonical::CanonicalArgs;
pub(crate) use convert::{ParseArgs, WriteArgs};
pub(crate) use graphviz::GraphvizArgs;
pub(crate) use images::ImagesArgs;
pub(crate) use latex::LatexArgs;
pub(crate) use macros::MacrosArgs;
pub(crate) use mkdocs::MkdocsArgs;
pub(crate) use planarize::PlanarizeArgs;
pub(crate) use snippets::SnippetsArgs;
pub(crate) use superlinks::SuperlinksArgs;
