//! Raw-text macro substitution.
//!
//! Macros run before any parsing: `<m>NAME</m>` markers in the source text
//! are replaced by their configured values. Replacement values are inserted
//! verbatim and never re-scanned, so a value may itself contain marker
//! syntax without triggering another expansion.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::CorpusError;
use crate::walk::list_markdown_files;

const OPEN: &str = "<m>";
const CLOSE: &str = "</m>";

/// Substitution failures, wrapped with the file path by the directory pass.
#[derive(Debug, thiserror::Error)]
pub enum MacroError {
    #[error("Unmatched <m> tag")]
    Unterminated,

    #[error("Unknown macro '{0}'")]
    Unknown(String),
}

/// Replace every `<m>NAME</m>` marker in `text` with `macros[NAME]`.
///
/// An opening marker without a closing one, or a name missing from the
/// table, is an error.
pub fn substitute(text: &str, macros: &BTreeMap<String, String>) -> Result<String, MacroError> {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            return Err(MacroError::Unterminated);
        };
        let name = &after[..end];
        let value = macros
            .get(name)
            .ok_or_else(|| MacroError::Unknown(name.to_owned()))?;
        output.push_str(&rest[..start]);
        output.push_str(value);
        rest = &after[end + CLOSE.len()..];
    }
    output.push_str(rest);
    Ok(output)
}

/// Substitute one file, writing the result to `dest`.
pub fn substitute_file(
    src: &Path,
    dest: &Path,
    macros: &BTreeMap<String, String>,
) -> Result<(), CorpusError> {
    let text = fs::read_to_string(src).map_err(|source| CorpusError::Read {
        path: src.to_path_buf(),
        source,
    })?;
    let replaced = substitute(&text, macros).map_err(|source| CorpusError::Macro {
        path: src.to_path_buf(),
        source,
    })?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| CorpusError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(dest, replaced).map_err(|source| CorpusError::Write {
        path: dest.to_path_buf(),
        source,
    })
}

/// Substitute every `.md` file under `input`, mirroring the directory
/// layout under `output`.
pub fn substitute_dir(
    input: &Path,
    output: &Path,
    macros: &BTreeMap<String, String>,
) -> Result<(), CorpusError> {
    for src in list_markdown_files(input)? {
        let rel = src.strip_prefix(input).unwrap_or(&src);
        let dest = output.join(rel);
        substitute_file(&src, &dest, macros)?;
    }
    Ok(())
}
