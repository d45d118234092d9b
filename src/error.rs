//! Fatal errors raised while compiling the wait event catalog.
//!
//! Every variant aborts the run. Variants that come from the input text carry
//! the 1-based line number and the offending content so the diagnostic points
//! at the responsible line.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be opened or read.
    #[error("unable to read wait event catalog {}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A data line appeared before any `Section: ClassName` header.
    #[error("line {line}: record appears before any section header: {content}")]
    RecordOutsideSection { line: usize, content: String },

    /// A data line did not decompose into the expected columns.
    #[error("line {line}: unable to parse wait event record ({reason}): {content}")]
    MalformedRecord {
        line: usize,
        content: String,
        reason: String,
    },

    /// A non-exempt class holds an identifier lacking the required prefix.
    #[error(
        "line {line}: wait event {identifier} in class {class_name} must start with {prefix}"
    )]
    MissingPrefix {
        line: usize,
        class_name: String,
        identifier: String,
        prefix: String,
    },

    /// The same identifier was declared twice anywhere in the catalog.
    #[error("line {line}: duplicate wait event {identifier} (first declared on line {first_line})")]
    DuplicateIdentifier {
        line: usize,
        identifier: String,
        first_line: usize,
    },

    /// An artifact could not be staged, written or published.
    #[error("unable to publish {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CatalogError {
    pub(crate) fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        CatalogError::MalformedRecord {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }
}
