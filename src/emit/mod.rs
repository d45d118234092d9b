//! Artifact rendering.
//!
//! An [`OutputMode`] selects which artifacts are rendered from a compiled
//! [`Catalog`]. Rendering is pure and deterministic; publishing is left to
//! [`crate::output`].

pub mod code;
pub mod docs;

use crate::catalog::Catalog;
use crate::config::GeneratorConfig;
use anyhow::{Result, bail};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Enumeration declarations plus lookup functions.
    Code,
    /// Reference tables.
    Docs,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Code => "code",
            OutputMode::Docs => "docs",
        }
    }

    /// Build the mode from the two mutually exclusive CLI switches.
    pub fn from_flags(code: bool, docs: bool) -> Result<Self> {
        match (code, docs) {
            (true, false) => Ok(OutputMode::Code),
            (false, true) => Ok(OutputMode::Docs),
            (true, true) => bail!("--code and --docs are mutually exclusive"),
            (false, false) => bail!("one of --code or --docs is required"),
        }
    }

    /// File names this mode publishes, in publish order.
    pub fn artifact_names<'a>(&self, config: &'a GeneratorConfig) -> Vec<&'a str> {
        match self {
            OutputMode::Code => vec![config.types_file.as_str(), config.lookup_file.as_str()],
            OutputMode::Docs => vec![config.docs_file.as_str()],
        }
    }
}

/// A rendered file waiting to be published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    file_name: String,
    contents: String,
}

impl Artifact {
    pub fn new(file_name: &str, contents: String) -> Self {
        Self {
            file_name: file_name.to_string(),
            contents,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn into_contents(self) -> String {
        self.contents
    }
}

/// Render every artifact of `mode`.
pub fn render(
    mode: OutputMode,
    catalog: &Catalog,
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, fmt::Error> {
    let artifacts = match mode {
        OutputMode::Code => vec![
            code::render_types_header(catalog, config)?,
            code::render_lookup_source(catalog, config)?,
        ],
        OutputMode::Docs => vec![docs::render_docs(catalog, config)?],
    };
    Ok(artifacts)
}
