//! Wait event catalog wiring.
//!
//! The catalog is compiled in three stages: [`parser`] tags each data line
//! with its class, [`order`] imposes the single catalog-wide ordering, and
//! [`index`] validates the records and groups them by class. The result is an
//! immutable [`Catalog`] consumed by the emitters.

pub mod index;
pub mod order;
pub mod parser;

pub use index::build_catalog;
pub use order::sort_tagged_lines;
pub use parser::{TaggedLine, tag_lines};

use crate::config::GeneratorConfig;
use crate::error::{CatalogError, CatalogResult};
use std::fs;
use std::path::Path;
use tracing::info;

/// One validated catalog entry. Label and description are stored unquoted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitEventRecord {
    pub class_name: String,
    pub identifier: String,
    pub label: String,
    pub description: String,
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitClass {
    name: String,
    short_name: String,
    generates_code: bool,
    events: Vec<WaitEventRecord>,
}

impl WaitClass {
    pub(crate) fn new(name: String, short_name: String, generates_code: bool) -> Self {
        Self {
            name,
            short_name,
            generates_code,
            events: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: WaitEventRecord) {
        self.events.push(record);
    }

    /// Full class name, which is also the enumeration type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class name without the shared prefix (`Activity`).
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// False for exempt classes, which are documented but not code-generated.
    pub fn generates_code(&self) -> bool {
        self.generates_code
    }

    /// Events in catalog order.
    pub fn events(&self) -> &[WaitEventRecord] {
        &self.events
    }
}

/// Validated wait events grouped by class.
///
/// Classes are ordered case-insensitively by name; events within a class keep
/// the catalog-wide identifier order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    classes: Vec<WaitClass>,
}

impl Catalog {
    pub(crate) fn from_classes(mut classes: Vec<WaitClass>) -> Self {
        classes.sort_by_cached_key(|class| class.name.to_uppercase());
        Self { classes }
    }

    /// Read, tag, sort and validate a catalog file.
    pub fn load(path: &Path, config: &GeneratorConfig) -> CatalogResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::parse(&text, config)?;
        info!(
            path = %path.display(),
            classes = catalog.classes.len(),
            events = catalog.event_count(),
            "compiled wait event catalog"
        );
        Ok(catalog)
    }

    /// Compile catalog text that is already in memory.
    pub fn parse(text: &str, config: &GeneratorConfig) -> CatalogResult<Self> {
        let tagged = tag_lines(text, &config.class_prefix);
        build_catalog(sort_tagged_lines(tagged), config)
    }

    pub fn classes(&self) -> &[WaitClass] {
        &self.classes
    }

    /// Classes whose enumeration and lookup function are generated here.
    pub fn code_classes(&self) -> impl Iterator<Item = &WaitClass> {
        self.classes.iter().filter(|class| class.generates_code)
    }

    pub fn class(&self, name: &str) -> Option<&WaitClass> {
        self.classes.iter().find(|class| class.name == name)
    }

    pub fn event_count(&self) -> usize {
        self.classes.iter().map(|class| class.events.len()).sum()
    }
}
