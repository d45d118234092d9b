//! Wait event catalog compiler.
//!
//! `wait_event_names.txt` is the single source of truth for wait events. This
//! crate compiles it into an immutable [`Catalog`] and renders either the C
//! enumerations plus lookup functions (`code` mode) or the SGML reference
//! tables (`docs` mode), publishing each artifact atomically.

pub mod catalog;
pub mod config;
pub mod emit;
pub mod error;
pub mod logging;
pub mod output;

pub use catalog::{Catalog, TaggedLine, WaitClass, WaitEventRecord};
pub use config::GeneratorConfig;
pub use emit::{Artifact, OutputMode, render};
pub use error::{CatalogError, CatalogResult};
pub use output::{publish, publish_all};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything one generator run needs.
#[derive(Clone, Debug)]
pub struct GenerateRequest<'a> {
    pub input: &'a Path,
    pub mode: OutputMode,
    pub output_dir: &'a Path,
    pub config: &'a GeneratorConfig,
}

/// Compile the catalog and publish every artifact of the requested mode.
///
/// Nothing is written unless the whole catalog validates; artifacts are
/// rendered in memory before the first one is published.
pub fn generate(request: &GenerateRequest<'_>) -> Result<Vec<PathBuf>> {
    let GenerateRequest {
        input,
        mode,
        output_dir,
        config,
    } = *request;

    config.validate().context("invalid generator config")?;
    let catalog = Catalog::load(input, config)
        .with_context(|| format!("compiling wait event catalog {}", input.display()))?;
    let artifacts = render(mode, &catalog, config)
        .with_context(|| format!("rendering {} artifacts", mode.as_str()))?;
    let published = publish_all(output_dir, &artifacts)
        .with_context(|| format!("writing {} artifacts to {}", mode.as_str(), output_dir.display()))?;

    info!(
        mode = mode.as_str(),
        artifacts = published.len(),
        "wait event generation complete"
    );
    Ok(published)
}
