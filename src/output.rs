//! Crash-safe artifact publishing.
//!
//! Content is staged in a temporary file next to its final path, named after
//! the artifact and suffixed with `.tmp<pid>`, then renamed into place. The
//! rename is the publish point: readers see either the previous file or the
//! complete new one. A staging file that fails to publish is removed when it
//! is dropped.

use crate::emit::Artifact;
use crate::error::{CatalogError, CatalogResult};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

/// Publish one artifact into `dir`, returning its final path.
pub fn publish(dir: &Path, artifact: &Artifact) -> CatalogResult<PathBuf> {
    let final_path = dir.join(artifact.file_name());
    let output_error = |source: io::Error| CatalogError::Output {
        path: final_path.clone(),
        source,
    };

    let staged = stage(dir, artifact).map_err(output_error)?;
    debug!(staging = %staged.path().display(), "staged artifact");
    staged
        .persist(&final_path)
        .map_err(|err| output_error(err.error))?;

    info!(path = %final_path.display(), bytes = artifact.contents().len(), "published artifact");
    Ok(final_path)
}

/// Publish artifacts in order, stopping at the first failure.
///
/// Artifacts published before a failure stay in place.
pub fn publish_all(dir: &Path, artifacts: &[Artifact]) -> CatalogResult<Vec<PathBuf>> {
    artifacts
        .iter()
        .map(|artifact| publish(dir, artifact))
        .collect()
}

fn stage(dir: &Path, artifact: &Artifact) -> io::Result<NamedTempFile> {
    let prefix = format!("{}.", artifact.file_name());
    let suffix = format!(".tmp{}", process::id());
    let mut staged = Builder::new()
        .prefix(&prefix)
        .suffix(&suffix)
        .tempfile_in(dir)?;
    staged.write_all(artifact.contents().as_bytes())?;
    staged.flush()?;
    staged.as_file().sync_all()?;
    Ok(staged)
}
