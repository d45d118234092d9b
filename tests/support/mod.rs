#![allow(dead_code)]

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const GENERATOR_BIN: &str = env!("CARGO_BIN_EXE_generate-wait-event-types");

pub fn fixture_catalog() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wait_event_names.txt")
}

// Scratch directory holding a catalog file and an empty output directory.
pub struct Workspace {
    pub dir: TempDir,
    pub input: PathBuf,
    pub outdir: PathBuf,
}

impl Workspace {
    pub fn with_catalog(contents: &str) -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate workspace")?;
        let input = dir.path().join("wait_event_names.txt");
        fs::write(&input, contents)
            .with_context(|| format!("failed to write catalog at {}", input.display()))?;
        let outdir = dir.path().join("out");
        fs::create_dir(&outdir)?;
        Ok(Self { dir, input, outdir })
    }

    pub fn from_fixture() -> Result<Self> {
        let contents = fs::read_to_string(fixture_catalog())?;
        Self::with_catalog(&contents)
    }

    pub fn read_output(&self, name: &str) -> Result<String> {
        let path = self.outdir.join(name);
        fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
    }

    pub fn output_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.outdir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

pub fn run_generator(args: &[&str]) -> Result<Output> {
    Command::new(GENERATOR_BIN)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .with_context(|| format!("failed to execute {GENERATOR_BIN}"))
}

// Data line in the catalog format: identifier twice, quoted label, quoted sentence.
pub fn event_line(identifier: &str, label: &str, sentence: &str) -> String {
    format!("{identifier}\t{identifier}\t\"{label}\"\t\"{sentence}\"")
}
