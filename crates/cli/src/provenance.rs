//! Run records: which code, settings, and map produced an output file.

use anyhow::{Context, Result};
use cellplan::Decomposition;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Code revision and library version.
#[derive(Serialize)]
pub struct Build {
    pub code_rev: String,
    pub cellplan_version: &'static str,
}

impl Build {
    pub fn current() -> Self {
        Self {
            code_rev: code_rev(),
            cellplan_version: cellplan::VERSION,
        }
    }
}

/// Contents of `<stem>.provenance.json`, written next to a decomposition.
#[derive(Serialize)]
pub struct RunRecord<'a> {
    #[serde(flatten)]
    pub build: Build,
    /// `None` for the built-in reference map.
    pub input: Option<&'a Path>,
    pub output: &'a Path,
    pub cfg: Value,
    pub cells: usize,
    pub nodes: usize,
    pub unmatched_cuts: usize,
}

impl<'a> RunRecord<'a> {
    pub fn new(d: &Decomposition, input: Option<&'a Path>, output: &'a Path, cfg: Value) -> Self {
        Self {
            build: Build::current(),
            input,
            output,
            cfg,
            cells: d.cells().len(),
            nodes: d.graph().num_nodes(),
            unmatched_cuts: d.unmatched().len(),
        }
    }

    /// Write the record beside `output`; returns where it went.
    pub fn write(&self) -> Result<PathBuf> {
        let path = self.output.with_extension("provenance.json");
        let bytes = serde_json::to_vec_pretty(self).context("serializing run record")?;
        std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

/// `GIT_COMMIT` at build time, then at run time, then `git rev-parse HEAD`.
fn code_rev() -> String {
    option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_owned())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout).ok().map(|s| s.trim().to_owned())
}
