// src/dedup.rs
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Durable set of warning ids already announced. Append-only by design: ids
/// are never expired, so a warning is announced at most once for the
/// lifetime of the persisted state.
#[derive(Debug)]
pub struct DedupStore {
    path: PathBuf,
    announced: HashSet<String>,
}

impl DedupStore {
    /// Load prior state from `path`. A missing, unreadable, or malformed
    /// file starts the store empty; startup never fails because of it.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let announced = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    tracing::info!(
                        path = %path.display(),
                        error = %e,
                        "dedup state unreadable; starting empty"
                    );
                    HashSet::new()
                }
            },
            Err(e) => {
                tracing::info!(
                    path = %path.display(),
                    error = %e,
                    "no prior dedup state; starting empty"
                );
                HashSet::new()
            }
        };
        Self { path, announced }
    }

    pub fn has_been_announced(&self, id: &str) -> bool {
        self.announced.contains(id)
    }

    /// Insert `id` and persist the full set immediately. A write failure is
    /// logged, not raised: the in-memory mark stays authoritative for the
    /// rest of the run, favoring no-re-announce over durability.
    pub fn mark_announced(&mut self, id: &str) {
        if !self.announced.insert(id.to_string()) {
            return;
        }
        if let Err(e) = self.persist() {
            tracing::warn!(
                path = %self.path.display(),
                error = ?e,
                "failed to persist dedup state"
            );
        }
    }

    pub fn len(&self) -> usize {
        self.announced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.announced.is_empty()
    }

    fn persist(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
        }
        // Sorted so the file is stable across runs.
        let mut ids: Vec<&str> = self.announced.iter().map(String::as_str).collect();
        ids.sort_unstable();
        let body = serde_json::to_string_pretty(&ids).context("encoding dedup state")?;
        fs::write(&self.path, body).with_context(|| format!("writing {}", self.path.display()))
    }
}
