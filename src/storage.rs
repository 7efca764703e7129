//! Top-score persistence.
//!
//! The only thing that outlives a session is the best score, kept as a tiny
//! JSON document: `{"top_score": 1234}`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct TopScoreFile {
    top_score: u32,
}

/// Default location: `<data dir>/space_cannon/top_score.json`.
pub fn default_score_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("space_cannon")
        .join("top_score.json")
}

#[derive(Clone, Debug)]
pub struct TopScoreStore {
    path: PathBuf,
}

impl TopScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file means no top score yet.  An unreadable or corrupt one
    /// is logged and treated the same way.
    pub fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(e) => {
                warn!("ignoring top score file: {e:#}");
                0
            }
        }
    }

    fn try_load(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let file: TopScoreFile = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(file.top_score)
    }

    pub fn save(&self, top_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&TopScoreFile { top_score })?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    /// Forget the stored top score.
    pub fn reset(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("removing {}", self.path.display()))?;
        }
        Ok(())
    }
}
