//! Named job-set presets.
//!
//! Saves job sets verbatim under a name so the same workload can be
//! reloaded and simulated again later. The store neither validates job sets
//! nor knows about policies.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::JobSpec;

/// Preset storage errors.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No preset with the requested name.
    #[error("No preset named '{0}'")]
    NotFound(String),
}

/// A named job set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Preset name.
    pub name: String,
    /// Saved jobs, in the order they were given.
    pub jobs: Vec<JobSpec>,
}

/// An ordered collection of presets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetStore {
    presets: Vec<Preset>,
}

impl PresetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a job set and returns the name it was stored under.
    ///
    /// Without a name, presets are numbered `Test 1`, `Test 2`, ….
    /// Saving under an existing name replaces that preset.
    pub fn save(&mut self, name: Option<&str>, jobs: &[JobSpec]) -> String {
        let name = match name {
            Some(n) => n.to_string(),
            None => self.next_default_name(),
        };
        let preset = Preset {
            name: name.clone(),
            jobs: jobs.to_vec(),
        };
        match self.presets.iter_mut().find(|p| p.name == name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
        name
    }

    /// Returns a copy of the jobs saved under `name`.
    pub fn get(&self, name: &str) -> Result<Vec<JobSpec>, PresetError> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.jobs.clone())
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    /// Removes a preset. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.name != name);
        self.presets.len() != before
    }

    /// Preset names in save order.
    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Loads a store from a JSON file. A missing file yields an empty store.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the store to a JSON file.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn next_default_name(&self) -> String {
        let mut n = self.presets.len() + 1;
        loop {
            let candidate = format!("Test {n}");
            if !self.presets.iter().any(|p| p.name == candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}
