//! Prompt builder configuration.
//!
//! Deserializable from a TOML fragment so hosts can expose the knobs in
//! their config file. Every field has a default; an empty table is a valid
//! configuration.

use crate::budget::PromptMode;
use kodama_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the prompt builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Operating mode, used unless auto-adjust overrides it.
    #[serde(default)]
    pub mode: PromptMode,

    /// Master switch for the semi-static and retrieval caches.
    /// The static identity cache is always on; it is invalidation-driven.
    #[serde(default = "default_true")]
    pub enable_cache: bool,

    /// Semi-static (facts summary) TTL in seconds.
    #[serde(default = "default_semi_static_ttl")]
    pub semi_static_ttl_secs: u64,

    /// Retrieval-result TTL in seconds.
    #[serde(default = "default_retrieval_ttl")]
    pub retrieval_ttl_secs: u64,

    /// Compress instead of hard-truncating when over budget.
    /// Both paths currently apply the same proportional cut.
    #[serde(default = "default_true")]
    pub enable_compression: bool,

    /// Pick the mode from the memory-store volume instead of `mode`.
    #[serde(default = "default_true")]
    pub auto_adjust: bool,

    /// Below this memory count, auto-adjust selects `Lite`.
    #[serde(default = "default_low_threshold")]
    pub low_memory_threshold: usize,

    /// At or above this memory count, auto-adjust selects `Deep`.
    #[serde(default = "default_high_threshold")]
    pub high_memory_threshold: usize,

    /// How many recent conversation turns the dynamic layer pulls.
    #[serde(default = "default_recent_turns")]
    pub recent_turn_limit: usize,
}

fn default_true() -> bool {
    true
}
fn default_semi_static_ttl() -> u64 {
    600
}
fn default_retrieval_ttl() -> u64 {
    300
}
fn default_low_threshold() -> usize {
    100
}
fn default_high_threshold() -> usize {
    1_000
}
fn default_recent_turns() -> usize {
    10
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            mode: PromptMode::default(),
            enable_cache: true,
            semi_static_ttl_secs: default_semi_static_ttl(),
            retrieval_ttl_secs: default_retrieval_ttl(),
            enable_compression: true,
            auto_adjust: true,
            low_memory_threshold: default_low_threshold(),
            high_memory_threshold: default_high_threshold(),
            recent_turn_limit: default_recent_turns(),
        }
    }
}

impl PromptConfig {
    /// Load from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        toml::from_str(&raw).map_err(|e| Error::Config {
            message: format!("invalid prompt config: {}", e),
        })
    }

    /// The mode to build with, given the current memory-store volume.
    ///
    /// With auto-adjust off, the configured mode wins unconditionally.
    /// Otherwise: `< low → Lite`, `low ≤ n < high → Standard`,
    /// `n ≥ high → Deep` (thresholds land in the upper range).
    pub fn effective_mode(&self, memory_count: usize) -> PromptMode {
        if !self.auto_adjust {
            return self.mode;
        }
        if memory_count < self.low_memory_threshold {
            PromptMode::Lite
        } else if memory_count < self.high_memory_threshold {
            PromptMode::Standard
        } else {
            PromptMode::Deep
        }
    }
}
