//! Scene classification — a coarse complexity tier per interaction.
//!
//! The classifier itself lives outside the core; callers hand the tier in
//! with each interaction. The pipeline only branches on "simple vs. not
//! simple" to decide whether long-term memory retrieval is worth the cost.

use serde::{Deserialize, Serialize};

/// Complexity tier of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Reflex-level interaction (a poke, a greeting). No retrieval.
    Simple,
    /// Ordinary conversation turn.
    Medium,
    /// Multi-topic or emotionally loaded exchange.
    Complex,
}

impl SceneKind {
    /// Whether this scene justifies a long-term memory retrieval pass.
    ///
    /// Only the lowest tier skips retrieval; `Medium` and `Complex` are
    /// treated identically here.
    pub fn requires_retrieval(&self) -> bool {
        !matches!(self, SceneKind::Simple)
    }
}
