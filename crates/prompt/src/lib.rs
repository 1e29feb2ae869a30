//! Prompt assembly for the Kodama companion.
//!
//! Turns one user interaction into a complete LLM prompt through an
//! incremental pipeline: layered context gathering with tiered caching,
//! fixed-order assembly, and size-budget enforcement.
//!
//! The entry point is [`PromptBuilder`]; hosts wire in collaborators from
//! `kodama-memory` (or their own implementations of the `kodama-core`
//! traits) and call [`PromptBuilder::build`] per interaction.

pub mod budget;
pub mod builder;
pub mod cache;
pub mod config;
pub mod estimate;

pub use budget::{PromptMode, SizeBudget};
pub use builder::PromptBuilder;
pub use cache::{CacheStats, ContextCache, PartitionStats};
pub use config::PromptConfig;
pub use estimate::estimate_size;
