//! # Kodama Core
//!
//! Domain types, collaborator traits, and error definitions for the Kodama
//! desktop companion runtime. This crate has **zero framework dependencies** —
//! it defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every data source the prompt pipeline consumes is defined as a trait here.
//! Implementations live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub collaborators
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod identity;
pub mod interaction;
pub mod retrieval;
pub mod scene;
pub mod working;

// Re-export key types at crate root for ergonomics
pub use error::{ContextError, Error, MemoryError, Result};
pub use identity::IdentitySource;
pub use interaction::InteractionRequest;
pub use retrieval::MemoryRetriever;
pub use scene::SceneKind;
pub use working::WorkingState;
