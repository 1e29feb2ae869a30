//! Collaborator implementations for the Kodama prompt pipeline.
//!
//! The pipeline core only talks to traits (`IdentitySource`, `WorkingState`,
//! `MemoryRetriever`); this crate provides the stock implementations a
//! desktop host wires in.

pub mod identity_file;
pub mod keyword;
pub mod noop;
pub mod working_state;

pub use identity_file::{FileIdentity, UserProfile};
pub use keyword::{KeywordRetriever, MemoryNote};
pub use noop::NoopRetriever;
pub use working_state::SessionWorkingState;
