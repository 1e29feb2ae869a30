//! Identity source trait — the static context collaborator.
//!
//! The identity context (character sheet, speaking style, user profile) is
//! assumed constant for the lifetime of a session. The pipeline caches it
//! with no time-based expiry; hosts invalidate explicitly when the backing
//! files change (hot reload).

use async_trait::async_trait;

/// Supplies the formatted identity context.
///
/// No error path: once constructed, an identity source is assumed to always
/// have *some* context to return, falling back to built-in defaults when
/// backing data is missing.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// The fully formatted identity context block.
    async fn get_context(&self) -> String;
}
