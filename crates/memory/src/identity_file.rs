//! File-backed identity source.
//!
//! Loads the character's system prompt from a plain-text file and the user
//! profile from an optional JSON file, and assembles both into the identity
//! context block. Each file is optional: a missing prompt file falls back to
//! a built-in prompt, a missing profile is silently skipped.
//!
//! `reload()` re-reads both files; hosts call it from a file watcher and
//! then invalidate the builder's static cache so the next build picks the
//! new content up.

use kodama_core::IdentitySource;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// User profile loaded from `profile.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// What the companion calls the user.
    pub nickname: String,

    /// Birthday in `MM-DD` form, if shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,

    /// Relationship framing ("friend", "sibling", …).
    #[serde(default = "default_relationship")]
    pub relationship: String,

    /// Free-form remembered facts about the user.
    #[serde(default)]
    pub custom_facts: Vec<String>,
}

fn default_relationship() -> String {
    "friend".into()
}

/// An `IdentitySource` backed by a system-prompt file and a profile file.
pub struct FileIdentity {
    prompt_path: PathBuf,
    profile_path: Option<PathBuf>,
    context: RwLock<String>,
}

impl FileIdentity {
    /// Load identity from disk. Never fails: missing or unreadable files
    /// degrade to the built-in fallback prompt.
    pub fn load(prompt_path: impl Into<PathBuf>, profile_path: Option<PathBuf>) -> Self {
        let prompt_path = prompt_path.into();
        let context = Self::assemble(&prompt_path, profile_path.as_deref());
        Self {
            prompt_path,
            profile_path,
            context: RwLock::new(context),
        }
    }

    /// An identity with fixed in-memory content, for tests and prototypes.
    pub fn from_static(context: impl Into<String>) -> Self {
        Self {
            prompt_path: PathBuf::new(),
            profile_path: None,
            context: RwLock::new(context.into()),
        }
    }

    /// Re-read the backing files. Call after a file-change notification,
    /// then invalidate the prompt builder's static cache.
    pub async fn reload(&self) {
        let fresh = Self::assemble(&self.prompt_path, self.profile_path.as_deref());
        let mut ctx = self.context.write().await;
        debug!(
            prompt_file = %self.prompt_path.display(),
            chars = fresh.len(),
            "Identity reloaded"
        );
        *ctx = fresh;
    }

    fn assemble(prompt_path: &Path, profile_path: Option<&Path>) -> String {
        let system_prompt = match Self::read_file_safe(prompt_path) {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => {
                debug!(file = %prompt_path.display(), "No system prompt file, using fallback");
                Self::fallback_prompt()
            }
        };

        let mut out = String::from("[Identity]\n");
        out.push_str(&system_prompt);

        if let Some(path) = profile_path {
            match Self::load_profile(path) {
                Some(profile) => {
                    out.push_str("\n\n[User Profile]\n");
                    out.push_str(&format!("Nickname: {}\n", profile.nickname));
                    if let Some(birthday) = &profile.birthday {
                        out.push_str(&format!("Birthday: {}\n", birthday));
                    }
                    out.push_str(&format!("Relationship: {}", profile.relationship));
                    for fact in &profile.custom_facts {
                        out.push_str(&format!("\n- {}", fact));
                    }
                }
                None => debug!(file = %path.display(), "No profile file, skipping section"),
            }
        }

        out
    }

    fn load_profile(path: &Path) -> Option<UserProfile> {
        let raw = Self::read_file_safe(path)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Profile file unparseable, skipping");
                None
            }
        }
    }

    /// Safely read a file, returning None on any error.
    fn read_file_safe(path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }

    fn fallback_prompt() -> String {
        concat!(
            "You are Kodama, a small desktop companion. ",
            "You live on the user's screen, speak briefly and warmly, ",
            "and stay in character at all times.",
        )
        .into()
    }
}

#[async_trait]
impl IdentitySource for FileIdentity {
    async fn get_context(&self) -> String {
        self.context.read().await.clone()
    }
}
