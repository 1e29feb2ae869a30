//! Size-budget profiles — named allotment tables per operating mode.
//!
//! Three fixed profiles bound the assembled prompt for different device and
//! user classes. The per-section allotments are advisory sub-budgets; only
//! `total − reserved_output` is enforced as the hard ceiling during assembly.

use serde::{Deserialize, Serialize};

/// The closed set of prompt operating modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// 16k — new users, low-spec devices, fast responses.
    Lite,
    /// 32k — the everyday default.
    #[default]
    Standard,
    /// 64k — long-lived companions with large memory stores.
    Deep,
}

/// Size allotments for one mode.
///
/// `total` is not the sum of the components: `reserved_output` is space held
/// back for the model's reply, and the component fields are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBudget {
    /// Character sheet + user profile.
    pub core_identity: usize,
    /// Recent turns + live state.
    pub working_memory: usize,
    /// Time / weather / system probes.
    pub environment: usize,
    /// Preference and pattern summary.
    pub semantic_summary: usize,
    /// Memory index listing.
    pub memory_index: usize,
    /// Full text of high-priority memories.
    pub memory_fulltext: usize,
    /// Fixed instruction block.
    pub instructions: usize,
    /// Held back for model output.
    pub reserved_output: usize,
    /// Whole-context ceiling.
    pub total: usize,
}

impl SizeBudget {
    /// The hard ceiling actually enforced on assembled content.
    pub fn available(&self) -> usize {
        self.total - self.reserved_output
    }
}

impl PromptMode {
    /// Static lookup — profiles are data, not computed.
    pub fn budget(&self) -> SizeBudget {
        match self {
            PromptMode::Lite => SizeBudget {
                core_identity: 1_500,
                working_memory: 4_000,
                environment: 500,
                semantic_summary: 1_500,
                memory_index: 1_500,
                memory_fulltext: 1_500,
                instructions: 500,
                reserved_output: 5_000,
                total: 16_000,
            },
            PromptMode::Standard => SizeBudget {
                core_identity: 2_500,
                working_memory: 8_000,
                environment: 1_000,
                semantic_summary: 2_500,
                memory_index: 3_000,
                memory_fulltext: 5_000,
                instructions: 1_000,
                reserved_output: 9_000,
                total: 32_000,
            },
            PromptMode::Deep => SizeBudget {
                core_identity: 4_000,
                working_memory: 16_000,
                environment: 2_000,
                semantic_summary: 4_000,
                memory_index: 6_000,
                memory_fulltext: 10_000,
                instructions: 2_000,
                reserved_output: 20_000,
                total: 64_000,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_match_modes() {
        assert_eq!(PromptMode::Lite.budget().total, 16_000);
        assert_eq!(PromptMode::Standard.budget().total, 32_000);
        assert_eq!(PromptMode::Deep.budget().total, 64_000);
    }

    #[test]
    fn available_subtracts_reserved_output() {
        let budget = PromptMode::Standard.budget();
        assert_eq!(budget.available(), 23_000);
    }

    #[test]
    fn component_allotments_fit_within_total() {
        for mode in [PromptMode::Lite, PromptMode::Standard, PromptMode::Deep] {
            let b = mode.budget();
            let components = b.core_identity
                + b.working_memory
                + b.environment
                + b.semantic_summary
                + b.memory_index
                + b.memory_fulltext
                + b.instructions
                + b.reserved_output;
            assert!(components <= b.total, "{:?} components exceed total", mode);
        }
    }

    #[test]
    fn default_mode_is_standard() {
        assert_eq!(PromptMode::default(), PromptMode::Standard);
    }

    #[test]
    fn serde_snake_case() {
        assert_eq!(serde_json::to_string(&PromptMode::Deep).unwrap(), "\"deep\"");
    }
}
