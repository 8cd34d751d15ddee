//! Resolved combat events.

use crate::combat::RollOutcome;
use crate::state::ActorId;

/// Record of one resolved strike (or of a resolution that dealt no damage).
///
/// Built by the execution flow and read by triggers and any narrative or UI
/// consumer; never mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEvent {
    pub actor: ActorId,
    pub target: ActorId,
    pub action: String,
    pub natural_roll: u32,
    pub roll_total: u32,
    pub outcome: RollOutcome,
    pub is_combo: bool,
    pub is_critical: bool,
    /// 1-based strike number; 0 when no strike was made.
    pub strike: u32,
    pub damage: u32,
}

impl CombatEvent {
    pub fn lands(&self) -> bool {
        self.outcome.lands()
    }
}
