//! Static action data.
//!
//! Action definitions are loaded once by an external data source and never
//! mutated by the rules. Per-actor runtime state (cooldowns, combo position)
//! lives in [`crate::state`].
mod definition;

pub use definition::{
    ActionDefinition, ActionTag, ActionType, ComboMembership, ComboRouting, EffectTrigger,
    MultiHit, RollMods, TargetShape,
};
