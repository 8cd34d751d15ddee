//! Per-actor mutable state.
//!
//! Everything a resolution writes back (health, effects, combo position,
//! cooldowns, timed modifiers) lives on [`ActorState`]; there is no
//! process-wide table keyed by actor.
mod actor;
mod combo;
mod pool;
mod status;

pub use actor::{
    ActorId, ActorModifiers, ActorState, Attributes, EquipmentBonuses, HealthMeter,
    ThresholdOverrides, TimedBonus,
};
pub use combo::{ComboError, ComboPhase, ComboSequence, ComboSlot, ComboState};
pub use pool::{ActionInstanceId, ActionPool, ActionSource, PooledAction};
pub use status::{ActiveEffect, StatusEffectKind, StatusEffects};
