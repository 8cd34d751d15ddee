//! Deterministic turn resolution for dice-driven combat.
//!
//! `combat-core` converts an action choice and a die roll into a classified
//! outcome, computes damage across one or more strikes, advances or resets the
//! actor's combo sequence, stacks status effects, and fires conditional
//! triggers. It owns no I/O: action data, rosters, and configuration are
//! supplied by the caller (see the `combat-content` crate), and every
//! resolution flows through [`combat::ActionExecutionFlow`].
pub mod action;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    ActionDefinition, ActionTag, ActionType, ComboMembership, ComboRouting, EffectTrigger,
    MultiHit, RollMods, TargetShape,
};
pub use combat::{
    ActionExecutionFlow, CombatEvent, ComboTransition, DamageCalculator, DamageModifiers,
    EffectApplication, EffectHandler, ExecutionResult, ModifiedRoll, MultiHitOutcome,
    MultiHitProcessor, RollModifier, RollOutcome, RollResult, StatusEffectRegistry, Strike,
    Suppression, ThresholdError, ThresholdKind, ThresholdManager, Thresholds, TickReport,
    TriggerCondition, TurnRequest, advance_combo, amplifier, base_amplifier, classify,
    combo_amplifier, evaluate_conditions, tick_turn,
};
pub use config::{CombatConfig, ComboEnd, ComboTuning, EffectRule, EffectTuning};
pub use env::{
    ActionCatalog, ActionOracle, ActionSelector, ComboSelector, PcgDice, RandomSource,
    ScriptedDice, SelectedAction, compute_seed,
};
pub use error::{CombatError, ErrorSeverity};
pub use state::{
    ActionInstanceId, ActionPool, ActionSource, ActiveEffect, ActorId, ActorModifiers,
    ActorState, Attributes, ComboError, ComboPhase, ComboSequence, ComboSlot, ComboState,
    EquipmentBonuses, HealthMeter, PooledAction, StatusEffectKind, StatusEffects,
    ThresholdOverrides, TimedBonus,
};
