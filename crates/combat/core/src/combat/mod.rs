//! Rule evaluation: rolls, outcomes, combos, damage, effects, triggers, and
//! the flow that sequences them.
mod combo;
mod damage;
mod effects;
mod event;
mod flow;
mod multi_hit;
mod outcome;
mod roll;
mod threshold;
mod trigger;

pub use combo::{ComboTransition, advance_combo, amplifier, base_amplifier, combo_amplifier};
pub use damage::{DamageCalculator, DamageModifiers};
pub use effects::{EffectApplication, EffectHandler, StatusEffectRegistry, TickReport, tick_turn};
pub use event::CombatEvent;
pub use flow::{ActionExecutionFlow, ExecutionResult, Suppression, TurnRequest};
pub use multi_hit::{MultiHitOutcome, MultiHitProcessor, Strike};
pub use outcome::{RollOutcome, RollResult, classify};
pub use roll::{ModifiedRoll, RollModifier};
pub use threshold::{ThresholdError, ThresholdKind, ThresholdManager, Thresholds};
pub use trigger::{TriggerCondition, evaluate_conditions};
