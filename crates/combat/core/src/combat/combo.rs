//! Combo state machine and amplifier curve.
//!
//! ```text
//!            land eligible action (Continue / JumpToSlot)
//!   Idle ──────────────────────────────────────────────▶ InSequence(k+1)
//!    ▲                                                        │
//!    └──── Miss, CriticalMiss, Reset routing, Terminate ──────┘
//! ```
//!
//! Non-eligible actions that land leave the state untouched.

use crate::action::{ActionDefinition, ComboRouting};
use crate::combat::RollOutcome;
use crate::config::{ComboEnd, ComboTuning};
use crate::state::{ActionInstanceId, ActorState};

/// What a resolution did to the actor's combo position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ComboTransition {
    /// Moved to the next contiguous slot (or wrapped to slot 1).
    Advanced { step: u32, next_slot: u32 },
    /// Moved to an explicit slot.
    Jumped { step: u32, next_slot: u32 },
    /// Returned to idle.
    Reset,
    /// Unchanged.
    #[default]
    Held,
    /// Ran past the last slot with `ComboEnd::Terminate`.
    Terminated,
}

/// Per-step amplifier base for a technique value.
///
/// Piecewise linear: `amplifier_at_tech1` at technique 1, `amplifier_at_tech5`
/// at 5, `amplifier_max` at `amplifier_max_tech` and beyond. Never below 1.0.
pub fn base_amplifier(technique: i32, tuning: &ComboTuning) -> f64 {
    let lerp = |from: f64, to: f64, t: f64| from + (to - from) * t.clamp(0.0, 1.0);

    let base = if technique <= 1 {
        tuning.amplifier_at_tech1
    } else if technique <= 5 {
        lerp(
            tuning.amplifier_at_tech1,
            tuning.amplifier_at_tech5,
            f64::from(technique - 1) / 4.0,
        )
    } else if technique >= tuning.amplifier_max_tech || tuning.amplifier_max_tech <= 5 {
        tuning.amplifier_max
    } else {
        lerp(
            tuning.amplifier_at_tech5,
            tuning.amplifier_max,
            f64::from(technique - 5) / f64::from(tuning.amplifier_max_tech - 5),
        )
    };

    if base.is_finite() { base.max(1.0) } else { 1.0 }
}

/// `base^step`; 1.0 at step 0 and non-decreasing in `step`.
pub fn amplifier(base: f64, step: u32) -> f64 {
    let base = if base.is_finite() { base.max(1.0) } else { 1.0 };
    base.powi(step.min(i32::MAX as u32) as i32)
}

/// Amplifier for the actor's current step.
pub fn combo_amplifier(actor: &ActorState, tuning: &ComboTuning) -> f64 {
    amplifier(
        base_amplifier(actor.attributes.technique, tuning),
        actor.combo_state.step(),
    )
}

/// Applies one resolved action to the actor's combo position.
///
/// `instance` is the pool instance that was used; when it is not slotted, the
/// actor's pending slot stands in as the position the action occupied.
pub fn advance_combo(
    actor: &mut ActorState,
    instance: Option<ActionInstanceId>,
    action: &ActionDefinition,
    outcome: RollOutcome,
    tuning: &ComboTuning,
) -> ComboTransition {
    if !outcome.lands() {
        if actor.modifiers.combo_survives_miss {
            return ComboTransition::Held;
        }
        actor.reset_combo();
        return ComboTransition::Reset;
    }

    let len = actor.combo.len();
    if !action.is_combo_eligible() || len == 0 {
        return ComboTransition::Held;
    }

    let cursor = instance
        .and_then(|id| actor.combo.position_of(id))
        .unwrap_or_else(|| actor.combo_state.next_slot().saturating_sub(1) % len + 1);

    let routing = match action.combo.routing {
        ComboRouting::JumpToSlot(slot) if slot == 0 || slot > len => {
            tracing::warn!(
                action = %action.name,
                slot,
                len,
                "combo jump target outside the sequence; continuing instead"
            );
            ComboRouting::Continue
        }
        routing => routing,
    };

    match routing {
        ComboRouting::Continue => {
            let next = cursor + 1;
            if next <= len {
                actor.combo_state.advance_to(next);
            } else {
                match tuning.end_of_sequence {
                    ComboEnd::Wrap => actor.combo_state.advance_to(1),
                    ComboEnd::Terminate => {
                        actor.reset_combo();
                        return ComboTransition::Terminated;
                    }
                }
            }
            ComboTransition::Advanced {
                step: actor.combo_state.step(),
                next_slot: actor.combo_state.next_slot(),
            }
        }
        ComboRouting::JumpToSlot(slot) => {
            actor.combo_state.advance_to(slot);
            ComboTransition::Jumped {
                step: actor.combo_state.step(),
                next_slot: slot,
            }
        }
        ComboRouting::Reset => {
            actor.reset_combo();
            ComboTransition::Reset
        }
    }
}
