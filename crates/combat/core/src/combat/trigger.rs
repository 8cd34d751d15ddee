//! Conditional effect triggers.
//!
//! For any event that lands exactly one of `OnNormalHit`, `OnComboHit`, and
//! `OnCriticalHit` holds; a critical hit that also reached the combo threshold
//! counts as critical only.

use crate::action::ActionDefinition;
use crate::combat::CombatEvent;
use crate::state::ActorState;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerCondition {
    /// Any non-miss outcome.
    OnHit,
    /// Landed, neither combo nor critical.
    OnNormalHit,
    /// Reached the combo threshold without being critical.
    OnComboHit,
    OnCriticalHit,
    /// Miss or critical miss.
    OnMiss,
    /// Natural die face equals the value.
    ExactRoll(u32),
    /// Target health strictly below this percentage of max, after damage.
    TargetHealthBelow(u32),
    /// All conditions must be true.
    All(Vec<TriggerCondition>),
    /// Any condition must be true.
    Any(Vec<TriggerCondition>),
    /// Condition must be false.
    Not(Box<TriggerCondition>),
}

impl TriggerCondition {
    pub fn holds(&self, event: &CombatEvent, actor: &ActorState, target: &ActorState) -> bool {
        match self {
            Self::OnHit => event.lands(),
            Self::OnNormalHit => event.lands() && !event.is_combo && !event.is_critical,
            Self::OnComboHit => event.lands() && event.is_combo && !event.is_critical,
            Self::OnCriticalHit => event.lands() && event.is_critical,
            Self::OnMiss => !event.lands(),
            Self::ExactRoll(value) => event.natural_roll == *value,
            Self::TargetHealthBelow(percent) => target.health.percent() < *percent,
            Self::All(conditions) => conditions.iter().all(|c| c.holds(event, actor, target)),
            Self::Any(conditions) => conditions.iter().any(|c| c.holds(event, actor, target)),
            Self::Not(condition) => !condition.holds(event, actor, target),
        }
    }
}

/// True iff every condition holds (an empty set holds).
///
/// `_action` is the action being resolved; no current condition inspects it.
pub fn evaluate_conditions(
    conditions: &[TriggerCondition],
    event: &CombatEvent,
    actor: &ActorState,
    target: &ActorState,
    _action: &ActionDefinition,
) -> bool {
    conditions.iter().all(|c| c.holds(event, actor, target))
}
