//! Action selection.
//!
//! Choosing *which* action an actor uses is a collaborator concern. The flow
//! only asks an [`ActionSelector`] for a choice when the caller did not force
//! one.

use crate::action::{ActionDefinition, ActionType};
use crate::state::{ActionInstanceId, ActionSource, ActorState, PooledAction};

/// An action picked for this turn.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedAction {
    /// Pool instance the action came from; `None` for ad-hoc actions that
    /// carry no cooldown or combo slot.
    pub instance: Option<ActionInstanceId>,
    pub action: ActionDefinition,
}

impl SelectedAction {
    /// An action that is not part of any pool.
    pub fn ad_hoc(action: ActionDefinition) -> Self {
        Self {
            instance: None,
            action,
        }
    }

    pub fn from_pool(entry: &PooledAction) -> Self {
        Self {
            instance: Some(entry.id),
            action: entry.action.clone(),
        }
    }
}

/// Picks an action for an actor, or `None` when it has nothing usable.
pub trait ActionSelector {
    fn select(&self, actor: &ActorState) -> Option<SelectedAction>;
}

/// Follows the combo sequence and falls back to a basic attack.
///
/// The next combo slot is used when its cooldown is clear; otherwise the first
/// ready non-combo attack from the default kit, then from any source.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComboSelector;

impl ComboSelector {
    fn next_combo_action(actor: &ActorState) -> Option<&PooledAction> {
        let len = actor.combo.len();
        if len == 0 {
            return None;
        }
        let order = actor.combo_state.next_slot().saturating_sub(1) % len + 1;
        let slot = actor.combo.slot(order)?;
        actor.pool.get(slot.instance).filter(|e| e.is_ready())
    }

    fn basic_attack(actor: &ActorState) -> Option<&PooledAction> {
        let is_basic = |e: &&PooledAction| {
            e.is_ready()
                && e.action.action_type == ActionType::Attack
                && !e.action.is_combo_eligible()
        };
        actor
            .pool
            .iter()
            .filter(is_basic)
            .find(|e| e.source == ActionSource::Default)
            .or_else(|| actor.pool.iter().find(is_basic))
    }
}

impl ActionSelector for ComboSelector {
    fn select(&self, actor: &ActorState) -> Option<SelectedAction> {
        Self::next_combo_action(actor)
            .or_else(|| Self::basic_attack(actor))
            .map(SelectedAction::from_pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ComboRouting;
    use crate::state::{ActorId, Attributes};

    fn actor_with_combo() -> (ActorState, ActionInstanceId, ActionInstanceId) {
        let mut actor = ActorState::new(ActorId(1), "Duelist", Attributes::default(), 20);
        actor.grant_action(
            ActionSource::Default,
            ActionDefinition::attack("Basic Attack", 1.0),
        );
        let jab = actor.grant_action(
            ActionSource::Class,
            ActionDefinition::attack("Jab", 0.8).as_combo(ComboRouting::Continue),
        );
        let cross = actor.grant_action(
            ActionSource::Class,
            ActionDefinition::attack("Cross", 1.2).as_combo(ComboRouting::Continue),
        );
        actor.add_to_combo(jab).unwrap();
        actor.add_to_combo(cross).unwrap();
        (actor, jab, cross)
    }

    #[test]
    fn follows_combo_position() {
        let (mut actor, jab, cross) = actor_with_combo();

        assert_eq!(ComboSelector.select(&actor).and_then(|s| s.instance), Some(jab));

        actor.combo_state.advance_to(2);
        assert_eq!(ComboSelector.select(&actor).and_then(|s| s.instance), Some(cross));
    }

    #[test]
    fn falls_back_to_basic_attack_on_cooldown() {
        let (mut actor, jab, _) = actor_with_combo();
        actor.pool.start_cooldown(jab, 2);

        let selected = ComboSelector.select(&actor);
        assert_eq!(selected.map(|s| s.action.name), Some("Basic Attack".to_string()));
    }

    #[test]
    fn empty_pool_selects_nothing() {
        let actor = ActorState::new(ActorId(2), "Dummy", Attributes::default(), 10);
        assert!(ComboSelector.select(&actor).is_none());
    }
}
