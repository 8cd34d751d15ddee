//! Status effect handlers and the per-turn tick.
//!
//! Every [`StatusEffectKind`] has a built-in handler, selected by `match`.
//! Callers may replace the handler for a kind with [`StatusEffectRegistry::register`].

use std::collections::BTreeMap;

use crate::action::ActionDefinition;
use crate::config::EffectTuning;
use crate::state::{ActorId, ActorState, StatusEffectKind};

/// Record of one applied effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectApplication {
    pub kind: StatusEffectKind,
    pub recipient: ActorId,
    /// Stacks after application; for Cleanse, the stacks removed.
    pub stacks: u32,
    pub turns: u32,
}

/// Custom behaviour for one effect kind.
pub trait EffectHandler {
    /// Applies `stacks` for `turns` and returns the stack figure to report.
    fn apply(
        &self,
        recipient: &mut ActorState,
        stacks: u32,
        turns: u32,
        tuning: &EffectTuning,
    ) -> u32;
}

pub struct StatusEffectRegistry<'a> {
    tuning: &'a EffectTuning,
    overrides: BTreeMap<StatusEffectKind, Box<dyn EffectHandler + 'a>>,
}

impl<'a> StatusEffectRegistry<'a> {
    pub fn new(tuning: &'a EffectTuning) -> Self {
        Self {
            tuning,
            overrides: BTreeMap::new(),
        }
    }

    pub fn tuning(&self) -> &EffectTuning {
        self.tuning
    }

    /// Replaces the handler for `kind`.
    pub fn register(&mut self, kind: StatusEffectKind, handler: impl EffectHandler + 'a) {
        self.overrides.insert(kind, Box::new(handler));
    }

    /// Applies an effect by identifier; unknown identifiers are a logged no-op.
    pub fn apply_effect(
        &self,
        name: &str,
        recipient: &mut ActorState,
        action: &ActionDefinition,
    ) -> Option<EffectApplication> {
        let Some(kind) = StatusEffectKind::parse(name) else {
            tracing::warn!(effect = name, action = %action.name, "unknown status effect; ignored");
            return None;
        };
        Some(self.apply(kind, recipient, 1, action))
    }

    /// Applies `stacks` of `kind` caused by `action`.
    pub fn apply(
        &self,
        kind: StatusEffectKind,
        recipient: &mut ActorState,
        stacks: u32,
        action: &ActionDefinition,
    ) -> EffectApplication {
        let rule = self.tuning.rule(kind);
        let turns = action.effect_duration.unwrap_or(rule.duration);

        let reported = match self.overrides.get(&kind) {
            Some(handler) => handler.apply(recipient, stacks, turns, self.tuning),
            None => self.apply_builtin(kind, recipient, stacks, turns),
        };

        tracing::debug!(
            effect = %kind,
            recipient = %recipient.name,
            stacks = reported,
            turns,
            "status effect applied"
        );

        EffectApplication {
            kind,
            recipient: recipient.id,
            stacks: reported,
            turns,
        }
    }

    fn apply_builtin(
        &self,
        kind: StatusEffectKind,
        recipient: &mut ActorState,
        stacks: u32,
        turns: u32,
    ) -> u32 {
        let max_stacks = self.tuning.rule(kind).max_stacks;
        match kind {
            StatusEffectKind::Cleanse => {
                let harmful: Vec<StatusEffectKind> = recipient
                    .status
                    .iter()
                    .map(|e| e.kind)
                    .filter(|k| k.is_harmful())
                    .collect();
                let per_kind = self.tuning.cleanse_stacks.saturating_mul(stacks);
                harmful
                    .into_iter()
                    .map(|k| recipient.status.reduce(k, per_kind))
                    .sum()
            }
            StatusEffectKind::Disrupt => {
                recipient.reset_combo();
                0
            }
            StatusEffectKind::TemporaryHp => {
                let before = recipient.stacks(kind);
                let after = recipient.status.apply(kind, stacks, turns, max_stacks);
                let shield = (after - before).saturating_mul(self.tuning.temporary_hp_per_stack);
                recipient.modifiers.temporary_hp =
                    recipient.modifiers.temporary_hp.saturating_add(shield);
                after
            }
            _ => recipient.status.apply(kind, stacks, turns, max_stacks),
        }
    }
}

impl std::fmt::Debug for StatusEffectRegistry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusEffectRegistry")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// What one turn boundary did to an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Bleed, poison, and burn damage taken.
    pub damage: u32,
    /// Regeneration healed.
    pub healed: u32,
    pub expired: Vec<StatusEffectKind>,
    pub defeated: bool,
}

/// Advances an actor by one turn: damage and healing over time, then effect
/// durations, timed roll modifiers, and cooldowns count down.
pub fn tick_turn(actor: &mut ActorState, tuning: &EffectTuning) -> TickReport {
    let per = |kind, amount: u32| actor.stacks(kind).saturating_mul(amount);
    let dot = per(StatusEffectKind::Bleed, tuning.bleed_damage_per_stack)
        .saturating_add(per(StatusEffectKind::Poison, tuning.poison_damage_per_stack))
        .saturating_add(per(StatusEffectKind::Burn, tuning.burn_damage_per_stack));
    let regen = per(StatusEffectKind::HpRegen, tuning.regen_per_stack);

    let damage = actor.health.damage(dot);
    let healed = if actor.is_defeated() {
        0
    } else {
        actor.health.heal(regen)
    };

    let expired = actor.status.tick();
    if expired.contains(&StatusEffectKind::TemporaryHp) {
        actor.modifiers.temporary_hp = 0;
    }
    actor.modifiers.tick();
    actor.pool.tick_cooldowns();

    if damage > 0 || healed > 0 || !expired.is_empty() {
        tracing::debug!(actor = %actor.name, damage, healed, ?expired, "turn tick");
    }

    TickReport {
        damage,
        healed,
        expired,
        defeated: actor.is_defeated(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Attributes, HealthMeter, TimedBonus};
    use strum::IntoEnumIterator;

    fn target() -> ActorState {
        ActorState::new(ActorId(7), "Target", Attributes::default(), 50)
    }

    fn action() -> ActionDefinition {
        ActionDefinition::attack("Hex", 1.0)
    }

    #[test]
    fn every_kind_is_handled_by_name() {
        let tuning = EffectTuning::default();
        let registry = StatusEffectRegistry::new(&tuning);
        for kind in StatusEffectKind::iter() {
            let mut t = target();
            let applied = registry.apply_effect(kind.as_ref(), &mut t, &action());
            assert_eq!(applied.map(|a| a.kind), Some(kind));
        }
    }

    #[test]
    fn unknown_name_is_a_no_op() {
        let tuning = EffectTuning::default();
        let registry = StatusEffectRegistry::new(&tuning);
        let mut t = target();
        let before = t.clone();

        assert!(registry.apply_effect("petrify", &mut t, &action()).is_none());
        assert_eq!(t, before);
    }

    #[test]
    fn repeated_application_stacks_and_refreshes_to_action_duration() {
        let tuning = EffectTuning::default();
        let registry = StatusEffectRegistry::new(&tuning);
        let mut t = target();
        let hex = action().with_effect_duration(4);

        registry.apply(StatusEffectKind::Poison, &mut t, 1, &hex);
        t.status.tick();
        let second = registry.apply(StatusEffectKind::Poison, &mut t, 1, &hex);

        assert_eq!(second.stacks, 2);
        assert_eq!(t.status.get(StatusEffectKind::Poison).map(|e| e.turns_remaining), Some(4));
    }

    #[test]
    fn cleanse_never_increases_stacks() {
        let tuning = EffectTuning::default();
        let registry = StatusEffectRegistry::new(&tuning);
        let mut t = target();
        registry.apply(StatusEffectKind::Bleed, &mut t, 3, &action());
        registry.apply(StatusEffectKind::Weaken, &mut t, 1, &action());
        registry.apply(StatusEffectKind::Focus, &mut t, 2, &action());
        let before: Vec<_> = StatusEffectKind::iter().map(|k| t.stacks(k)).collect();

        let cleansed = registry.apply(StatusEffectKind::Cleanse, &mut t, 1, &action());

        for (kind, before) in StatusEffectKind::iter().zip(before) {
            assert!(t.stacks(kind) <= before, "{kind} grew");
        }
        assert_eq!(cleansed.stacks, 3); // 2 bleed + 1 weaken
        assert_eq!(t.stacks(StatusEffectKind::Bleed), 1);
        assert_eq!(t.stacks(StatusEffectKind::Focus), 2);
    }

    #[test]
    fn disrupt_resets_combo_only() {
        let tuning = EffectTuning::default();
        let registry = StatusEffectRegistry::new(&tuning);
        let mut t = target();
        t.combo_state.advance_to(2);
        registry.apply(StatusEffectKind::Burn, &mut t, 1, &action());

        registry.apply(StatusEffectKind::Disrupt, &mut t, 1, &action());

        assert!(t.combo_state.is_idle());
        assert_eq!(t.stacks(StatusEffectKind::Burn), 1);
    }

    #[test]
    fn temporary_hp_grants_a_shield_that_expires() {
        let tuning = EffectTuning::default();
        let registry = StatusEffectRegistry::new(&tuning);
        let mut t = target();
        let ward = action().with_effect_duration(1);

        registry.apply(StatusEffectKind::TemporaryHp, &mut t, 2, &ward);
        assert_eq!(t.modifiers.temporary_hp, 10);

        let report = tick_turn(&mut t, &tuning);
        assert!(report.expired.contains(&StatusEffectKind::TemporaryHp));
        assert_eq!(t.modifiers.temporary_hp, 0);
    }

    #[test]
    fn registered_handler_replaces_builtin() {
        struct Fizzle;
        impl EffectHandler for Fizzle {
            fn apply(&self, _: &mut ActorState, _: u32, _: u32, _: &EffectTuning) -> u32 {
                0
            }
        }

        let tuning = EffectTuning::default();
        let mut registry = StatusEffectRegistry::new(&tuning);
        registry.register(StatusEffectKind::Stun, Fizzle);
        let mut t = target();

        registry.apply(StatusEffectKind::Stun, &mut t, 1, &action());
        assert!(!t.status.is_active(StatusEffectKind::Stun));
    }

    #[test]
    fn tick_applies_damage_over_time_and_regen() {
        let tuning = EffectTuning::default();
        let mut t = target();
        t.health = HealthMeter::with_current(50, 30);
        t.status.apply(StatusEffectKind::Bleed, 2, 3, 10);
        t.status.apply(StatusEffectKind::Burn, 1, 1, 5);
        t.status.apply(StatusEffectKind::HpRegen, 1, 3, 10);
        t.modifiers.grant_roll_bonus(TimedBonus::new(2, 1));

        let report = tick_turn(&mut t, &tuning);

        // 2 bleed + 2 burn, then 2 regen
        assert_eq!(report.damage, 4);
        assert_eq!(report.healed, 2);
        assert_eq!(t.health.current(), 28);
        assert_eq!(report.expired, vec![StatusEffectKind::Burn]);
        assert_eq!(t.modifiers.temp_roll_bonus(), 0);
        assert!(!report.defeated);
    }
}
