//! Repeated strikes within one action.

use crate::action::{ActionDefinition, TargetShape};
use crate::combat::{DamageCalculator, DamageModifiers};
use crate::config::CombatConfig;
use crate::state::{ActorState, StatusEffectKind};

/// One strike of a multi-hit action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strike {
    /// 1-based strike number.
    pub index: u32,
    /// Damage computed for the strike.
    pub damage: u32,
    /// Portion soaked by the target's temporary HP.
    pub absorbed: u32,
    /// Damage reflected back to the attacker.
    pub reflected: u32,
    /// Damage the attacker took from a `SelfAndTarget` action.
    pub self_damage: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiHitOutcome {
    pub total_damage: u32,
    pub strikes: Vec<Strike>,
    pub target_defeated: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct MultiHitProcessor<'a> {
    config: &'a CombatConfig,
}

impl<'a> MultiHitProcessor<'a> {
    pub fn new(config: &'a CombatConfig) -> Self {
        Self { config }
    }

    /// Runs up to `action.multi_hit.strikes()` strikes, stopping right after the
    /// strike that defeats the target.
    pub fn process(
        &self,
        attacker: &mut ActorState,
        target: &mut ActorState,
        action: &ActionDefinition,
        modifiers: DamageModifiers,
    ) -> MultiHitOutcome {
        let calculator = DamageCalculator::new(self.config);
        let tuning = &self.config.effects;
        let modifiers = modifiers.with_strike_percent(action.multi_hit.damage_percent);
        let mut outcome = MultiHitOutcome::default();

        for index in 1..=action.multi_hit.strikes() {
            let damage = calculator.damage(attacker, target, action, modifiers);
            let absorbed = take_damage(target, damage);

            let reflect_percent = target
                .stacks(StatusEffectKind::Reflect)
                .saturating_mul(tuning.reflect_percent_per_stack)
                .min(100);
            let reflected = (u64::from(damage) * u64::from(reflect_percent) / 100) as u32;
            if reflected > 0 {
                take_damage(attacker, reflected);
            }

            let self_damage = if action.target == TargetShape::SelfAndTarget {
                take_damage(attacker, damage);
                damage
            } else {
                0
            };

            outcome.total_damage = outcome.total_damage.saturating_add(damage);
            outcome.strikes.push(Strike {
                index,
                damage,
                absorbed,
                reflected,
                self_damage,
            });

            tracing::debug!(
                action = %action.name,
                strike = index,
                damage,
                absorbed,
                target_hp = target.health.current(),
                "strike"
            );

            if target.is_defeated() {
                outcome.target_defeated = true;
                break;
            }
        }

        outcome
    }
}

/// Applies damage through temporary HP first; returns the amount it soaked.
pub(crate) fn take_damage(actor: &mut ActorState, damage: u32) -> u32 {
    let absorbed = actor.modifiers.temporary_hp.min(damage);
    actor.modifiers.temporary_hp -= absorbed;
    actor.health.damage(damage - absorbed);
    absorbed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorId, Attributes, HealthMeter};

    fn actor(id: u32, strength: i32, health: u32) -> ActorState {
        ActorState::new(ActorId(id), "Combatant", Attributes::new(strength, 5, 5, 5), health)
    }

    #[test]
    fn stops_on_the_killing_strike() {
        let config = CombatConfig::default();
        let mut attacker = actor(1, 10, 30);
        let mut target = actor(2, 5, 15);
        let action = ActionDefinition::attack("Triple Cut", 1.0).with_multi_hit(3, 100);

        let outcome = MultiHitProcessor::new(&config).process(
            &mut attacker,
            &mut target,
            &action,
            DamageModifiers::neutral(),
        );

        assert_eq!(outcome.strikes.len(), 2);
        assert_eq!(outcome.total_damage, 20);
        assert!(outcome.target_defeated);
        assert!(target.is_defeated());
    }

    #[test]
    fn every_strike_lands_when_target_survives() {
        let config = CombatConfig::default();
        let mut attacker = actor(1, 4, 30);
        let mut target = actor(2, 5, 100);
        let action = ActionDefinition::attack("Flurry", 1.0).with_multi_hit(4, 50);

        let outcome = MultiHitProcessor::new(&config).process(
            &mut attacker,
            &mut target,
            &action,
            DamageModifiers::neutral(),
        );

        // 4 raw × 50% per strike
        assert_eq!(outcome.strikes.len(), 4);
        assert!(outcome.strikes.iter().all(|s| s.damage == 2));
        assert_eq!(outcome.total_damage, 8);
        assert!(outcome.total_damage >= 4 * config.minimum_damage);
        assert_eq!(target.health.current(), 92);
    }

    #[test]
    fn temporary_hp_soaks_before_health() {
        let config = CombatConfig::default();
        let mut attacker = actor(1, 10, 30);
        let mut target = actor(2, 5, 40);
        target.modifiers.temporary_hp = 6;
        let action = ActionDefinition::attack("Jab", 1.0);

        let outcome = MultiHitProcessor::new(&config).process(
            &mut attacker,
            &mut target,
            &action,
            DamageModifiers::neutral(),
        );

        assert_eq!(outcome.strikes[0].absorbed, 6);
        assert_eq!(target.modifiers.temporary_hp, 0);
        assert_eq!(target.health.current(), 36);
    }

    #[test]
    fn self_and_target_hits_both() {
        let config = CombatConfig::default();
        let mut attacker = actor(1, 10, 30);
        let mut target = actor(2, 5, 40);
        let action = ActionDefinition::attack("Reckless Slam", 1.0)
            .with_target(TargetShape::SelfAndTarget);

        MultiHitProcessor::new(&config).process(
            &mut attacker,
            &mut target,
            &action,
            DamageModifiers::neutral(),
        );

        assert_eq!(target.health, HealthMeter::with_current(40, 30));
        assert_eq!(attacker.health, HealthMeter::with_current(30, 20));
    }

    #[test]
    fn reflect_returns_a_share() {
        let config = CombatConfig::default();
        let mut attacker = actor(1, 20, 30);
        let mut target = actor(2, 5, 100);
        target.status.apply(StatusEffectKind::Reflect, 2, 2, 5);
        let action = ActionDefinition::attack("Jab", 1.0);

        let outcome = MultiHitProcessor::new(&config).process(
            &mut attacker,
            &mut target,
            &action,
            DamageModifiers::neutral(),
        );

        // 20 × 20%
        assert_eq!(outcome.strikes[0].reflected, 4);
        assert_eq!(attacker.health.current(), 26);
    }
}
