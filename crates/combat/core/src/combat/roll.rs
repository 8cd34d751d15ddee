//! Roll modification.
//!
//! # Formula
//!
//! ```text
//! modifier = intelligence / intelligence_per_roll_bonus
//!          + equipment roll bonus + modification roll bonus
//!          + combo scaling (per action tags)
//!          + temporary roll bonus + action roll bonus
//!          + focus stacks × focus_roll_per_stack
//!          - roll penalty
//!          - slow stacks × slow_roll_per_stack
//!          - confusion stacks × confusion_roll_per_stack
//!
//! total = max(1, base + explosion + modifier)
//! ```

use crate::action::{ActionDefinition, ActionTag};
use crate::combat::combo::combo_amplifier;
use crate::config::CombatConfig;
use crate::env::RandomSource;
use crate::state::{ActorState, StatusEffectKind};

/// A base roll with everything added.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifiedRoll {
    pub base: u32,
    pub explosion: u32,
    pub modifier: i32,
    pub total: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct RollModifier<'a> {
    config: &'a CombatConfig,
}

impl<'a> RollModifier<'a> {
    pub fn new(config: &'a CombatConfig) -> Self {
        Self { config }
    }

    /// Applies explosions and the net modifier to a natural roll.
    pub fn modify(
        &self,
        base: u32,
        actor: &ActorState,
        action: &ActionDefinition,
        dice: &mut (impl RandomSource + ?Sized),
    ) -> ModifiedRoll {
        let explosion = self.explode(base, action, dice);
        let modifier = self.modifier(actor, action);
        let raw = i64::from(base) + i64::from(explosion) + i64::from(modifier);
        ModifiedRoll {
            base,
            explosion,
            modifier,
            total: raw.clamp(1, i64::from(u32::MAX)) as u32,
        }
    }

    /// Net bonus minus penalties for this actor and action.
    pub fn modifier(&self, actor: &ActorState, action: &ActionDefinition) -> i32 {
        let tuning = &self.config.effects;
        let stacks = |kind| actor.stacks(kind) as i32;

        let intelligence = match self.config.intelligence_per_roll_bonus {
            per if per > 0 => actor.attributes.intelligence.max(0) / per,
            _ => 0,
        };

        let bonuses = intelligence
            + actor.equipment_roll_bonus()
            + actor.equipment.modification_roll_bonus
            + self.combo_scaling(actor, action)
            + actor.modifiers.temp_roll_bonus()
            + action.roll_bonus
            + stacks(StatusEffectKind::Focus) * tuning.focus_roll_per_stack;

        let penalties = actor.modifiers.roll_penalty()
            + stacks(StatusEffectKind::Slow) * tuning.slow_roll_per_stack
            + stacks(StatusEffectKind::Confusion) * tuning.confusion_roll_per_stack;

        bonuses.saturating_sub(penalties)
    }

    fn combo_scaling(&self, actor: &ActorState, action: &ActionDefinition) -> i32 {
        let len = actor.combo.len();
        let mut bonus = 0;
        if action.has_tag(ActionTag::ComboScaling) {
            bonus += len as i32;
        }
        if action.has_tag(ActionTag::ComboStepScaling) && len > 0 {
            bonus += (actor.combo_state.step() % len + 1) as i32;
        }
        if action.has_tag(ActionTag::ComboAmplificationScaling) {
            bonus += (combo_amplifier(actor, &self.config.combo) * 2.0).floor() as i32;
        }
        bonus
    }

    fn explode(
        &self,
        base: u32,
        action: &ActionDefinition,
        dice: &mut (impl RandomSource + ?Sized),
    ) -> u32 {
        let Some(threshold) = action.roll_mods.exploding_on else {
            return 0;
        };
        if base < threshold {
            return 0;
        }

        let sides = self.config.die_sides();
        let mut extra = 0u32;
        for _ in 0..self.config.explosion_cap() {
            let reroll = dice.roll_die(sides);
            extra = extra.saturating_add(reroll);
            if reroll < threshold {
                break;
            }
        }
        extra
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ComboRouting, RollMods};
    use crate::env::ScriptedDice;
    use crate::state::{ActionSource, ActorId, Attributes, EquipmentBonuses, TimedBonus};

    fn actor(intelligence: i32) -> ActorState {
        ActorState::new(ActorId(1), "Mage", Attributes::new(8, 8, 1, intelligence), 20)
    }

    #[test]
    fn sums_every_bonus_source() {
        let config = CombatConfig::default();
        let mut mage = actor(12).with_equipment(EquipmentBonuses {
            roll_bonus: 2,
            modification_roll_bonus: 1,
            ..EquipmentBonuses::default()
        });
        mage.modifiers.grant_roll_bonus(TimedBonus::new(3, 2));
        let action = ActionDefinition::attack("Arc", 1.0).with_roll_bonus(1);

        // 12 / 5 = 2 (int) + 2 (gear) + 1 (mod) + 3 (temp) + 1 (action)
        assert_eq!(RollModifier::new(&config).modifier(&mage, &action), 9);
    }

    #[test]
    fn penalties_can_push_total_below_base_but_not_below_one() {
        let config = CombatConfig::default();
        let mut mage = actor(0);
        mage.modifiers.impose_roll_penalty(TimedBonus::new(4, 2));
        mage.status.apply(StatusEffectKind::Confusion, 1, 2, 3);
        let action = ActionDefinition::attack("Arc", 1.0);
        let mut dice = ScriptedDice::default();

        let modifier = RollModifier::new(&config);
        // -4 (penalty) - 2 (confusion)
        assert_eq!(modifier.modify(10, &mage, &action, &mut dice).total, 4);
        assert_eq!(modifier.modify(3, &mage, &action, &mut dice).total, 1);
    }

    #[test]
    fn intelligence_bonus_is_monotonic() {
        let config = CombatConfig::default();
        let modifier = RollModifier::new(&config);
        let action = ActionDefinition::attack("Arc", 1.0);
        let mut previous = i32::MIN;
        for int in -5..40 {
            let bonus = modifier.modifier(&actor(int), &action);
            assert!(bonus >= previous);
            previous = bonus;
        }
    }

    #[test]
    fn exploding_dice_chain_until_a_low_reroll() {
        let config = CombatConfig::default();
        let action = ActionDefinition::attack("Wild Swing", 1.0).with_roll_mods(RollMods {
            exploding_on: Some(18),
            ..RollMods::default()
        });
        let mut dice = ScriptedDice::new([19, 4, 20]);

        let roll = RollModifier::new(&config).modify(20, &actor(0), &action, &mut dice);
        assert_eq!(roll.explosion, 23); // 19 explodes again, 4 stops
        assert_eq!(roll.total, 43);
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn explosions_are_capped() {
        let config = CombatConfig {
            max_explosions: 2,
            ..CombatConfig::default()
        };
        let action = ActionDefinition::attack("Wild Swing", 1.0).with_roll_mods(RollMods {
            exploding_on: Some(20),
            ..RollMods::default()
        });
        let mut dice = ScriptedDice::default().with_fallback(20);

        let roll = RollModifier::new(&config).modify(20, &actor(0), &action, &mut dice);
        assert_eq!(roll.explosion, 40);
    }

    #[test]
    fn combo_tags_scale_with_sequence() {
        let config = CombatConfig::default();
        let mut monk = actor(0);
        for i in 0..3 {
            let id = monk.grant_action(
                ActionSource::Class,
                ActionDefinition::attack(format!("Form {i}"), 1.0).as_combo(ComboRouting::Continue),
            );
            monk.add_to_combo(id).unwrap();
        }
        monk.combo_state.advance_to(2);

        let length = ActionDefinition::attack("Flurry", 1.0).with_tag(ActionTag::ComboScaling);
        let step = ActionDefinition::attack("Rising", 1.0).with_tag(ActionTag::ComboStepScaling);
        let amp = ActionDefinition::attack("Crescendo", 1.0)
            .with_tag(ActionTag::ComboAmplificationScaling);

        let modifier = RollModifier::new(&config);
        assert_eq!(modifier.modifier(&monk, &length), 3);
        assert_eq!(modifier.modifier(&monk, &step), 2); // step 1 -> position 2
        assert_eq!(modifier.modifier(&monk, &amp), 2); // 1.01 * 2 floored
    }
}
