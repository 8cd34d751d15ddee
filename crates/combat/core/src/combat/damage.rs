//! Damage calculation.
//!
//! # Formula
//!
//! ```text
//! strength'  = strength - stat_drain stacks × stat_drain_per_stack
//! raw        = max(1, (strength' + weapon + damage bonus + mod bonus) × action multiplier)
//! raw_factor = (1 + weakened + vulnerability + mark) × max(harden floor, 1 - harden)
//! armor      = (armor + fortify - armor break) × (1 - expose) × (1 - attacker pierce)
//!            + absorb stacks × absorb_per_stack
//!
//! damage = max(minimum, floor(raw × raw_factor × amplifier × strike scaling × crit) - armor)
//! ```

use crate::action::ActionDefinition;
use crate::config::CombatConfig;
use crate::state::{ActorState, StatusEffectKind};

/// Multipliers that depend on the resolution rather than on either actor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageModifiers {
    pub combo_amplifier: f64,
    /// Share of a full hit each strike deals (multi-hit scaling).
    pub strike_scaling: f64,
    /// Critical multiplier, 1.0 otherwise.
    pub outcome_multiplier: f64,
}

impl DamageModifiers {
    pub const fn neutral() -> Self {
        Self {
            combo_amplifier: 1.0,
            strike_scaling: 1.0,
            outcome_multiplier: 1.0,
        }
    }

    pub fn with_combo_amplifier(mut self, amplifier: f64) -> Self {
        self.combo_amplifier = amplifier;
        self
    }

    pub fn with_strike_percent(mut self, percent: u32) -> Self {
        self.strike_scaling = f64::from(percent) / 100.0;
        self
    }

    pub fn critical(mut self, config: &CombatConfig, is_critical: bool) -> Self {
        self.outcome_multiplier = if is_critical {
            f64::from(config.critical_damage_percent) / 100.0
        } else {
            1.0
        };
        self
    }

    fn product(&self) -> f64 {
        [self.combo_amplifier, self.strike_scaling, self.outcome_multiplier]
            .into_iter()
            .map(|m| if m.is_finite() { m.max(0.0) } else { 1.0 })
            .product()
    }
}

impl Default for DamageModifiers {
    fn default() -> Self {
        Self::neutral()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DamageCalculator<'a> {
    config: &'a CombatConfig,
}

impl<'a> DamageCalculator<'a> {
    pub fn new(config: &'a CombatConfig) -> Self {
        Self { config }
    }

    /// Attacker-side damage before any target modifier; always ≥ 1.
    pub fn raw_damage(&self, attacker: &ActorState, action: &ActionDefinition) -> f64 {
        let tuning = &self.config.effects;
        let drain =
            attacker.stacks(StatusEffectKind::StatDrain) as i32 * tuning.stat_drain_per_stack;
        let equipment = &attacker.equipment;

        let base = (attacker.strength() - drain)
            + equipment.weapon_damage
            + equipment.damage_bonus
            + equipment.modification_damage_bonus;

        (f64::from(base.max(1)) * action.damage_multiplier()).max(1.0)
    }

    /// Target-side scaling of the raw term; always > 0.
    pub fn raw_factor(&self, target: &ActorState) -> f64 {
        let tuning = &self.config.effects;
        let percent = |stacks: u32, per: u32| f64::from(stacks.saturating_mul(per)) / 100.0;

        let mut amplify = 1.0;
        if target.status.is_active(StatusEffectKind::Weaken) {
            amplify += f64::from(tuning.weakened_target_percent) / 100.0;
        }
        amplify += percent(
            target.stacks(StatusEffectKind::Vulnerability),
            tuning.vulnerability_percent_per_stack,
        );
        amplify += percent(target.stacks(StatusEffectKind::Mark), tuning.mark_percent_per_stack);

        let floor = (f64::from(tuning.harden_floor_percent) / 100.0).max(0.01);
        let harden = (1.0
            - percent(
                target.stacks(StatusEffectKind::Harden),
                tuning.harden_percent_per_stack,
            ))
        .max(floor);

        amplify * harden
    }

    /// Flat reduction subtracted from the scaled raw term; never negative.
    pub fn armor_reduction(&self, attacker: &ActorState, target: &ActorState) -> f64 {
        let tuning = &self.config.effects;
        let share_left = |stacks: u32, per: u32| {
            (1.0 - f64::from(stacks.saturating_mul(per)) / 100.0).max(0.0)
        };

        let armor = target.equipment.armor
            + target.stacks(StatusEffectKind::Fortify) as i32 * tuning.fortify_armor_per_stack
            - target.stacks(StatusEffectKind::ArmorBreak) as i32 * tuning.armor_break_per_stack;

        let armor = f64::from(armor.max(0))
            * share_left(
                target.stacks(StatusEffectKind::Expose),
                tuning.expose_percent_per_stack,
            )
            * share_left(
                attacker.stacks(StatusEffectKind::Pierce),
                tuning.pierce_percent_per_stack,
            );

        let absorb = target
            .stacks(StatusEffectKind::Absorb)
            .saturating_mul(tuning.absorb_per_stack);

        armor + f64::from(absorb)
    }

    /// Damage of one strike.
    pub fn damage(
        &self,
        attacker: &ActorState,
        target: &ActorState,
        action: &ActionDefinition,
        modifiers: DamageModifiers,
    ) -> u32 {
        let scaled =
            self.raw_damage(attacker, action) * self.raw_factor(target) * modifiers.product();
        let reduced = (scaled - self.armor_reduction(attacker, target)).floor();

        let minimum = self.config.minimum_damage.max(1);
        if reduced.is_finite() && reduced > f64::from(minimum) {
            reduced.min(f64::from(u32::MAX)) as u32
        } else {
            minimum
        }
    }
}
