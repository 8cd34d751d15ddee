//! Combat configuration constants and tunable parameters.
//!
//! Every field has a default so partial data files only need to name what they
//! change. Percentages are stored as integers (`50` = 50%).

use crate::combat::Thresholds;
use crate::state::StatusEffectKind;

/// Rule tuning for one battle (or one process).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Number of faces on the attack die.
    pub die_sides: u32,

    /// Outcome boundaries used when an actor has no overrides.
    pub thresholds: Thresholds,

    /// Floor applied to every strike that lands.
    pub minimum_damage: u32,

    /// Damage multiplier for critical hits, as a percentage.
    pub critical_damage_percent: u32,

    /// Maximum number of re-rolls a single exploding die may chain.
    pub max_explosions: u32,

    /// Intelligence points per +1 roll bonus.
    pub intelligence_per_roll_bonus: i32,

    pub combo: ComboTuning,

    pub effects: EffectTuning,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// Capacity of an actor's active effect list (one slot per effect kind).
    pub const MAX_STATUS_EFFECTS: usize = 24;
    /// Upper bound on `max_explosions`, whatever the data file says.
    pub const MAX_EXPLOSIONS_HARD_CAP: u32 = 10;
    /// Upper bound on strikes per action.
    pub const MAX_MULTI_HIT: u32 = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DIE_SIDES: u32 = 20;
    pub const DEFAULT_MINIMUM_DAMAGE: u32 = 1;
    pub const DEFAULT_CRITICAL_DAMAGE_PERCENT: u32 = 200;
    pub const DEFAULT_MAX_EXPLOSIONS: u32 = 3;
    pub const DEFAULT_INTELLIGENCE_PER_ROLL_BONUS: i32 = 5;

    pub fn new() -> Self {
        Self {
            die_sides: Self::DEFAULT_DIE_SIDES,
            thresholds: Thresholds::default(),
            minimum_damage: Self::DEFAULT_MINIMUM_DAMAGE,
            critical_damage_percent: Self::DEFAULT_CRITICAL_DAMAGE_PERCENT,
            max_explosions: Self::DEFAULT_MAX_EXPLOSIONS,
            intelligence_per_roll_bonus: Self::DEFAULT_INTELLIGENCE_PER_ROLL_BONUS,
            combo: ComboTuning::default(),
            effects: EffectTuning::default(),
        }
    }

    /// Die size, never below 2.
    pub fn die_sides(&self) -> u32 {
        self.die_sides.max(2)
    }

    /// Explosion cap after applying the hard cap.
    pub fn explosion_cap(&self) -> u32 {
        self.max_explosions.min(Self::MAX_EXPLOSIONS_HARD_CAP)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What happens when `Continue` routing runs past the last slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComboEnd {
    /// Start over at slot 1.
    #[default]
    Wrap,
    /// Drop back to idle.
    Terminate,
}

/// Combo amplifier curve and sequence behaviour.
///
/// The per-step base amplifier grows linearly with technique: from
/// `amplifier_at_tech1` at technique 1 to `amplifier_at_tech5` at technique 5,
/// then on to `amplifier_max` at `amplifier_max_tech`. The amplifier at step
/// `k` is `base^k`, so step 0 is always 1.0.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComboTuning {
    pub amplifier_at_tech1: f64,
    pub amplifier_at_tech5: f64,
    pub amplifier_max: f64,
    pub amplifier_max_tech: i32,
    pub end_of_sequence: ComboEnd,
}

impl Default for ComboTuning {
    fn default() -> Self {
        Self {
            amplifier_at_tech1: 1.01,
            amplifier_at_tech5: 1.05,
            amplifier_max: 1.25,
            amplifier_max_tech: 20,
            end_of_sequence: ComboEnd::Wrap,
        }
    }
}

/// Duration and stacking rule for one effect kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRule {
    pub kind: StatusEffectKind,
    /// Turns applied when the causing action does not set its own duration.
    pub duration: u32,
    pub max_stacks: u32,
}

impl EffectRule {
    pub const fn new(kind: StatusEffectKind, duration: u32, max_stacks: u32) -> Self {
        Self {
            kind,
            duration,
            max_stacks,
        }
    }
}

/// Status-effect tuning consumed by the registry, the damage calculator, the
/// roll modifier, and the per-turn tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectTuning {
    pub default_duration: u32,
    pub default_max_stacks: u32,
    /// Per-kind overrides of duration and stack cap.
    pub rules: Vec<EffectRule>,

    // ===== damage term =====
    pub weakened_target_percent: u32,
    pub vulnerability_percent_per_stack: u32,
    pub mark_percent_per_stack: u32,
    pub harden_percent_per_stack: u32,
    /// Harden never scales the raw term below this share.
    pub harden_floor_percent: u32,
    pub stat_drain_per_stack: i32,

    // ===== armor term =====
    pub fortify_armor_per_stack: i32,
    pub armor_break_per_stack: i32,
    pub expose_percent_per_stack: u32,
    pub pierce_percent_per_stack: u32,
    pub absorb_per_stack: u32,

    // ===== after the strike =====
    pub reflect_percent_per_stack: u32,
    pub temporary_hp_per_stack: u32,

    // ===== roll term =====
    pub focus_roll_per_stack: i32,
    pub slow_roll_per_stack: i32,
    pub confusion_roll_per_stack: i32,

    /// Stacks removed from each harmful effect by one Cleanse.
    pub cleanse_stacks: u32,

    // ===== per-turn tick =====
    pub bleed_damage_per_stack: u32,
    pub poison_damage_per_stack: u32,
    pub burn_damage_per_stack: u32,
    pub regen_per_stack: u32,
}

impl EffectTuning {
    /// Returns the rule for `kind`, falling back to the defaults.
    pub fn rule(&self, kind: StatusEffectKind) -> EffectRule {
        self.rules
            .iter()
            .copied()
            .find(|r| r.kind == kind)
            .unwrap_or(EffectRule::new(
                kind,
                self.default_duration,
                self.default_max_stacks,
            ))
    }
}

impl Default for EffectTuning {
    fn default() -> Self {
        use StatusEffectKind::*;
        Self {
            default_duration: 3,
            default_max_stacks: 10,
            rules: vec![
                EffectRule::new(Stun, 1, 1),
                EffectRule::new(Silence, 2, 1),
                EffectRule::new(Confusion, 2, 3),
                EffectRule::new(Weaken, 2, 5),
                EffectRule::new(Burn, 3, 5),
                EffectRule::new(Mark, 3, 3),
                EffectRule::new(Reflect, 2, 5),
            ],
            weakened_target_percent: 50,
            vulnerability_percent_per_stack: 10,
            mark_percent_per_stack: 15,
            harden_percent_per_stack: 10,
            harden_floor_percent: 10,
            stat_drain_per_stack: 1,
            fortify_armor_per_stack: 2,
            armor_break_per_stack: 2,
            expose_percent_per_stack: 20,
            pierce_percent_per_stack: 25,
            absorb_per_stack: 2,
            reflect_percent_per_stack: 10,
            temporary_hp_per_stack: 5,
            focus_roll_per_stack: 1,
            slow_roll_per_stack: 1,
            confusion_roll_per_stack: 2,
            cleanse_stacks: 2,
            bleed_damage_per_stack: 1,
            poison_damage_per_stack: 1,
            burn_damage_per_stack: 2,
            regen_per_stack: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_falls_back_to_defaults() {
        let tuning = EffectTuning::default();

        let stun = tuning.rule(StatusEffectKind::Stun);
        assert_eq!(stun.duration, 1);
        assert_eq!(stun.max_stacks, 1);

        let poison = tuning.rule(StatusEffectKind::Poison);
        assert_eq!(poison.duration, tuning.default_duration);
        assert_eq!(poison.max_stacks, tuning.default_max_stacks);
    }

    #[test]
    fn explosion_cap_respects_hard_cap() {
        let config = CombatConfig {
            max_explosions: 1_000,
            ..CombatConfig::default()
        };
        assert_eq!(config.explosion_cap(), CombatConfig::MAX_EXPLOSIONS_HARD_CAP);
    }

    #[test]
    fn degenerate_die_is_clamped() {
        let config = CombatConfig {
            die_sides: 0,
            ..CombatConfig::default()
        };
        assert_eq!(config.die_sides(), 2);
    }
}
