//! Outcome classification.
//!
//! Precedence, first match wins:
//!
//! 1. natural or total at or below the critical-miss threshold: `CriticalMiss`
//! 2. guaranteed critical on a low natural: `CriticalHit`
//! 3. total at or below the miss ceiling: `Miss`
//! 4. total ≥ critical-hit threshold: `CriticalHit`
//! 5. total ≥ combo threshold: `ComboHit`
//! 6. total ≥ hit threshold: `Hit`
//! 7. otherwise `Miss`
//!
//! A `Hit` or `ComboHit` may afterwards be promoted to `CriticalHit` by the
//! actor's critical chance. A miss is never promoted.
//!
//! `is_combo` depends only on the total against the combo threshold, never on
//! the action that was rolled.

use crate::combat::{ModifiedRoll, Thresholds};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollOutcome {
    CriticalMiss,
    Miss,
    Hit,
    ComboHit,
    CriticalHit,
}

impl RollOutcome {
    /// Any non-miss outcome.
    pub fn lands(self) -> bool {
        matches!(self, Self::Hit | Self::ComboHit | Self::CriticalHit)
    }
}

/// Classifies a roll.
pub fn classify(
    natural: u32,
    total: u32,
    thresholds: &Thresholds,
    forced_critical: bool,
) -> RollOutcome {
    if natural <= thresholds.critical_miss || total <= thresholds.critical_miss {
        RollOutcome::CriticalMiss
    } else if forced_critical {
        RollOutcome::CriticalHit
    } else if total <= thresholds.miss_ceiling {
        RollOutcome::Miss
    } else if total >= thresholds.critical_hit {
        RollOutcome::CriticalHit
    } else if total >= thresholds.combo {
        RollOutcome::ComboHit
    } else if total >= thresholds.hit {
        RollOutcome::Hit
    } else {
        RollOutcome::Miss
    }
}

/// A fully resolved roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    /// Natural die face.
    pub base: u32,
    /// Sum of exploding re-rolls.
    pub explosion: u32,
    /// Net bonus minus penalties.
    pub modifier: i32,
    pub total: u32,
    pub outcome: RollOutcome,
    pub is_combo: bool,
    pub is_critical: bool,
}

impl RollResult {
    pub fn resolve(roll: ModifiedRoll, thresholds: &Thresholds, forced_critical: bool) -> Self {
        let outcome = classify(roll.base, roll.total, thresholds, forced_critical);
        Self {
            base: roll.base,
            explosion: roll.explosion,
            modifier: roll.modifier,
            total: roll.total,
            outcome,
            is_combo: outcome.lands() && roll.total >= thresholds.combo,
            is_critical: outcome == RollOutcome::CriticalHit,
        }
    }

    /// Upgrades a landed roll to `CriticalHit`; misses are returned unchanged.
    pub fn promote_critical(self) -> Self {
        if !self.outcome.lands() {
            return self;
        }
        Self {
            outcome: RollOutcome::CriticalHit,
            is_critical: true,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn natural(total: u32) -> ModifiedRoll {
        ModifiedRoll {
            base: total,
            explosion: 0,
            modifier: 0,
            total,
        }
    }

    #[test]
    fn every_d20_face_classifies_by_default_thresholds() {
        let t = Thresholds::default();
        for face in 1..=20 {
            let outcome = classify(face, face, &t, false);
            let expected = match face {
                1 => RollOutcome::CriticalMiss,
                2..=5 => RollOutcome::Miss,
                6..=13 => RollOutcome::Hit,
                14..=19 => RollOutcome::ComboHit,
                _ => RollOutcome::CriticalHit,
            };
            assert_eq!(outcome, expected, "face {face}");
        }
    }

    #[test]
    fn natural_one_is_critical_miss_despite_bonuses() {
        let t = Thresholds::default();
        assert_eq!(classify(1, 15, &t, false), RollOutcome::CriticalMiss);
        assert_eq!(classify(1, 15, &t, true), RollOutcome::CriticalMiss);
    }

    #[test]
    fn miss_ceiling_caps_a_lowered_hit_threshold() {
        let t = Thresholds {
            hit: 3,
            ..Thresholds::default()
        };
        assert_eq!(classify(4, 4, &t, false), RollOutcome::Miss);
        assert_eq!(classify(6, 6, &t, false), RollOutcome::Hit);
        assert_eq!(t.effective_hit(), 6);
    }

    #[test]
    fn is_combo_comes_from_total_only() {
        let t = Thresholds::default();

        let at_combo = RollResult::resolve(natural(14), &t, false);
        assert!(at_combo.is_combo);
        assert!(!at_combo.is_critical);

        let below = RollResult::resolve(natural(13), &t, false);
        assert!(!below.is_combo);

        let critical = RollResult::resolve(natural(20), &t, false);
        assert!(critical.is_combo && critical.is_critical);
    }

    #[test]
    fn forced_critical_on_low_total_is_not_combo() {
        let t = Thresholds::default();
        let roll = RollResult::resolve(natural(3), &t, true);

        assert_eq!(roll.outcome, RollOutcome::CriticalHit);
        assert!(roll.is_critical);
        assert!(!roll.is_combo);
    }

    #[test]
    fn promotion_never_lands_a_miss() {
        let t = Thresholds::default();

        let miss = RollResult::resolve(natural(3), &t, false);
        assert_eq!(miss.promote_critical(), miss);

        let hit = RollResult::resolve(natural(8), &t, false).promote_critical();
        assert_eq!(hit.outcome, RollOutcome::CriticalHit);
        assert!(hit.is_critical);
        assert!(!hit.is_combo);
    }
}
