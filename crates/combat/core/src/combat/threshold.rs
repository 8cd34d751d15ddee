//! Outcome thresholds and per-actor overrides.
//!
//! Defaults come from [`crate::CombatConfig`]; each actor may carry overrides
//! that persist until reset. Out-of-order values are accepted and reported:
//! classification always follows the same precedence regardless.

use crate::action::RollMods;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::{ActorState, ThresholdOverrides};

/// Threshold ordering violations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    #[error("critical miss threshold {critical_miss} is not below hit threshold {hit}")]
    CriticalMissNotBelowHit { critical_miss: u32, hit: u32 },

    #[error("hit threshold {hit} exceeds combo threshold {combo}")]
    HitAboveCombo { hit: u32, combo: u32 },

    #[error("combo threshold {combo} exceeds critical hit threshold {critical_hit}")]
    ComboAboveCritical { combo: u32, critical_hit: u32 },
}

impl CombatError for ThresholdError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CriticalMissNotBelowHit { .. } => "THRESHOLD_CRIT_MISS_NOT_BELOW_HIT",
            Self::HitAboveCombo { .. } => "THRESHOLD_HIT_ABOVE_COMBO",
            Self::ComboAboveCritical { .. } => "THRESHOLD_COMBO_ABOVE_CRITICAL",
        }
    }
}

/// The five outcome boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    /// Minimum total for a hit.
    pub hit: u32,
    /// Minimum total for a combo hit.
    pub combo: u32,
    /// Minimum total for a critical hit.
    pub critical_hit: u32,
    /// Natural or total at or below this is a critical miss.
    pub critical_miss: u32,
    /// Totals at or below this always miss.
    pub miss_ceiling: u32,
}

impl Thresholds {
    pub const DEFAULT_HIT: u32 = 6;
    pub const DEFAULT_COMBO: u32 = 14;
    pub const DEFAULT_CRITICAL_HIT: u32 = 20;
    pub const DEFAULT_CRITICAL_MISS: u32 = 1;
    pub const DEFAULT_MISS_CEILING: u32 = 5;

    /// Checks `critical_miss < hit <= combo <= critical_hit`.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if self.critical_miss >= self.hit {
            return Err(ThresholdError::CriticalMissNotBelowHit {
                critical_miss: self.critical_miss,
                hit: self.hit,
            });
        }
        if self.hit > self.combo {
            return Err(ThresholdError::HitAboveCombo {
                hit: self.hit,
                combo: self.combo,
            });
        }
        if self.combo > self.critical_hit {
            return Err(ThresholdError::ComboAboveCritical {
                combo: self.combo,
                critical_hit: self.critical_hit,
            });
        }
        Ok(())
    }

    /// Lowest total that can hit once the miss ceiling is honoured.
    pub fn effective_hit(&self) -> u32 {
        self.hit.max(self.miss_ceiling.saturating_add(1))
    }

    /// Copy with an action's one-resolution overrides applied.
    pub fn with_action_overrides(mut self, mods: &RollMods) -> Self {
        if let Some(hit) = mods.hit_threshold {
            self.hit = hit;
        }
        if let Some(combo) = mods.combo_threshold {
            self.combo = combo;
        }
        if let Some(critical) = mods.critical_threshold {
            self.critical_hit = critical;
        }
        self
    }

    fn with_overrides(mut self, overrides: &ThresholdOverrides) -> Self {
        self.hit = overrides.hit.unwrap_or(self.hit);
        self.combo = overrides.combo.unwrap_or(self.combo);
        self.critical_hit = overrides.critical_hit.unwrap_or(self.critical_hit);
        self.critical_miss = overrides.critical_miss.unwrap_or(self.critical_miss);
        self.miss_ceiling = overrides.miss_ceiling.unwrap_or(self.miss_ceiling);
        self
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hit: Self::DEFAULT_HIT,
            combo: Self::DEFAULT_COMBO,
            critical_hit: Self::DEFAULT_CRITICAL_HIT,
            critical_miss: Self::DEFAULT_CRITICAL_MISS,
            miss_ceiling: Self::DEFAULT_MISS_CEILING,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThresholdKind {
    Hit,
    Combo,
    CriticalHit,
    CriticalMiss,
    MissCeiling,
}

/// Reads and writes an actor's threshold overrides against shared defaults.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdManager<'a> {
    defaults: &'a Thresholds,
}

impl<'a> ThresholdManager<'a> {
    pub fn new(defaults: &'a Thresholds) -> Self {
        Self { defaults }
    }

    /// Defaults merged with the actor's overrides.
    pub fn effective(&self, actor: &ActorState) -> Thresholds {
        self.defaults.with_overrides(&actor.thresholds)
    }

    pub fn get(&self, actor: &ActorState, kind: ThresholdKind) -> u32 {
        let t = self.effective(actor);
        match kind {
            ThresholdKind::Hit => t.hit,
            ThresholdKind::Combo => t.combo,
            ThresholdKind::CriticalHit => t.critical_hit,
            ThresholdKind::CriticalMiss => t.critical_miss,
            ThresholdKind::MissCeiling => t.miss_ceiling,
        }
    }

    /// Overrides one threshold until [`reset`](Self::reset).
    pub fn set(&self, actor: &mut ActorState, kind: ThresholdKind, value: u32) {
        let slot = match kind {
            ThresholdKind::Hit => &mut actor.thresholds.hit,
            ThresholdKind::Combo => &mut actor.thresholds.combo,
            ThresholdKind::CriticalHit => &mut actor.thresholds.critical_hit,
            ThresholdKind::CriticalMiss => &mut actor.thresholds.critical_miss,
            ThresholdKind::MissCeiling => &mut actor.thresholds.miss_ceiling,
        };
        *slot = Some(value);

        if let Err(error) = self.effective(actor).validate() {
            tracing::warn!(
                actor = %actor.name,
                ?kind,
                value,
                code = error.error_code(),
                severity = ?error.severity(),
                "threshold override leaves ordering violated: {error}"
            );
        }
    }

    /// Shifts one threshold relative to its current effective value.
    pub fn adjust(&self, actor: &mut ActorState, kind: ThresholdKind, delta: i32) {
        let current = self.get(actor, kind);
        let value = current.saturating_add_signed(delta);
        self.set(actor, kind, value);
    }

    /// Drops every override.
    pub fn reset(&self, actor: &mut ActorState) {
        actor.thresholds = ThresholdOverrides::default();
    }

    pub fn hit_threshold(&self, actor: &ActorState) -> u32 {
        self.get(actor, ThresholdKind::Hit)
    }

    pub fn combo_threshold(&self, actor: &ActorState) -> u32 {
        self.get(actor, ThresholdKind::Combo)
    }

    pub fn critical_hit_threshold(&self, actor: &ActorState) -> u32 {
        self.get(actor, ThresholdKind::CriticalHit)
    }

    pub fn critical_miss_threshold(&self, actor: &ActorState) -> u32 {
        self.get(actor, ThresholdKind::CriticalMiss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorId, Attributes};

    fn actor() -> ActorState {
        ActorState::new(ActorId(1), "Scout", Attributes::default(), 20)
    }

    #[test]
    fn defaults_are_ordered() {
        let t = Thresholds::default();
        assert_eq!((t.hit, t.combo, t.critical_hit, t.critical_miss), (6, 14, 20, 1));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn overrides_persist_until_reset() {
        let defaults = Thresholds::default();
        let manager = ThresholdManager::new(&defaults);
        let mut scout = actor();

        manager.set(&mut scout, ThresholdKind::Combo, 12);
        manager.adjust(&mut scout, ThresholdKind::Hit, -2);
        assert_eq!(manager.combo_threshold(&scout), 12);
        assert_eq!(manager.hit_threshold(&scout), 4);
        assert_eq!(manager.critical_hit_threshold(&scout), 20);

        manager.reset(&mut scout);
        assert_eq!(manager.combo_threshold(&scout), 14);
        assert_eq!(manager.hit_threshold(&scout), 6);
    }

    #[test]
    fn out_of_order_override_is_accepted_but_reported() {
        let defaults = Thresholds::default();
        let manager = ThresholdManager::new(&defaults);
        let mut scout = actor();

        manager.set(&mut scout, ThresholdKind::Hit, 18);
        manager.set(&mut scout, ThresholdKind::Combo, 10);

        let effective = manager.effective(&scout);
        assert_eq!(effective.hit, 18);
        assert_eq!(
            effective.validate(),
            Err(ThresholdError::HitAboveCombo { hit: 18, combo: 10 })
        );
        let error = effective.validate().unwrap_err();
        assert_eq!(error.severity(), ErrorSeverity::Internal);
        assert!(!error.severity().is_recoverable());
    }

    #[test]
    fn adjust_saturates_at_zero() {
        let defaults = Thresholds::default();
        let manager = ThresholdManager::new(&defaults);
        let mut scout = actor();

        manager.adjust(&mut scout, ThresholdKind::CriticalMiss, -5);
        assert_eq!(manager.critical_miss_threshold(&scout), 0);
    }

    #[test]
    fn action_overrides_do_not_touch_miss_boundaries() {
        let mods = RollMods {
            combo_threshold: Some(10),
            ..RollMods::default()
        };
        let t = Thresholds::default().with_action_overrides(&mods);
        assert_eq!(t.combo, 10);
        assert_eq!(t.critical_miss, 1);
        assert_eq!(t.effective_hit(), 6);
    }
}
