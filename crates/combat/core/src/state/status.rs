//! Stacking status effects.
//!
//! Each effect kind occupies at most one slot: repeated application adds
//! stacks (up to the kind's cap) and refreshes the remaining duration to the
//! newly supplied value rather than summing it.

use arrayvec::ArrayVec;
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString};

use crate::config::CombatConfig;

/// Every effect kind the registry knows how to apply.
///
/// Parsing is case-insensitive and uses the lowercase identifiers found in
/// action data (`"armorbreak"`, `"hpregen"`, `"temporaryhp"`, ...).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    AsRefStr,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ===== damage over time =====
    Bleed,
    Poison,
    Burn,

    // ===== debuffs =====
    Weaken,
    Slow,
    Stun,
    Vulnerability,
    Expose,
    ArmorBreak,
    Silence,
    StatDrain,
    Confusion,
    Mark,

    // ===== buffs =====
    Harden,
    Fortify,
    Focus,
    HpRegen,
    Pierce,
    Reflect,
    Absorb,
    TemporaryHp,

    // ===== instantaneous =====
    Cleanse,
    Disrupt,
}

impl StatusEffectKind {
    /// Parses an effect identifier; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    /// Negative effects, the ones Cleanse strips and that land on the target.
    pub fn is_harmful(self) -> bool {
        use StatusEffectKind::*;
        matches!(
            self,
            Bleed
                | Poison
                | Burn
                | Weaken
                | Slow
                | Stun
                | Vulnerability
                | Expose
                | ArmorBreak
                | Silence
                | StatDrain
                | Confusion
                | Mark
                | Disrupt
        )
    }

    /// Effects that act once and are never stored on the actor.
    pub fn is_instant(self) -> bool {
        matches!(self, Self::Cleanse | Self::Disrupt)
    }
}

/// One stored effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub kind: StatusEffectKind,
    pub stacks: u32,
    pub turns_remaining: u32,
}

/// Active status effects on an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<ActiveEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Current stack count (0 when absent).
    pub fn stacks(&self, kind: StatusEffectKind) -> u32 {
        self.get(kind).map_or(0, |e| e.stacks)
    }

    pub fn is_active(&self, kind: StatusEffectKind) -> bool {
        self.stacks(kind) > 0
    }

    /// Adds `stacks` (capped at `max_stacks`) and refreshes the duration.
    ///
    /// Returns the resulting stack count. Zero stacks or zero turns is a no-op.
    pub fn apply(
        &mut self,
        kind: StatusEffectKind,
        stacks: u32,
        turns: u32,
        max_stacks: u32,
    ) -> u32 {
        let cap = max_stacks.max(1);
        if stacks == 0 || turns == 0 {
            return self.stacks(kind);
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.stacks = existing.stacks.saturating_add(stacks).min(cap);
            existing.turns_remaining = turns;
            return existing.stacks;
        }

        let stacks = stacks.min(cap);
        if self
            .effects
            .try_push(ActiveEffect {
                kind,
                stacks,
                turns_remaining: turns,
            })
            .is_err()
        {
            return 0;
        }
        stacks
    }

    /// Removes up to `by` stacks, dropping the effect when none remain.
    ///
    /// Returns the number of stacks actually removed.
    pub fn reduce(&mut self, kind: StatusEffectKind, by: u32) -> u32 {
        let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) else {
            return 0;
        };
        let removed = existing.stacks.min(by);
        existing.stacks -= removed;
        self.effects.retain(|e| e.stacks > 0);
        removed
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusEffectKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    /// Counts down one turn on every effect and drops the ones that expire.
    ///
    /// Returns the kinds that expired this tick.
    pub fn tick(&mut self) -> Vec<StatusEffectKind> {
        for effect in self.effects.iter_mut() {
            effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
        }
        let expired = self
            .effects
            .iter()
            .filter(|e| e.turns_remaining == 0)
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| e.turns_remaining > 0);
        expired
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
