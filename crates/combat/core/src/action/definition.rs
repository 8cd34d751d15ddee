//! Action definitions - complete static description of one action.

use crate::combat::TriggerCondition;
use crate::config::CombatConfig;
use crate::state::{StatusEffectKind, TimedBonus};

/// Broad category of an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionType {
    #[default]
    Attack,
    Heal,
    Buff,
    Debuff,
    Spell,
}

impl ActionType {
    /// Actions of this type roll against the target and deal damage.
    pub fn deals_damage(self) -> bool {
        matches!(self, Self::Attack | Self::Spell)
    }
}

/// Who an action lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetShape {
    /// Only the acting combatant.
    SelfOnly,
    #[default]
    SingleTarget,
    /// Every enemy. The core resolves one target per call, so this behaves like
    /// `SingleTarget` for the target it is given.
    AreaOfEffect,
    /// Strikes the target and the attacker alike.
    SelfAndTarget,
}

/// Tags for roll-scaling rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionTag {
    /// Roll bonus equal to the combo sequence length.
    ComboScaling,
    /// Roll bonus equal to the current position in the sequence.
    ComboStepScaling,
    /// Roll bonus of twice the current combo amplifier.
    ComboAmplificationScaling,
}

/// Where the combo pointer goes after this action lands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComboRouting {
    /// Next contiguous slot.
    #[default]
    Continue,
    /// Directly to the given 1-based slot.
    JumpToSlot(u32),
    /// Back to idle.
    Reset,
}

/// Combo sequence membership.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComboMembership {
    /// Whether the action may be placed in a combo sequence at all.
    pub eligible: bool,
    /// Preferred slot when a roster builds the sequence.
    pub order: Option<u32>,
    pub routing: ComboRouting,
}

/// Repeated strikes within one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MultiHit {
    pub count: u32,
    /// Damage of each strike as a percentage of a full hit.
    pub damage_percent: u32,
}

impl MultiHit {
    pub const fn single() -> Self {
        Self {
            count: 1,
            damage_percent: 100,
        }
    }

    /// Strike count clamped to `1..=MAX_MULTI_HIT`.
    pub fn strikes(&self) -> u32 {
        self.count.clamp(1, CombatConfig::MAX_MULTI_HIT)
    }
}

impl Default for MultiHit {
    fn default() -> Self {
        Self::single()
    }
}

/// Roll adjustments carried by the action itself.
///
/// Threshold overrides apply to the resolution of this action only; they never
/// touch the actor's persistent overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RollMods {
    /// Natural rolls at or above this value explode.
    pub exploding_on: Option<u32>,
    pub hit_threshold: Option<u32>,
    pub combo_threshold: Option<u32>,
    pub critical_threshold: Option<u32>,
    /// Natural rolls at or below this value (and above critical miss) crit.
    pub critical_on_natural_at_most: Option<u32>,
}

/// A status effect the action causes, optionally gated by trigger conditions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectTrigger {
    pub effect: StatusEffectKind,
    /// All must hold; empty means "whenever the action lands".
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<TriggerCondition>,
    #[cfg_attr(feature = "serde", serde(default = "EffectTrigger::default_stacks"))]
    pub stacks: u32,
}

impl EffectTrigger {
    pub fn new(effect: StatusEffectKind) -> Self {
        Self {
            effect,
            conditions: Vec::new(),
            stacks: Self::default_stacks(),
        }
    }

    fn default_stacks() -> u32 {
        1
    }
}

/// Static description of an action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionDefinition {
    pub name: String,
    pub action_type: ActionType,
    pub target: TargetShape,
    pub damage_multiplier: f64,
    /// Health restored by `Heal` actions.
    pub heal_amount: u32,
    /// Turns the used instance stays unavailable.
    pub cooldown: u32,
    pub multi_hit: MultiHit,
    pub roll_bonus: i32,
    /// Temporary roll bonus granted to the actor when the action lands.
    pub self_buff: Option<TimedBonus>,
    /// Roll penalty placed on the target when the action lands.
    pub target_roll_penalty: Option<TimedBonus>,
    /// Share of dealt damage the actor takes back.
    pub self_damage_percent: u32,
    pub combo: ComboMembership,
    pub roll_mods: RollMods,
    pub tags: Vec<ActionTag>,
    pub effects: Vec<EffectTrigger>,
    /// Overrides the per-kind default duration of every effect listed.
    pub effect_duration: Option<u32>,
}

impl ActionDefinition {
    pub fn new(name: impl Into<String>, action_type: ActionType) -> Self {
        Self {
            name: name.into(),
            action_type,
            ..Self::default()
        }
    }

    /// Single-target attack with the given damage multiplier.
    pub fn attack(name: impl Into<String>, damage_multiplier: f64) -> Self {
        Self {
            damage_multiplier,
            ..Self::new(name, ActionType::Attack)
        }
    }

    pub fn with_target(mut self, target: TargetShape) -> Self {
        self.target = target;
        self
    }

    pub fn with_multi_hit(mut self, count: u32, damage_percent: u32) -> Self {
        self.multi_hit = MultiHit {
            count,
            damage_percent,
        };
        self
    }

    /// Marks the action combo-eligible with the given routing.
    pub fn as_combo(mut self, routing: ComboRouting) -> Self {
        self.combo.eligible = true;
        self.combo.routing = routing;
        self
    }

    pub fn with_combo_order(mut self, order: u32) -> Self {
        self.combo.order = Some(order);
        self
    }

    pub fn with_effect(self, effect: StatusEffectKind) -> Self {
        self.with_effect_when(effect, Vec::new())
    }

    pub fn with_effect_when(
        mut self,
        effect: StatusEffectKind,
        conditions: Vec<TriggerCondition>,
    ) -> Self {
        self.effects.push(EffectTrigger {
            conditions,
            ..EffectTrigger::new(effect)
        });
        self
    }

    pub fn with_effect_duration(mut self, turns: u32) -> Self {
        self.effect_duration = Some(turns);
        self
    }

    pub fn with_tag(mut self, tag: ActionTag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn with_roll_bonus(mut self, bonus: i32) -> Self {
        self.roll_bonus = bonus;
        self
    }

    pub fn with_roll_mods(mut self, roll_mods: RollMods) -> Self {
        self.roll_mods = roll_mods;
        self
    }

    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cooldown = turns;
        self
    }

    pub fn with_heal(mut self, amount: u32) -> Self {
        self.heal_amount = amount;
        self
    }

    pub fn with_self_buff(mut self, amount: i32, turns: u32) -> Self {
        self.self_buff = Some(TimedBonus::new(amount, turns));
        self
    }

    pub fn with_target_roll_penalty(mut self, amount: i32, turns: u32) -> Self {
        self.target_roll_penalty = Some(TimedBonus::new(amount, turns));
        self
    }

    pub fn with_self_damage(mut self, percent: u32) -> Self {
        self.self_damage_percent = percent;
        self
    }

    pub fn is_combo_eligible(&self) -> bool {
        self.combo.eligible
    }

    pub fn has_tag(&self, tag: ActionTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Multiplier clamped to a finite, non-negative value.
    pub fn damage_multiplier(&self) -> f64 {
        if self.damage_multiplier.is_finite() {
            self.damage_multiplier.max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for ActionDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            action_type: ActionType::Attack,
            target: TargetShape::SingleTarget,
            damage_multiplier: 1.0,
            heal_amount: 0,
            cooldown: 0,
            multi_hit: MultiHit::single(),
            roll_bonus: 0,
            self_buff: None,
            target_roll_penalty: None,
            self_damage_percent: 0,
            combo: ComboMembership::default(),
            roll_mods: RollMods::default(),
            tags: Vec::new(),
            effects: Vec::new(),
            effect_duration: None,
        }
    }
}
