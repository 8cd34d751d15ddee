//! Combatant state borrowed by a resolution.
//!
//! [`ActorState`] is the single owner of everything the rules read or write
//! about one combatant: attributes, health, equipment bonuses, threshold
//! overrides, the action pool, the combo sequence and position, status
//! effects, and temporary modifiers. External managers (class, gear, default
//! kit) change it only through the narrow API below, which keeps the pool and
//! combo sequence consistent.

use crate::action::ActionDefinition;
use crate::state::{
    ActionInstanceId, ActionPool, ActionSource, ComboError, ComboSequence, ComboState,
    StatusEffectKind, StatusEffects,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

/// Base attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub strength: i32,
    pub agility: i32,
    pub technique: i32,
    pub intelligence: i32,
}

impl Attributes {
    pub fn new(strength: i32, agility: i32, technique: i32, intelligence: i32) -> Self {
        Self {
            strength,
            agility,
            technique,
            intelligence,
        }
    }
}

/// Current and maximum health.
///
/// `current` never exceeds `max`; a zero `max` is treated as 1 wherever a
/// ratio is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthMeter {
    current: u32,
    max: u32,
}

impl HealthMeter {
    /// Full health.
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn with_current(max: u32, current: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Remaining health as a percentage of max (0-100).
    pub fn percent(&self) -> u32 {
        let max = u64::from(self.max.max(1));
        (u64::from(self.current) * 100 / max) as u32
    }

    /// Subtracts `amount`, returning how much was actually lost.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    /// Adds `amount` up to max, returning how much was actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max.saturating_sub(self.current));
        self.current += restored;
        restored
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Bonuses contributed by equipped gear and its modifications.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentBonuses {
    pub weapon_damage: i32,
    pub damage_bonus: i32,
    pub roll_bonus: i32,
    pub modification_roll_bonus: i32,
    pub modification_damage_bonus: i32,
    pub armor: i32,
    /// Chance (percent) that any non-critical-miss roll becomes a critical hit.
    pub critical_chance: u32,
}

/// A roll adjustment that lasts a number of turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedBonus {
    pub amount: i32,
    pub turns: u32,
}

impl TimedBonus {
    pub fn new(amount: i32, turns: u32) -> Self {
        Self { amount, turns }
    }

    /// Amount while turns remain, otherwise 0.
    pub fn active_amount(&self) -> i32 {
        if self.turns > 0 { self.amount } else { 0 }
    }

    /// Counts one turn down; returns `false` once expired.
    pub fn tick(&mut self) -> bool {
        self.turns = self.turns.saturating_sub(1);
        self.turns > 0
    }
}

/// Temporary modifiers outside the status-effect system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorModifiers {
    pub temp_roll_bonus: Option<TimedBonus>,
    /// Stored as a positive amount and subtracted from rolls.
    pub roll_penalty: Option<TimedBonus>,
    /// Keeps the combo position through a miss.
    pub combo_survives_miss: bool,
    /// Shield consumed before health.
    pub temporary_hp: u32,
}

impl ActorModifiers {
    pub fn temp_roll_bonus(&self) -> i32 {
        self.temp_roll_bonus.map_or(0, |b| b.active_amount())
    }

    pub fn roll_penalty(&self) -> i32 {
        self.roll_penalty.map_or(0, |b| b.active_amount())
    }

    /// Replaces the bonus when the new one is larger or lasts longer.
    pub fn grant_roll_bonus(&mut self, bonus: TimedBonus) {
        self.temp_roll_bonus = Some(merge_timed(self.temp_roll_bonus, bonus));
    }

    pub fn impose_roll_penalty(&mut self, penalty: TimedBonus) {
        self.roll_penalty = Some(merge_timed(self.roll_penalty, penalty));
    }

    /// Counts timed modifiers down and clears the expired ones.
    pub fn tick(&mut self) {
        for slot in [&mut self.temp_roll_bonus, &mut self.roll_penalty] {
            if slot.as_mut().is_some_and(|bonus| !bonus.tick()) {
                *slot = None;
            }
        }
    }
}

fn merge_timed(current: Option<TimedBonus>, incoming: TimedBonus) -> TimedBonus {
    match current {
        Some(existing) if existing.turns > 0 => TimedBonus {
            amount: existing.amount.max(incoming.amount),
            turns: existing.turns.max(incoming.turns),
        },
        _ => incoming,
    }
}

/// Per-actor threshold overrides; `None` falls back to the configured default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThresholdOverrides {
    pub hit: Option<u32>,
    pub combo: Option<u32>,
    pub critical_hit: Option<u32>,
    pub critical_miss: Option<u32>,
    pub miss_ceiling: Option<u32>,
}

impl ThresholdOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: ActorId,
    pub name: String,
    pub attributes: Attributes,
    pub health: HealthMeter,
    pub equipment: EquipmentBonuses,
    pub thresholds: ThresholdOverrides,
    pub pool: ActionPool,
    pub combo: ComboSequence,
    pub combo_state: ComboState,
    pub status: StatusEffects,
    pub modifiers: ActorModifiers,
}

impl ActorState {
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        attributes: Attributes,
        max_health: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            attributes,
            health: HealthMeter::new(max_health),
            equipment: EquipmentBonuses::default(),
            thresholds: ThresholdOverrides::default(),
            pool: ActionPool::new(),
            combo: ComboSequence::new(),
            combo_state: ComboState::idle(),
            status: StatusEffects::empty(),
            modifiers: ActorModifiers::default(),
        }
    }

    pub fn with_equipment(mut self, equipment: EquipmentBonuses) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdOverrides) -> Self {
        self.thresholds = thresholds;
        self
    }

    // ===== read accessors for the rules =====

    pub fn strength(&self) -> i32 {
        self.attributes.strength
    }

    pub fn equipment_roll_bonus(&self) -> i32 {
        self.equipment.roll_bonus
    }

    /// Definitions in combo order.
    pub fn combo_actions(&self) -> Vec<&ActionDefinition> {
        self.combo
            .slots()
            .iter()
            .filter_map(|slot| self.pool.get(slot.instance))
            .map(|entry| &entry.action)
            .collect()
    }

    pub fn stacks(&self, kind: StatusEffectKind) -> u32 {
        self.status.stacks(kind)
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    // ===== pool management =====

    pub fn grant_action(
        &mut self,
        source: ActionSource,
        action: ActionDefinition,
    ) -> ActionInstanceId {
        self.pool.grant(source, action)
    }

    /// Grants every action an item provides.
    pub fn grant_gear_actions(
        &mut self,
        item: &str,
        actions: impl IntoIterator<Item = ActionDefinition>,
    ) -> Vec<ActionInstanceId> {
        let source = ActionSource::Gear(item.to_string());
        actions
            .into_iter()
            .map(|action| self.pool.grant(source.clone(), action))
            .collect()
    }

    /// Removes every instance granted by `source`, unslotting them from the
    /// combo. Returns how many instances were removed.
    pub fn revoke_source(&mut self, source: &ActionSource) -> usize {
        let removed = self.pool.revoke_source(source);
        let mut unslotted = false;
        for id in &removed {
            unslotted |= self.combo.remove(*id);
        }
        if unslotted {
            self.reset_combo();
        }
        removed.len()
    }

    // ===== combo management =====

    /// Slots a pool instance at the end of the combo sequence.
    pub fn add_to_combo(&mut self, id: ActionInstanceId) -> Result<u32, ComboError> {
        let entry = self.pool.get(id).ok_or(ComboError::UnknownInstance(id))?;
        if !entry.action.is_combo_eligible() {
            return Err(ComboError::NotComboEligible {
                name: entry.action.name.clone(),
            });
        }
        self.combo.push(id)
    }

    /// Unslots an instance; absent instances are a no-op.
    pub fn remove_from_combo(&mut self, id: ActionInstanceId) -> bool {
        let removed = self.combo.remove(id);
        if removed {
            self.reset_combo();
        }
        removed
    }

    pub fn swap_combo_slots(&mut self, a: u32, b: u32) -> Result<(), ComboError> {
        self.combo.swap(a, b)
    }

    pub fn reset_combo(&mut self) {
        self.combo_state.reset();
    }
}
