//! Per-actor pool of action instances.
//!
//! Class progression, equipped gear, and the default kit all propose actions;
//! the pool owns the resulting instances. The same definition may appear more
//! than once (two swords granting the same strike), each copy with its own
//! [`ActionInstanceId`] and cooldown.

use crate::action::ActionDefinition;

/// Stable handle to one action instance in an actor's pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionInstanceId(pub u32);

impl std::fmt::Display for ActionInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Who granted an action instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionSource {
    /// Class progression.
    Class,
    /// Equipped item, by item name.
    Gear(String),
    /// Always-available kit.
    Default,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PooledAction {
    pub id: ActionInstanceId,
    pub source: ActionSource,
    pub action: ActionDefinition,
    pub cooldown_remaining: u32,
}

impl PooledAction {
    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPool {
    next_id: u32,
    entries: Vec<PooledAction>,
}

impl ActionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance and returns its id.
    pub fn grant(&mut self, source: ActionSource, action: ActionDefinition) -> ActionInstanceId {
        self.next_id += 1;
        let id = ActionInstanceId(self.next_id);
        self.entries.push(PooledAction {
            id,
            source,
            action,
            cooldown_remaining: 0,
        });
        id
    }

    /// Removes every instance granted by `source` and returns their ids.
    pub fn revoke_source(&mut self, source: &ActionSource) -> Vec<ActionInstanceId> {
        let removed = self
            .entries
            .iter()
            .filter(|e| &e.source == source)
            .map(|e| e.id)
            .collect();
        self.entries.retain(|e| &e.source != source);
        removed
    }

    pub fn get(&self, id: ActionInstanceId) -> Option<&PooledAction> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ActionInstanceId) -> Option<&mut PooledAction> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// First instance with the given name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&PooledAction> {
        self.entries.iter().find(|e| e.action.is_named(name))
    }

    pub fn start_cooldown(&mut self, id: ActionInstanceId, turns: u32) {
        if let Some(entry) = self.get_mut(id) {
            entry.cooldown_remaining = turns;
        }
    }

    /// Counts every cooldown down by one turn.
    pub fn tick_cooldowns(&mut self) {
        for entry in &mut self.entries {
            entry.cooldown_remaining = entry.cooldown_remaining.saturating_sub(1);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PooledAction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
