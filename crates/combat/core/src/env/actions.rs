//! Action data source.
//!
//! The rules never load data themselves; they look actions up by name through
//! an [`ActionOracle`] supplied by the caller.

use std::collections::HashMap;

use crate::action::ActionDefinition;

/// Oracle providing action definitions by name.
pub trait ActionOracle {
    /// Returns the definition for `name`, ignoring ASCII case, or `None`.
    fn lookup(&self, name: &str) -> Option<&ActionDefinition>;
}

/// In-memory action catalog keyed by lowercase name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionCatalog {
    actions: HashMap<String, ActionDefinition>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = ActionDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition);
        }
        catalog
    }

    /// Inserts a definition, returning the one it replaced (same name, any case).
    pub fn insert(&mut self, definition: ActionDefinition) -> Option<ActionDefinition> {
        self.actions.insert(Self::key(&definition.name), definition)
    }

    /// Merges another catalog; entries in `other` win.
    pub fn extend(&mut self, other: ActionCatalog) {
        self.actions.extend(other.actions);
    }

    /// Sorted list of the stored names as written in the data.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.values().map(|a| a.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn key(name: &str) -> String {
        name.trim().to_ascii_lowercase()
    }
}

impl ActionOracle for ActionCatalog {
    fn lookup(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions.get(&Self::key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let catalog = ActionCatalog::from_definitions([
            ActionDefinition::attack("BASIC ATTACK", 1.0),
            ActionDefinition::attack("Double Strike", 0.8),
        ]);

        assert!(catalog.lookup("basic attack").is_some());
        assert!(catalog.lookup("double STRIKE").is_some());
        assert!(catalog.lookup("Triple Strike").is_none());
        assert_eq!(catalog.names(), vec!["BASIC ATTACK", "Double Strike"]);
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut catalog = ActionCatalog::new();
        catalog.insert(ActionDefinition::attack("Slash", 1.0));
        let replaced = catalog.insert(ActionDefinition::attack("SLASH", 2.0));

        assert!(replaced.is_some());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("slash").map(|a| a.damage_multiplier), Some(2.0));
    }
}
