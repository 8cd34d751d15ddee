//! Roster templates.
//!
//! A template names its actions instead of embedding them; the actor loader
//! resolves the names against an action catalog when it builds the actor.

use combat_core::{Attributes, EquipmentBonuses, ThresholdOverrides};

/// Static description of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorTemplate {
    pub name: String,
    pub attributes: Attributes,
    pub max_health: u32,
    pub equipment: EquipmentBonuses,
    pub thresholds: ThresholdOverrides,
    /// Class kit, by action name.
    pub actions: Vec<String>,
    /// Always-available kit, usually just the basic attack.
    pub defaults: Vec<String>,
    pub gear: Vec<GearTemplate>,
    /// Keeps the combo position through a missed roll.
    pub combo_survives_miss: bool,
}

impl Default for ActorTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            attributes: Attributes::default(),
            max_health: 1,
            equipment: EquipmentBonuses::default(),
            thresholds: ThresholdOverrides::default(),
            actions: Vec::new(),
            defaults: Vec::new(),
            gear: Vec::new(),
            combo_survives_miss: false,
        }
    }
}

/// An equipped item and the actions it grants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GearTemplate {
    pub item: String,
    pub actions: Vec<String>,
}

impl ActorTemplate {
    /// Every action name the template refers to, in grant order.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.defaults
            .iter()
            .chain(&self.actions)
            .chain(self.gear.iter().flat_map(|g| &g.actions))
            .map(String::as_str)
    }
}
