//! Actor roster loader.
//!
//! Loads actor templates from RON files and builds ready-to-fight
//! [`ActorState`]s by resolving action names against an [`ActionOracle`].

use std::path::Path;

use combat_core::{
    ActionDefinition, ActionInstanceId, ActionOracle, ActionSource, ActorId, ActorState,
};

use crate::loaders::{ContentError, LoadResult, read_file};
use crate::templates::ActorTemplate;

const EMBEDDED: &str = include_str!("../../data/actors/roster.ron");

/// Loader for actor rosters from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Load roster templates from a RON file.
    ///
    /// RON format: `Vec<(String, ActorTemplate)>`, keyed by roster name.
    pub fn load(path: &Path) -> LoadResult<Vec<(String, ActorTemplate)>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// The roster shipped with the crate.
    pub fn load_embedded() -> LoadResult<Vec<(String, ActorTemplate)>> {
        Self::parse(EMBEDDED)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<(String, ActorTemplate)>> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor roster RON: {}", e))
    }

    /// Finds `key` in a roster (case-insensitive) and builds it.
    pub fn spawn(
        roster: &[(String, ActorTemplate)],
        key: &str,
        id: ActorId,
        actions: &impl ActionOracle,
    ) -> LoadResult<ActorState> {
        let (_, template) = roster
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .ok_or_else(|| ContentError::UnknownActor(key.to_string()))?;

        let actor = Self::build(id, template, actions);
        if actor.pool.is_empty() {
            return Err(ContentError::EmptyKit(template.name.clone()).into());
        }
        Ok(actor)
    }

    /// Builds an actor from a template.
    ///
    /// # Action resolution
    ///
    /// - Unknown action names are logged and skipped
    /// - `defaults`, `actions`, and each gear item grant into the pool under
    ///   their own source
    /// - Combo-eligible actions with a preferred `order` are slotted in order;
    ///   ties keep grant order
    pub fn build(id: ActorId, template: &ActorTemplate, actions: &impl ActionOracle) -> ActorState {
        let mut actor = ActorState::new(
            id,
            template.name.clone(),
            template.attributes,
            template.max_health,
        )
        .with_equipment(template.equipment)
        .with_thresholds(template.thresholds);
        actor.modifiers.combo_survives_miss = template.combo_survives_miss;

        let resolve = |name: &String| -> Option<ActionDefinition> {
            let found = actions.lookup(name).cloned();
            if found.is_none() {
                tracing::warn!(actor = %template.name, action = %name, "unknown action; skipped");
            }
            found
        };

        for action in template.defaults.iter().filter_map(resolve) {
            actor.grant_action(ActionSource::Default, action);
        }
        for action in template.actions.iter().filter_map(resolve) {
            actor.grant_action(ActionSource::Class, action);
        }
        for gear in &template.gear {
            let granted: Vec<ActionDefinition> = gear.actions.iter().filter_map(resolve).collect();
            actor.grant_gear_actions(&gear.item, granted);
        }

        let mut slotted: Vec<(u32, ActionInstanceId)> = actor
            .pool
            .iter()
            .filter(|entry| entry.action.is_combo_eligible())
            .filter_map(|entry| entry.action.combo.order.map(|order| (order, entry.id)))
            .collect();
        slotted.sort_unstable();
        for (_, instance) in slotted {
            if let Err(error) = actor.add_to_combo(instance) {
                tracing::warn!(actor = %template.name, %error, "combo slot rejected");
            }
        }

        tracing::debug!(
            actor = %actor.name,
            pool = actor.pool.len(),
            combo = actor.combo.len(),
            "actor built"
        );
        actor
    }
}
