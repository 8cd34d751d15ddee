//! Action definition loader.
//!
//! Loads action definitions from RON data files into an [`ActionCatalog`].

use std::path::Path;

use combat_core::{ActionCatalog, ActionDefinition};

use crate::loaders::{ContentError, LoadResult, read_file};

/// Embedded action files, loaded in order; later files win on a name clash.
const EMBEDDED: [(&str, &str); 3] = [
    ("basic.ron", include_str!("../../data/actions/basic.ron")),
    ("combo.ron", include_str!("../../data/actions/combo.ron")),
    ("spells.ron", include_str!("../../data/actions/spells.ron")),
];

/// Loader for action catalogs from RON files.
///
/// RON format: `Vec<ActionDefinition>`; every field except `name` is optional.
pub struct ActionLoader;

impl ActionLoader {
    /// Loads every action from the embedded data files.
    pub fn load_embedded() -> LoadResult<ActionCatalog> {
        let mut catalog = ActionCatalog::new();
        for (file, content) in EMBEDDED {
            catalog.extend(Self::parse(file, content)?);
        }
        Ok(catalog)
    }

    /// Loads actions from a RON file.
    pub fn load(path: &Path) -> LoadResult<ActionCatalog> {
        let content = read_file(path)?;
        Self::parse(&path.display().to_string(), &content)
    }

    /// Loads the embedded actions, then overlays each file in `paths`.
    pub fn load_with_overrides(paths: &[impl AsRef<Path>]) -> LoadResult<ActionCatalog> {
        let mut catalog = Self::load_embedded()?;
        for path in paths {
            catalog.extend(Self::load(path.as_ref())?);
        }
        Ok(catalog)
    }

    /// Parses one RON document.
    pub fn parse(source_name: &str, content: &str) -> LoadResult<ActionCatalog> {
        let definitions: Vec<ActionDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", source_name, e))?;
        if definitions.is_empty() {
            return Err(ContentError::NoActions {
                source_name: source_name.to_string(),
            }
            .into());
        }

        let count = definitions.len();
        let catalog = ActionCatalog::from_definitions(definitions);
        if catalog.len() < count {
            tracing::warn!(
                file = source_name,
                duplicates = count - catalog.len(),
                "duplicate action names; the last definition wins"
            );
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{
        ActionOracle, ActionType, ComboRouting, StatusEffectKind, TargetShape, TriggerCondition,
    };
    use std::io::Write;

    #[test]
    fn test_load_embedded_actions() {
        let catalog = ActionLoader::load_embedded().expect("Failed to load actions");

        assert!(catalog.len() >= 10, "Should have at least 10 actions");

        let basic = catalog.lookup("basic attack").expect("basic attack");
        assert_eq!(basic.action_type, ActionType::Attack);
        assert!(!basic.is_combo_eligible());

        let flurry = catalog.lookup("Flurry").expect("flurry");
        assert_eq!(flurry.multi_hit.count, 3);
        assert!(flurry.is_combo_eligible());

        let heal = catalog.lookup("MEND").expect("mend");
        assert_eq!(heal.action_type, ActionType::Heal);
        assert_eq!(heal.target, TargetShape::SelfOnly);
        assert!(heal.heal_amount > 0);
    }

    #[test]
    fn test_embedded_triggers_and_routing() {
        let catalog = ActionLoader::load_embedded().expect("Failed to load actions");

        let rend = catalog.lookup("Rend").expect("rend");
        assert_eq!(rend.effects[0].effect, StatusEffectKind::Bleed);
        assert_eq!(rend.effects[0].conditions, vec![TriggerCondition::OnCriticalHit]);

        let opener = catalog.lookup("Rising Palm").expect("rising palm");
        assert_eq!(opener.combo.routing, ComboRouting::JumpToSlot(3));
    }

    #[test]
    fn test_load_from_path_and_override() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[
                (name: "Basic Attack", damage_multiplier: 3.0),
                (name: "Haymaker", damage_multiplier: 2.5, cooldown: 2),
            ]"#
        )
        .expect("write");

        let from_file = ActionLoader::load(file.path()).expect("load");
        assert_eq!(from_file.len(), 2);
        let haymaker = from_file.lookup("haymaker").expect("haymaker");
        assert_eq!(haymaker.cooldown, 2);
        assert_eq!(haymaker.multi_hit.count, 1);

        let merged = ActionLoader::load_with_overrides(&[file.path()]).expect("merge");
        assert_eq!(merged.lookup("basic attack").map(|a| a.damage_multiplier), Some(3.0));
        assert!(merged.lookup("Flurry").is_some());
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(ActionLoader::parse("broken.ron", "[(name: ").is_err());

        let empty = ActionLoader::parse("empty.ron", "[]").unwrap_err();
        assert!(empty.downcast_ref::<ContentError>().is_some());

        let missing = ActionLoader::load(Path::new("/nonexistent/actions.ron"));
        assert!(missing.is_err());
    }
}
