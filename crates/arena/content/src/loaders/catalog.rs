//! Action catalog loader.
//!
//! Loads action templates and combos from RON data files into an
//! [`ActionCatalog`].

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use arena_core::{ActionCatalog, ActionKind, ActionSpec, ActionTemplate, Range};

use crate::loaders::{LoadResult, read_file};

const ATTACKS_FILE: &str = "attacks.ron";
const REACTIONS_FILE: &str = "reactions.ron";
const MOVEMENTS_FILE: &str = "movements.ron";
const COMBOS_FILE: &str = "combos.ron";

/// A combo entry: registered under `key`, built from `members` in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComboSpec {
    pub key: String,
    pub name: String,
    pub members: Vec<String>,
    #[serde(default)]
    pub range: Option<Range>,
}

/// Raw contents of the four catalog files.
struct CatalogSources {
    attacks: String,
    reactions: String,
    movements: String,
    combos: String,
}

/// Loader for the action catalog.
///
/// Expected directory structure:
/// ```text
/// actions/
///   ├── attacks.ron
///   ├── reactions.ron
///   ├── movements.ron
///   └── combos.ron
/// ```
///
/// Template files hold a map from catalog key to template fields:
/// ```ron
/// {
///     "JAB_HEAD": (
///         name: "jab head",
///         target_body_locations: [(HAND_L, CHIN)],
///         range: PUNCH,
///         tags: [QUICK, LIGHT],
///     ),
/// }
/// ```
pub struct CatalogLoader;

impl CatalogLoader {
    /// Loads the standard catalog embedded at build time.
    pub fn load() -> LoadResult<ActionCatalog> {
        Self::build(CatalogSources {
            attacks: include_str!("../../data/actions/attacks.ron").to_owned(),
            reactions: include_str!("../../data/actions/reactions.ron").to_owned(),
            movements: include_str!("../../data/actions/movements.ron").to_owned(),
            combos: include_str!("../../data/actions/combos.ron").to_owned(),
        })
    }

    /// Loads a catalog from a directory laid out like `data/actions`.
    pub fn load_dir(dir: &Path) -> LoadResult<ActionCatalog> {
        Self::build(CatalogSources {
            attacks: read_file(&dir.join(ATTACKS_FILE))?,
            reactions: read_file(&dir.join(REACTIONS_FILE))?,
            movements: read_file(&dir.join(MOVEMENTS_FILE))?,
            combos: read_file(&dir.join(COMBOS_FILE))?,
        })
    }

    fn build(sources: CatalogSources) -> LoadResult<ActionCatalog> {
        let mut catalog = ActionCatalog::new();

        for (kind, file, content) in [
            (ActionKind::Attack, ATTACKS_FILE, &sources.attacks),
            (ActionKind::Reaction, REACTIONS_FILE, &sources.reactions),
            (ActionKind::Movement, MOVEMENTS_FILE, &sources.movements),
        ] {
            let specs: BTreeMap<String, ActionSpec> = ron::from_str(content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", file, e))?;
            for (key, spec) in specs {
                let template = ActionTemplate::from_spec(kind, spec)
                    .with_context(|| format!("{kind} is not a plain template kind"))?;
                catalog
                    .insert(key, template)
                    .with_context(|| format!("Failed to register template from {file}"))?;
            }
        }

        // Combos last: members must already be registered.
        let combos: Vec<ComboSpec> = ron::from_str(&sources.combos)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", COMBOS_FILE, e))?;
        for combo in combos {
            catalog
                .register_combo(combo.key.clone(), combo.name, &combo.members, combo.range)
                .with_context(|| format!("Failed to build combo '{}'", combo.key))?;
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{Action, BodyPart, Location, Tag};
    use std::fs;

    #[test]
    fn test_load_standard_catalog() {
        let catalog = CatalogLoader::load().expect("Failed to load action catalog");

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(
            names,
            vec![
                "JAB_HEAD",
                "RETURN_HAND_L_LOW_GUARD",
                "SIDE_PARRY_STRAIGHT_HEAD",
                "STEP",
                "STEP_JAB_HEAD",
            ]
        );

        let jab = catalog.get("JAB_HEAD").unwrap();
        assert_eq!(jab.kind(), ActionKind::Attack);
        assert_eq!(jab.range(), Range::Punch);
        assert_eq!(
            jab.target_body_locations().get(BodyPart::HandL),
            Some(Location::Chin)
        );
        assert!(jab.tags().contains(&Tag::StraightPath));

        let parry = catalog.get("SIDE_PARRY_STRAIGHT_HEAD").unwrap();
        assert_eq!(parry.kind(), ActionKind::Reaction);
        assert_eq!(parry.range(), Range::Null);
    }

    #[test]
    fn test_standard_combo_merges_members() {
        let catalog = CatalogLoader::load().unwrap();
        let combo = catalog.get("STEP_JAB_HEAD").unwrap();

        assert_eq!(combo.kind(), ActionKind::Combo);
        assert_eq!(combo.range(), Range::Kick);
        assert_eq!(
            combo.tags(),
            &[Tag::Step, Tag::Quick, Tag::Light, Tag::StraightPath]
        );
        let members: Vec<_> = combo
            .as_combo()
            .unwrap()
            .members()
            .iter()
            .map(|m| m.name().to_owned())
            .collect();
        assert_eq!(members, vec!["step", "jab head"]);
    }

    fn write_catalog(dir: &Path, combos: &str) {
        fs::write(
            dir.join(ATTACKS_FILE),
            r#"{ "HOOK": (name: "hook", target_body_locations: [(HAND_R, CHEEK_L)], range: PUNCH, tags: [HEAVY, CURVED_PATH]) }"#,
        )
        .unwrap();
        fs::write(dir.join(REACTIONS_FILE), "{}").unwrap();
        fs::write(
            dir.join(MOVEMENTS_FILE),
            r#"{ "SHUFFLE": (name: "shuffle", target_body_locations: [(FOOT_R, FOOT_R_BACK)], range: NULL) }"#,
        )
        .unwrap();
        fs::write(dir.join(COMBOS_FILE), combos).unwrap();
    }

    #[test]
    fn test_load_dir_reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            r#"[(key: "SHUFFLE_HOOK", name: "shuffle hook", members: ["SHUFFLE", "HOOK"], range: Some(PUNCH))]"#,
        );

        let catalog = CatalogLoader::load_dir(dir.path()).unwrap();
        assert_eq!(catalog.len(), 3);

        let hook = catalog.get("HOOK").unwrap();
        // Omitted fields fall back to defaults.
        assert_eq!(hook.spec().weight_distribution_necessity, 0.0);
        assert!(hook.likely_vulnerabilities().is_empty());

        let combo = catalog.get("SHUFFLE_HOOK").unwrap();
        assert_eq!(combo.range(), Range::Punch);
        assert_eq!(combo.target_body_locations().len(), 2);
    }

    #[test]
    fn test_load_dir_rejects_unknown_combo_member() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            r#"[(key: "BAD", name: "bad", members: ["HOOK", "UPPERCUT"])]"#,
        );

        let err = CatalogLoader::load_dir(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("UPPERCUT"));
    }

    #[test]
    fn test_load_dir_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogLoader::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains(ATTACKS_FILE));
    }
}
