//! Attacks a contestant knows, ordered by how far they reach.

use std::sync::Arc;

use arena_core::{Action, ActionCatalog, ActionTemplate, Reach, validate_reach};

use crate::config::KnownAttackSpec;
use crate::error::Result;

/// Attack templates paired with their maximum reach, always sorted ascending
/// by reach (stable for equal reaches).
#[derive(Clone, Debug, Default)]
pub struct KnownAttacks {
    entries: Vec<(Arc<ActionTemplate>, f32)>,
}

impl KnownAttacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `specs` against `catalog`, scaling each limb's reach.
    ///
    /// Fails on unknown action names, on head/torso reference limbs and on
    /// scales that are negative or not finite.
    pub fn from_specs(
        specs: &[KnownAttackSpec],
        catalog: &ActionCatalog,
        reach: &Reach,
    ) -> Result<Self> {
        let mut known = Self::new();
        for spec in specs {
            let template = Arc::clone(catalog.get(&spec.action)?);
            let max_reach = reach.for_part(spec.limb)? * validate_reach(spec.scale)?;
            known.insert(template, max_reach)?;
        }
        Ok(known)
    }

    /// Adds `template` with `max_reach`, keeping the order.
    ///
    /// Fails if `max_reach` is NaN, infinite or negative.
    pub fn insert(&mut self, template: Arc<ActionTemplate>, max_reach: f32) -> Result<()> {
        let max_reach = validate_reach(max_reach)?;
        let at = self
            .entries
            .partition_point(|(_, reach)| *reach <= max_reach);
        self.entries.insert(at, (template, max_reach));
        Ok(())
    }

    /// Removes every entry whose template is named `name`, returning how many.
    pub fn forget(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(template, _)| template.name() != name);
        before - self.entries.len()
    }

    /// Reach of the longest known attack.
    pub fn longest(&self) -> Option<f32> {
        self.entries.last().map(|(_, reach)| *reach)
    }

    /// Attacks whose reach covers `distance`, shortest first.
    pub fn reaching(&self, distance: f32) -> impl Iterator<Item = &(Arc<ActionTemplate>, f32)> + '_ {
        self.entries.iter().filter(move |(_, reach)| *reach >= distance)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Arc<ActionTemplate>, f32)> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if reaches are in ascending order.
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].1 <= pair[1].1)
    }
}
