//! Template building blocks: tags, weight distributions, and ordered body targets.

use arrayvec::ArrayVec;

use crate::body::{BodyPart, Location, Range};

/// Semantic markers on an action, read by reaction and decision heuristics.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Tag {
    // Speed / weight
    Quick,
    Light,
    Heavy,

    // Path
    StraightPath,
    CurvedPath,

    // Reaction style
    Contact,
    NonContact,
    Return,

    // Footwork
    Step,
}

impl Tag {
    /// Tags describing the path a striking part travels along.
    pub const fn is_path(self) -> bool {
        matches!(self, Tag::StraightPath | Tag::CurvedPath)
    }
}

/// Percentage of body weight on the (left, right) foot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightDistribution(pub f32, pub f32);

impl WeightDistribution {
    pub const BALANCED: Self = Self(50.0, 50.0);

    pub const fn left(&self) -> f32 {
        self.0
    }

    pub const fn right(&self) -> f32 {
        self.1
    }

    /// Weight moved between two distributions, summed over both feet.
    pub fn shift_to(&self, other: &WeightDistribution) -> f32 {
        (self.0 - other.0).abs() + (self.1 - other.1).abs()
    }
}

impl Default for WeightDistribution {
    fn default() -> Self {
        Self::BALANCED
    }
}

/// Ordered mapping from body part to the location it travels to.
///
/// Holds at most one entry per [`BodyPart`]. Re-inserting a part replaces its
/// location in place, so iteration order is first-insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<(BodyPart, Location)>"))]
#[cfg_attr(feature = "serde", serde(into = "Vec<(BodyPart, Location)>"))]
pub struct BodyTargets {
    entries: ArrayVec<(BodyPart, Location), 6>,
}

impl BodyTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, part: BodyPart, location: Location) {
        match self.entries.iter_mut().find(|(p, _)| *p == part) {
            Some(entry) => entry.1 = location,
            // At most one entry per part, so six slots always suffice.
            None => self.entries.push((part, location)),
        }
    }

    pub fn get(&self, part: BodyPart) -> Option<Location> {
        self.entries
            .iter()
            .find(|(p, _)| *p == part)
            .map(|(_, location)| *location)
    }

    pub fn contains(&self, part: BodyPart) -> bool {
        self.get(part).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyPart, Location)> + '_ {
        self.entries.iter().copied()
    }

    pub fn parts(&self) -> impl Iterator<Item = BodyPart> + '_ {
        self.entries.iter().map(|(part, _)| *part)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(BodyPart, Location)> for BodyTargets {
    fn from_iter<I: IntoIterator<Item = (BodyPart, Location)>>(iter: I) -> Self {
        let mut targets = Self::new();
        for (part, location) in iter {
            targets.insert(part, location);
        }
        targets
    }
}

impl From<Vec<(BodyPart, Location)>> for BodyTargets {
    fn from(entries: Vec<(BodyPart, Location)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<BodyTargets> for Vec<(BodyPart, Location)> {
    fn from(targets: BodyTargets) -> Self {
        targets.entries.into_iter().collect()
    }
}

/// Fields shared by every action template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSpec {
    /// Display label.
    pub name: String,

    /// Parts involved and where they travel to. For attacks the location is
    /// on the opponent.
    pub target_body_locations: BodyTargets,

    /// Weight distribution required before execution.
    #[cfg_attr(feature = "serde", serde(default))]
    pub init_weight_distribution: WeightDistribution,

    /// Weight distribution once the action completes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub final_weight_distribution: WeightDistribution,

    /// How strictly the initial distribution must hold to execute.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight_distribution_necessity: f32,

    /// Locations exposed once the action completes, most likely first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub likely_vulnerabilities_after_execution: Vec<Location>,

    pub range: Range,

    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Tag>,
}

impl ActionSpec {
    /// Creates a balanced spec with no targets; fill in with the builder methods.
    pub fn new(name: impl Into<String>, range: Range) -> Self {
        Self {
            name: name.into(),
            target_body_locations: BodyTargets::new(),
            init_weight_distribution: WeightDistribution::BALANCED,
            final_weight_distribution: WeightDistribution::BALANCED,
            weight_distribution_necessity: 0.0,
            likely_vulnerabilities_after_execution: Vec::new(),
            range,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_target(mut self, part: BodyPart, location: Location) -> Self {
        self.target_body_locations.insert(part, location);
        self
    }

    #[must_use]
    pub fn with_weights(
        mut self,
        init: WeightDistribution,
        final_: WeightDistribution,
        necessity: f32,
    ) -> Self {
        self.init_weight_distribution = init;
        self.final_weight_distribution = final_;
        self.weight_distribution_necessity = necessity;
        self
    }

    #[must_use]
    pub fn with_vulnerabilities(mut self, locations: impl IntoIterator<Item = Location>) -> Self {
        self.likely_vulnerabilities_after_execution
            .extend(locations);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Weight moved over the course of the action.
    pub fn weight_shift(&self) -> f32 {
        self.init_weight_distribution
            .shift_to(&self.final_weight_distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinserting_a_part_keeps_its_position() {
        let mut targets = BodyTargets::new();
        targets.insert(BodyPart::FootL, Location::FootLOutside);
        targets.insert(BodyPart::HandL, Location::Chin);
        targets.insert(BodyPart::FootL, Location::FootLBack);

        let entries: Vec<_> = targets.iter().collect();
        assert_eq!(
            entries,
            vec![
                (BodyPart::FootL, Location::FootLBack),
                (BodyPart::HandL, Location::Chin),
            ]
        );
    }

    #[test]
    fn weight_shift_sums_both_feet() {
        let spec = ActionSpec::new("lunge", Range::Punch).with_weights(
            WeightDistribution(50.0, 50.0),
            WeightDistribution(70.0, 30.0),
            1.0,
        );
        assert_eq!(spec.weight_shift(), 40.0);
    }
}
