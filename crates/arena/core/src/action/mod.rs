//! Action domain - templates contestants choose from and their concrete instances.
//!
//! # Module Structure
//!
//! - `template`: Building blocks shared by every template (tags, weights, body targets)
//! - `concrete`: Templates bound to world-space strike locations for one execution
//!
//! Templates are a closed sum type over attacks, reactions, movements, and
//! combos. Every variant exposes the same capabilities through [`Action`].
//! Combos are only built by [`crate::catalog::build_combo`], which enforces
//! that their members are plain templates.

pub mod concrete;
pub mod template;

use std::sync::Arc;

pub use concrete::{ConcreteAction, StrikeLocationMismatch, StrikeLocations};
pub use template::{ActionSpec, BodyTargets, Tag, WeightDistribution};

use crate::body::{BodyPart, Location, Range};

/// Capabilities shared by every action representation.
pub trait Action {
    /// Returns the fields common to every template.
    fn spec(&self) -> &ActionSpec;

    fn name(&self) -> &str {
        &self.spec().name
    }

    fn range(&self) -> Range {
        self.spec().range
    }

    fn tags(&self) -> &[Tag] {
        &self.spec().tags
    }

    fn target_body_locations(&self) -> &BodyTargets {
        &self.spec().target_body_locations
    }

    fn likely_vulnerabilities(&self) -> &[Location] {
        &self.spec().likely_vulnerabilities_after_execution
    }

    /// Returns true if executing this action moves `part`.
    fn involves_part(&self, part: BodyPart) -> bool {
        self.spec().target_body_locations.contains(part)
    }

    /// Weight moved between the initial and final distributions.
    fn weight_shift(&self) -> f32 {
        self.spec().weight_shift()
    }
}

/// Discriminant of an [`ActionTemplate`].
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    Attack,
    Reaction,
    Movement,
    Combo,
}

/// Immutable definition of something a contestant can do.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionTemplate {
    Attack(ActionSpec),
    Reaction(ActionSpec),
    Movement(ActionSpec),
    Combo(Combo),
}

impl ActionTemplate {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Attack(_) => ActionKind::Attack,
            Self::Reaction(_) => ActionKind::Reaction,
            Self::Movement(_) => ActionKind::Movement,
            Self::Combo(_) => ActionKind::Combo,
        }
    }

    /// Wraps a spec in the variant named by `kind`.
    ///
    /// Returns `None` for [`ActionKind::Combo`]; combos are built from members.
    pub fn from_spec(kind: ActionKind, spec: ActionSpec) -> Option<Self> {
        match kind {
            ActionKind::Attack => Some(Self::Attack(spec)),
            ActionKind::Reaction => Some(Self::Reaction(spec)),
            ActionKind::Movement => Some(Self::Movement(spec)),
            ActionKind::Combo => None,
        }
    }

    pub fn is_combo(&self) -> bool {
        matches!(self, Self::Combo(_))
    }

    pub fn as_combo(&self) -> Option<&Combo> {
        match self {
            Self::Combo(combo) => Some(combo),
            _ => None,
        }
    }
}

impl Action for ActionTemplate {
    fn spec(&self) -> &ActionSpec {
        match self {
            Self::Attack(spec) | Self::Reaction(spec) | Self::Movement(spec) => spec,
            Self::Combo(combo) => &combo.spec,
        }
    }
}

/// A template merged from an ordered sequence of non-combo members.
#[derive(Clone, Debug, PartialEq)]
pub struct Combo {
    spec: ActionSpec,
    members: Vec<Arc<ActionTemplate>>,
}

impl Combo {
    pub(crate) fn new(spec: ActionSpec, members: Vec<Arc<ActionTemplate>>) -> Self {
        Self { spec, members }
    }

    /// Member templates in execution order.
    pub fn members(&self) -> &[Arc<ActionTemplate>] {
        &self.members
    }
}

impl Action for Combo {
    fn spec(&self) -> &ActionSpec {
        &self.spec
    }
}
