//! Templates bound to a single execution.

use std::cmp::Ordering;
use std::sync::Arc;

use arrayvec::ArrayVec;
use glam::Vec3;

use super::{Action, ActionSpec, ActionTemplate};
use crate::error::{ArenaError, ErrorSeverity};
use crate::id::ContestantId;

/// One world-space point per involved body part, in template order.
pub type StrikeLocations = ArrayVec<Vec3, 6>;

/// Raised when strike locations do not line up with a template's body targets.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("action '{action}' targets {expected} body parts but {found} strike locations were given")]
pub struct StrikeLocationMismatch {
    pub action: String,
    pub expected: usize,
    pub found: usize,
}

impl ArenaError for StrikeLocationMismatch {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "STRIKE_LOCATION_MISMATCH"
    }
}

/// A template with concrete strike locations for one execution.
///
/// Ephemeral: created per decision cycle and dropped once its motion completes.
/// Use [`ConcreteAction::cmp_by_range`] to order by chosen distance.
#[derive(Clone, Debug, PartialEq)]
pub struct ConcreteAction {
    template: Arc<ActionTemplate>,
    strike_locations: StrikeLocations,
    max_range: f32,
    victim: Option<ContestantId>,
    serial: u64,
}

impl ConcreteAction {
    /// Binds `template` to `strike_locations`.
    ///
    /// # Errors
    ///
    /// Fails unless there is exactly one strike location per body target.
    pub fn new(
        template: Arc<ActionTemplate>,
        strike_locations: StrikeLocations,
        max_range: f32,
    ) -> Result<Self, StrikeLocationMismatch> {
        let expected = template.target_body_locations().len();
        if strike_locations.len() != expected {
            return Err(StrikeLocationMismatch {
                action: template.name().to_owned(),
                expected,
                found: strike_locations.len(),
            });
        }
        Ok(Self {
            template,
            strike_locations,
            max_range,
            victim: None,
            serial: 0,
        })
    }

    #[must_use]
    pub fn with_victim(mut self, victim: ContestantId) -> Self {
        self.victim = Some(victim);
        self
    }

    #[must_use]
    pub fn with_serial(mut self, serial: u64) -> Self {
        self.serial = serial;
        self
    }

    pub fn template(&self) -> &Arc<ActionTemplate> {
        &self.template
    }

    pub fn strike_locations(&self) -> &[Vec3] {
        &self.strike_locations
    }

    /// Strike location of `part`, if this action moves it.
    pub fn strike_location(&self, part: crate::body::BodyPart) -> Option<Vec3> {
        self.template
            .target_body_locations()
            .parts()
            .zip(self.strike_locations.iter())
            .find(|(p, _)| *p == part)
            .map(|(_, point)| *point)
    }

    /// Distance to the victim that justified selecting this action.
    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    pub fn victim(&self) -> Option<ContestantId> {
        self.victim
    }

    /// Per-contestant sequence number assigned when the action was chosen.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Orders actions by the distance that justified choosing them.
    pub fn cmp_by_range(&self, other: &Self) -> Ordering {
        self.max_range.total_cmp(&other.max_range)
    }
}

impl Action for ConcreteAction {
    fn spec(&self) -> &ActionSpec {
        self.template.spec()
    }
}
