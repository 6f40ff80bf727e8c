//! Pose engine boundary.
//!
//! The pose engine owns where every contestant's body points actually are.
//! Contestants decide what to do; the engine moves the parts. Rig-driven
//! engines plug in through [`PoseEngine`]; [`KinematicPoseEngine`] is the
//! built-in stand-in that moves parts in straight lines.

use std::collections::BTreeMap;

use arena_core::{Affine3A, BodyLocations, BodyPart, BodyPose, ConcreteAction, ContestantId, Vec3};

/// Source of truth for contestant body poses.
pub trait PoseEngine {
    /// Puts `contestant` in the rest stance at `transform`.
    fn place(&mut self, contestant: ContestantId, transform: Affine3A);

    /// Current pose of `contestant`, if it has been placed.
    fn body_pose(&self, contestant: ContestantId) -> Option<BodyPose>;

    /// Advances `contestant`'s body by `delta` seconds towards executing `actions`.
    fn perform(&mut self, contestant: ContestantId, actions: &[ConcreteAction], delta: f32);
}

/// Moves each involved limb towards its strike location at a fixed speed and
/// returns uninvolved limbs to the rest stance.
///
/// The body's transform never changes; footwork only moves the feet.
#[derive(Clone, Debug)]
pub struct KinematicPoseEngine {
    speed: f32,
    poses: BTreeMap<ContestantId, BodyPose>,
}

impl KinematicPoseEngine {
    /// Metres per second a limb travels.
    pub const DEFAULT_SPEED: f32 = 3.0;

    pub fn new() -> Self {
        Self::with_speed(Self::DEFAULT_SPEED)
    }

    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            poses: BTreeMap::new(),
        }
    }

    fn target_of(actions: &[ConcreteAction], part: BodyPart) -> Option<Vec3> {
        actions.iter().find_map(|action| action.strike_location(part))
    }
}

impl Default for KinematicPoseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseEngine for KinematicPoseEngine {
    fn place(&mut self, contestant: ContestantId, transform: Affine3A) {
        self.poses.insert(contestant, BodyPose::standing(transform));
    }

    fn body_pose(&self, contestant: ContestantId) -> Option<BodyPose> {
        self.poses.get(&contestant).copied()
    }

    fn perform(&mut self, contestant: ContestantId, actions: &[ConcreteAction], delta: f32) {
        let Some(pose) = self.poses.get_mut(&contestant) else {
            tracing::warn!("Pose engine has no body for contestant {}", contestant);
            return;
        };
        let rest = BodyLocations::STANDING.map(|p| pose.to_world(p));
        let max_step = self.speed * delta;

        for part in BodyPart::LIMBS {
            let target = Self::target_of(actions, part).unwrap_or_else(|| rest.part(part));
            let current = pose.locations.part(part);
            let offset = target - current;
            let next = if offset.length() <= max_step {
                target
            } else {
                current + offset.normalize() * max_step
            };
            pose.locations.set_part(part, next);
        }

        tracing::trace!(
            "Contestant {} limbs advanced towards {} action(s)",
            contestant,
            actions.len()
        );
    }
}
