//! Per-body-part physical state used to size the impact of a landed strike.

use glam::Vec3;

use crate::body::BodyPart;

/// A force applied to a body part by one executing action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedForce {
    /// Serial of the action that applied the force.
    pub action: u64,
    /// Force vector in newtons.
    pub vector: Vec3,
    /// How long the force acts, in seconds.
    pub duration: f32,
}

/// Acceleration and resulting velocity of a part under one force, starting at rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub acceleration: Vec3,
    pub velocity: Vec3,
}

impl AppliedForce {
    pub fn kinematics(&self, mass: f32) -> Kinematics {
        let acceleration = if mass > 0.0 {
            self.vector / mass
        } else {
            Vec3::ZERO
        };
        Kinematics {
            acceleration,
            velocity: acceleration * self.duration,
        }
    }
}

/// Mass and applied forces of a single body part.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhysicsAttr {
    pub mass: f32,
    pub forces: Vec<AppliedForce>,
}

impl PhysicsAttr {
    pub fn new(mass: f32) -> Self {
        Self {
            mass,
            forces: Vec::new(),
        }
    }

    /// The force applied by `action`, if any.
    pub fn force_from(&self, action: u64) -> Option<&AppliedForce> {
        self.forces.iter().find(|force| force.action == action)
    }

    /// Momentum magnitude contributed by `action` (mass × speed).
    pub fn momentum_from(&self, action: u64) -> f32 {
        self.force_from(action)
            .map(|force| self.mass * force.kinematics(self.mass).velocity.length())
            .unwrap_or(0.0)
    }
}

/// Physical state of all six body parts, indexed by [`BodyPart::index`].
#[derive(Clone, Debug, PartialEq)]
pub struct BodyState {
    parts: [PhysicsAttr; 6],
}

impl BodyState {
    pub const DEFAULT_HEAD_MASS: f32 = 10.0;
    pub const DEFAULT_TORSO_MASS: f32 = 40.0;
    pub const DEFAULT_HAND_MASS: f32 = 4.0;
    pub const DEFAULT_FOOT_MASS: f32 = 20.0;

    pub fn new(masses: [f32; 6]) -> Self {
        Self {
            parts: masses.map(PhysicsAttr::new),
        }
    }

    pub fn part(&self, part: BodyPart) -> &PhysicsAttr {
        &self.parts[part.index()]
    }

    pub fn part_mut(&mut self, part: BodyPart) -> &mut PhysicsAttr {
        &mut self.parts[part.index()]
    }

    /// Sum of all part masses.
    pub fn total_mass(&self) -> f32 {
        self.parts.iter().map(|attr| attr.mass).sum()
    }

    pub fn apply_force(&mut self, part: BodyPart, force: AppliedForce) {
        self.part_mut(part).forces.push(force);
    }

    pub fn clear_forces(&mut self) {
        for attr in &mut self.parts {
            attr.forces.clear();
        }
    }
}

impl Default for BodyState {
    fn default() -> Self {
        // Same order as BodyPart: hands, feet, head, torso.
        Self::new([
            Self::DEFAULT_HAND_MASS,
            Self::DEFAULT_HAND_MASS,
            Self::DEFAULT_FOOT_MASS,
            Self::DEFAULT_FOOT_MASS,
            Self::DEFAULT_HEAD_MASS,
            Self::DEFAULT_TORSO_MASS,
        ])
    }
}
