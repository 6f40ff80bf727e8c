//! Deterministic combat model shared by content loaders and the match runtime.
//!
//! `arena-core` defines the body vocabulary, action templates, combo
//! composition, bounding-volume collision, and strike targeting. Everything
//! here is pure: no logging, no randomness, no I/O. The runtime drives
//! contestants through these types and supporting crates depend on the
//! re-exports below.
pub mod action;
pub mod body;
pub mod catalog;
pub mod collision;
pub mod error;
pub mod id;
pub mod physics;
pub mod reach;
pub mod targeting;
pub mod transform;

pub use action::{
    Action, ActionKind, ActionSpec, ActionTemplate, BodyTargets, Combo, ConcreteAction,
    StrikeLocationMismatch, StrikeLocations, Tag, WeightDistribution,
};
pub use body::{BodyLocations, BodyPart, BodyPose, Location, Range};
pub use catalog::{ActionCatalog, CatalogError, ComboError, build_combo};
pub use collision::{BoundingBox, BoundingSphere, BoundingVolume, Collision};
pub use error::{ArenaError, ErrorSeverity};
pub use id::{ContestantId, IdGenerator};
pub use physics::{AppliedForce, BodyState, Kinematics, PhysicsAttr};
pub use reach::{Reach, ReachError, validate_reach};
pub use targeting::{compute_strike_locations, distance_to_victim};
pub use transform::{global_to_local, local_to_global};

pub use glam::{Affine3A, EulerRot, Quat, Vec3};
