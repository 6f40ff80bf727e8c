//! Bounding volumes and pairwise intersection tests used to confirm strikes.
//!
//! The tests are deliberately coarse:
//!
//! - Sphere vs sphere intersects when the centers are within the *larger*
//!   radius (not the sum of radii).
//! - Box vs box projects the second box onto the first box's axes only; it is
//!   not a full separating-axis test.
//! - Box vs sphere compares against `radius + max(half_extents)`, which
//!   over-approximates contact.

use glam::{Mat3, Vec3};

/// Anything that can be tested for intersection against a [`BoundingVolume`].
pub trait Collision {
    fn collides_with(&self, other: &BoundingVolume) -> bool;
}

/// Sphere given by center and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Oriented box given by center, Euler angles (radians, about x, y, z) and half-extents.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub center: Vec3,
    pub rotation: Vec3,
    pub half_extents: Vec3,
}

impl BoundingBox {
    pub const fn new(center: Vec3, rotation: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            rotation,
            half_extents,
        }
    }

    /// Axis-aligned box.
    pub const fn aligned(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center, Vec3::ZERO, half_extents)
    }

    /// Rotation matrix Rz · Ry · Rx.
    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_rotation_z(self.rotation.z)
            * Mat3::from_rotation_y(self.rotation.y)
            * Mat3::from_rotation_x(self.rotation.x)
    }
}

/// Closed set of supported shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundingVolume {
    Sphere(BoundingSphere),
    Box(BoundingBox),
}

impl BoundingVolume {
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.center,
            Self::Box(bbox) => bbox.center,
        }
    }
}

impl From<BoundingSphere> for BoundingVolume {
    fn from(sphere: BoundingSphere) -> Self {
        Self::Sphere(sphere)
    }
}

impl From<BoundingBox> for BoundingVolume {
    fn from(bbox: BoundingBox) -> Self {
        Self::Box(bbox)
    }
}

impl Collision for BoundingSphere {
    fn collides_with(&self, other: &BoundingVolume) -> bool {
        match other {
            BoundingVolume::Sphere(sphere) => sphere_sphere(self, sphere),
            BoundingVolume::Box(bbox) => box_sphere(bbox, self),
        }
    }
}

impl Collision for BoundingBox {
    fn collides_with(&self, other: &BoundingVolume) -> bool {
        match other {
            BoundingVolume::Sphere(sphere) => box_sphere(self, sphere),
            BoundingVolume::Box(bbox) => box_box(self, bbox),
        }
    }
}

impl Collision for BoundingVolume {
    fn collides_with(&self, other: &BoundingVolume) -> bool {
        match self {
            Self::Sphere(sphere) => sphere.collides_with(other),
            Self::Box(bbox) => bbox.collides_with(other),
        }
    }
}

fn sphere_sphere(a: &BoundingSphere, b: &BoundingSphere) -> bool {
    let max_radius = a.radius.max(b.radius);
    a.center.distance(b.center) <= max_radius
}

fn box_box(a: &BoundingBox, b: &BoundingBox) -> bool {
    let to_a_local = a.rotation_matrix().transpose();

    // B relative to A, in A's frame. Rotated half-extents may flip sign.
    let b_center = to_a_local * (b.center - a.center);
    let b_half = (to_a_local * b.half_extents).abs();

    let a_min = -a.half_extents;
    let a_max = a.half_extents;
    let b_min = b_center - b_half;
    let b_max = b_center + b_half;

    (0..3).all(|axis| a_max[axis] >= b_min[axis] && a_min[axis] <= b_max[axis])
}

fn box_sphere(bbox: &BoundingBox, sphere: &BoundingSphere) -> bool {
    let rotation = bbox.rotation_matrix();
    let local = rotation.inverse() * (sphere.center - bbox.center);
    let closest_local = local.clamp(-bbox.half_extents, bbox.half_extents);
    let closest_world = rotation * closest_local + bbox.center;

    let distance = sphere.center.distance(closest_world);
    distance <= sphere.radius + bbox.half_extents.max_element()
}
