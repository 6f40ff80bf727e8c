//! Body vocabulary shared by every layer: parts, strike locations, reach
//! classes, and the eight named points that make up a contestant's pose.

use glam::{Affine3A, Vec3};

use crate::transform::{global_to_local, local_to_global};

/// A contestant's movable part.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum BodyPart {
    HandL,
    HandR,
    FootL,
    FootR,
    Head,
    Torso,
}

impl BodyPart {
    /// Limbs carry a configured reach; head and torso do not.
    pub const LIMBS: [BodyPart; 4] = [
        BodyPart::HandL,
        BodyPart::HandR,
        BodyPart::FootL,
        BodyPart::FootR,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Every point an action can aim a body part at.
///
/// Head and torso vulnerabilities are points an opponent may expose; the
/// outside/back foot locations only exist as movement targets.
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
pub enum Location {
    // Head
    Chin,
    Forehead,
    CheekL,
    CheekR,
    Nose,

    // Torso
    RibsLHigh,
    RibsLLow,
    RibsRHigh,
    RibsRLow,
    SolarPlexus,

    // Limbs
    FootL,
    FootR,

    // Movement targets
    FootLOutside,
    FootROutside,
    FootLBack,
    FootRBack,
}

impl Location {
    pub const fn is_head_vulnerability(self) -> bool {
        matches!(
            self,
            Location::Chin
                | Location::Forehead
                | Location::CheekL
                | Location::CheekR
                | Location::Nose
        )
    }

    pub const fn is_torso_vulnerability(self) -> bool {
        matches!(
            self,
            Location::RibsLHigh
                | Location::RibsLLow
                | Location::RibsRHigh
                | Location::RibsRLow
                | Location::SolarPlexus
        )
    }

    /// True for locations that can be exposed on a body (a strikeable target).
    pub const fn is_vulnerability(self) -> bool {
        self.is_head_vulnerability()
            || self.is_torso_vulnerability()
            || matches!(self, Location::FootL | Location::FootR)
    }

    /// The victim body part a strike at this location lands on.
    pub const fn struck_part(self) -> BodyPart {
        match self {
            Location::Chin
            | Location::Forehead
            | Location::CheekL
            | Location::CheekR
            | Location::Nose => BodyPart::Head,
            Location::RibsLHigh
            | Location::RibsLLow
            | Location::RibsRHigh
            | Location::RibsRLow
            | Location::SolarPlexus => BodyPart::Torso,
            Location::FootL | Location::FootROutside | Location::FootRBack => BodyPart::FootL,
            Location::FootR | Location::FootLOutside | Location::FootLBack => BodyPart::FootR,
        }
    }
}

/// Reach class of an action, ordered from shortest to longest.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Range {
    #[default]
    Null,
    Punch,
    Kick,
    PushKick,
    OutOfRange,
}

/// The eight tracked points of a contestant's body, in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyLocations {
    pub head: Vec3,
    pub torso: Vec3,
    pub hand_l: Vec3,
    pub hand_r: Vec3,
    pub foot_l: Vec3,
    pub foot_r: Vec3,
    pub shoulder_l: Vec3,
    pub shoulder_r: Vec3,
}

impl BodyLocations {
    /// Number of tracked points a pose provider must report.
    pub const POINT_COUNT: usize = 8;

    /// Rest stance in the contestant's local frame: x is lateral (left is
    /// negative), y is forward, z is up.
    pub const STANDING: Self = Self {
        head: Vec3::new(0.0, 0.0, 1.7),
        torso: Vec3::new(0.0, 0.0, 1.3),
        hand_l: Vec3::new(-0.2, 0.25, 1.45),
        hand_r: Vec3::new(0.2, 0.25, 1.45),
        foot_l: Vec3::new(-0.15, 0.0, 0.0),
        foot_r: Vec3::new(0.15, 0.0, 0.0),
        shoulder_l: Vec3::new(-0.2, 0.0, 1.5),
        shoulder_r: Vec3::new(0.2, 0.0, 1.5),
    };

    /// Builds locations from points ordered head, torso, hand_l, hand_r,
    /// foot_l, foot_r, shoulder_l, shoulder_r.
    pub const fn from_points(points: [Vec3; Self::POINT_COUNT]) -> Self {
        let [head, torso, hand_l, hand_r, foot_l, foot_r, shoulder_l, shoulder_r] = points;
        Self {
            head,
            torso,
            hand_l,
            hand_r,
            foot_l,
            foot_r,
            shoulder_l,
            shoulder_r,
        }
    }

    pub const fn to_points(&self) -> [Vec3; Self::POINT_COUNT] {
        [
            self.head,
            self.torso,
            self.hand_l,
            self.hand_r,
            self.foot_l,
            self.foot_r,
            self.shoulder_l,
            self.shoulder_r,
        ]
    }

    /// Current location of a body part.
    pub const fn part(&self, part: BodyPart) -> Vec3 {
        match part {
            BodyPart::HandL => self.hand_l,
            BodyPart::HandR => self.hand_r,
            BodyPart::FootL => self.foot_l,
            BodyPart::FootR => self.foot_r,
            BodyPart::Head => self.head,
            BodyPart::Torso => self.torso,
        }
    }

    pub fn set_part(&mut self, part: BodyPart, point: Vec3) {
        match part {
            BodyPart::HandL => self.hand_l = point,
            BodyPart::HandR => self.hand_r = point,
            BodyPart::FootL => self.foot_l = point,
            BodyPart::FootR => self.foot_r = point,
            BodyPart::Head => self.head = point,
            BodyPart::Torso => self.torso = point,
        }
    }

    /// Applies `f` to every point.
    pub fn map(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        Self::from_points(self.to_points().map(f))
    }
}

/// A contestant's body points together with its world transform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyPose {
    pub locations: BodyLocations,
    pub transform: Affine3A,
}

impl BodyPose {
    pub const fn new(locations: BodyLocations, transform: Affine3A) -> Self {
        Self {
            locations,
            transform,
        }
    }

    /// Rest stance placed in the world by `transform`.
    pub fn standing(transform: Affine3A) -> Self {
        let locations = BodyLocations::STANDING.map(|p| local_to_global(p, &transform));
        Self::new(locations, transform)
    }

    /// Origin of the contestant in world space.
    pub fn origin(&self) -> Vec3 {
        self.transform.translation.into()
    }

    /// The point an opponent measures distance to when deciding whether to
    /// attack. Only the head is considered exposed.
    pub const fn most_exposed_vulnerability(&self) -> Vec3 {
        self.locations.head
    }

    pub fn to_local(&self, point: Vec3) -> Vec3 {
        global_to_local(point, &self.transform)
    }

    pub fn to_world(&self, point: Vec3) -> Vec3 {
        local_to_global(point, &self.transform)
    }
}

impl Default for BodyPose {
    fn default() -> Self {
        Self::standing(Affine3A::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_total_order() {
        assert!(Range::Null < Range::Punch);
        assert!(Range::Punch < Range::Kick);
        assert!(Range::Kick < Range::PushKick);
        assert!(Range::PushKick < Range::OutOfRange);
        assert_eq!(Range::Punch.max(Range::Kick), Range::Kick);
    }

    #[test]
    fn names_round_trip_through_strum() {
        assert_eq!(BodyPart::HandL.to_string(), "HAND_L");
        assert_eq!("foot_r".parse::<BodyPart>(), Ok(BodyPart::FootR));
        assert_eq!(Location::SolarPlexus.as_ref(), "SOLAR_PLEXUS");
    }

    #[test]
    fn struck_part_follows_location_family() {
        assert_eq!(Location::Chin.struck_part(), BodyPart::Head);
        assert_eq!(Location::RibsLLow.struck_part(), BodyPart::Torso);
        assert_eq!(Location::FootLOutside.struck_part(), BodyPart::FootR);
        assert_eq!(Location::FootROutside.struck_part(), BodyPart::FootL);
        assert_eq!(Location::FootRBack.struck_part(), BodyPart::FootL);
        assert!(!Location::FootLOutside.is_vulnerability());
    }

    #[test]
    fn standing_pose_follows_transform() {
        let transform = Affine3A::from_translation(Vec3::new(2.0, 0.0, 0.0));
        let pose = BodyPose::standing(transform);
        assert_eq!(pose.locations.head, Vec3::new(2.0, 0.0, 1.7));
        assert_eq!(pose.origin(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(pose.most_exposed_vulnerability(), pose.locations.head);
    }

    #[test]
    fn points_keep_their_order() {
        let points = core::array::from_fn(|i| Vec3::splat(i as f32));
        let locations = BodyLocations::from_points(points);
        assert_eq!(locations.hand_r, Vec3::splat(3.0));
        assert_eq!(locations.to_points(), points);
    }
}
