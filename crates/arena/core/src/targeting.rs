//! Strike point computation.
//!
//! Turns a template's body targets into world-space points on a victim and
//! clamps each one to the reach of the attacking limb.

use glam::Vec3;

use crate::action::{Action, StrikeLocations};
use crate::body::{BodyPart, BodyPose, Location};
use crate::reach::{Reach, ReachError};

/// Lateral distance from a foot to the point just outside it, in the foot
/// owner's local frame.
pub const FOOT_OUTSIDE_OFFSET: f32 = 0.3;

/// Distance behind a foot, in the foot owner's local frame.
pub const FOOT_BACK_OFFSET: f32 = 0.3;

/// World-space point on `victim` that `location` refers to.
///
/// Outside/back foot locations are offset from the victim's facing foot
/// (the attacker's left faces the victim's right) in the victim's frame.
pub fn resolve_location(location: Location, victim: &BodyPose) -> Vec3 {
    let body = &victim.locations;
    let offset_from = |foot: Vec3, offset: Vec3| victim.to_world(victim.to_local(foot) + offset);
    match location {
        Location::Chin
        | Location::Forehead
        | Location::CheekL
        | Location::CheekR
        | Location::Nose => body.head,
        Location::RibsLHigh
        | Location::RibsLLow
        | Location::RibsRHigh
        | Location::RibsRLow
        | Location::SolarPlexus => body.torso,
        Location::FootL => body.foot_l,
        Location::FootR => body.foot_r,
        Location::FootLOutside => offset_from(body.foot_r, Vec3::X * FOOT_OUTSIDE_OFFSET),
        Location::FootROutside => offset_from(body.foot_l, Vec3::NEG_X * FOOT_OUTSIDE_OFFSET),
        Location::FootLBack => offset_from(body.foot_r, Vec3::NEG_Y * FOOT_BACK_OFFSET),
        Location::FootRBack => offset_from(body.foot_l, Vec3::NEG_Y * FOOT_BACK_OFFSET),
    }
}

/// Point at distance `reach` from `anchor` in the direction of `target`.
///
/// When `target` coincides with `anchor` the direction is undefined and
/// `anchor` is returned.
pub fn clamp_to_reach(anchor: Vec3, target: Vec3, reach: f32) -> Vec3 {
    match (target - anchor).try_normalize() {
        Some(direction) => anchor + direction * reach,
        None => anchor,
    }
}

/// One strike point per body target of `action`, in target order.
///
/// # Errors
///
/// Fails if the action moves a part without configured reach (head, torso).
pub fn compute_strike_locations(
    attacker: &BodyPose,
    reach: &Reach,
    action: &(impl Action + ?Sized),
    victim: &BodyPose,
) -> Result<StrikeLocations, ReachError> {
    action
        .target_body_locations()
        .iter()
        .map(|(part, location)| strike_location(attacker, reach, part, location, victim))
        .collect()
}

fn strike_location(
    attacker: &BodyPose,
    reach: &Reach,
    part: BodyPart,
    location: Location,
    victim: &BodyPose,
) -> Result<Vec3, ReachError> {
    let limit = reach.for_part(part)?;
    let anchor = attacker.locations.part(part);
    let target = resolve_location(location, victim);
    Ok(clamp_to_reach(anchor, target, limit))
}

/// Distance from the attacker's head to the victim's most exposed vulnerability.
pub fn distance_to_victim(attacker: &BodyPose, victim: &BodyPose) -> f32 {
    attacker
        .locations
        .head
        .distance(victim.most_exposed_vulnerability())
}
