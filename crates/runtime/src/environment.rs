//! Match orchestrator.
//!
//! The environment collects every contestant's state once per step, forwards
//! chosen actions to the pose engine, resolves strikes into hits, and packages
//! the result as the snapshot contestants see on the next step.
//!
//! Strikes are resolved only after every contestant has moved, against the
//! poses at the end of the step.
//!
//! A strike resolves once its limb has arrived at the strike location: the
//! limb's striking sphere is tested against the victim's target volume for
//! the struck location, and a [`Hit`] is recorded on the victim's packet if
//! they collide. Each (attacker, action serial, part) resolves at most once.

use std::collections::{BTreeMap, HashSet};

use arena_core::{
    Action, BodyPart, BodyPose, BoundingBox, BoundingSphere, BoundingVolume, Collision,
    ContestantId, EulerRot, Location, Quat, Tag, Vec3,
};

use crate::contestant::{ContestantState, ExecutingAction};
use crate::error::{Result, RuntimeError};
use crate::pose::PoseEngine;

/// Immutable record of a landed strike.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    /// Victim body part that was struck.
    pub part: BodyPart,
    pub impact: f32,
    pub attacker: ContestantId,
    /// Path tags of the striking action.
    pub path_tags: Vec<Tag>,
}

/// What the environment knows about one contestant for one step.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvInfoPacket {
    pub contestant: ContestantId,
    /// Pose the contestant published this step.
    pub pose: BodyPose,
    /// Tags of every action the contestant is executing.
    pub action_tags: Vec<Tag>,
    /// Hits the contestant sustained.
    pub hits: Vec<Hit>,
}

impl EnvInfoPacket {
    pub fn new(contestant: ContestantId, pose: BodyPose) -> Self {
        Self {
            contestant,
            pose,
            action_tags: Vec::new(),
            hits: Vec::new(),
        }
    }
}

/// Every contestant's packet for one step, keyed by id.
pub type Snapshot = BTreeMap<ContestantId, EnvInfoPacket>;

/// Decides, once per step, whether the match should end early.
pub trait TerminationCheck: Send {
    fn should_finish(&mut self, snapshot: &Snapshot) -> bool;
}

impl<F> TerminationCheck for F
where
    F: FnMut(&Snapshot) -> bool + Send,
{
    fn should_finish(&mut self, snapshot: &Snapshot) -> bool {
        self(snapshot)
    }
}

/// Collects contestant states and resolves them into snapshots.
pub struct Environment {
    packets: Snapshot,
    pose_engine: Box<dyn PoseEngine + Send>,
    delta: f32,
    resolved: HashSet<(ContestantId, u64, BodyPart)>,
    /// Actions folded in this step, awaiting resolution.
    pending: BTreeMap<ContestantId, Vec<ExecutingAction>>,
    finished: bool,
    termination: Option<Box<dyn TerminationCheck>>,
}

impl Environment {
    /// A limb within this distance of its strike location has arrived.
    pub const ARRIVAL_TOLERANCE: f32 = 0.05;
    /// Radius of the sphere around a striking limb.
    pub const STRIKE_RADIUS: f32 = 0.08;
    /// Radius of the head and foot target spheres.
    pub const TARGET_RADIUS: f32 = 0.12;
    /// Half-extents of the torso target box in the victim's frame.
    pub const TORSO_HALF_EXTENTS: Vec3 = Vec3::new(0.18, 0.12, 0.3);

    pub fn new(pose_engine: Box<dyn PoseEngine + Send>, delta: f32) -> Self {
        Self {
            packets: Snapshot::new(),
            pose_engine,
            delta,
            resolved: HashSet::new(),
            pending: BTreeMap::new(),
            finished: false,
            termination: None,
        }
    }

    /// Installs a hook consulted by [`check_termination`](Self::check_termination).
    pub fn set_termination_check(&mut self, check: Box<dyn TerminationCheck>) {
        self.termination = Some(check);
    }

    /// Folds one contestant's state into the current step.
    ///
    /// Records the packet and moves the contestant through the pose engine.
    /// Strikes are queued, not resolved: call [`resolve_hits`](Self::resolve_hits)
    /// once every contestant has been folded in.
    pub fn update(&mut self, state: &ContestantState) -> Result<()> {
        let id = state.contestant;
        let packet = self
            .packets
            .entry(id)
            .or_insert_with(|| EnvInfoPacket::new(id, state.pose));
        packet.pose = state.pose;
        for executing in &state.actions {
            packet.action_tags.extend_from_slice(executing.action.tags());
        }

        let actions: Vec<_> = state.actions.iter().map(|e| e.action.clone()).collect();
        self.pose_engine.perform(id, &actions, self.delta);

        // Forget resolutions of this contestant's actions that are no longer executing.
        let live: HashSet<u64> = actions.iter().map(|a| a.serial()).collect();
        self.resolved
            .retain(|(owner, serial, _)| *owner != id || live.contains(serial));

        self.pending.insert(id, state.actions.clone());
        Ok(())
    }

    /// Resolves every queued strike against the poses after all moves.
    ///
    /// Attackers are visited in id order, so the hits recorded do not depend
    /// on the order contestants were folded in.
    ///
    /// # Errors
    ///
    /// Fails if an attacker was never placed with the pose engine.
    pub fn resolve_hits(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        for (id, actions) in &pending {
            if actions.is_empty() {
                continue;
            }
            let attacker = self
                .pose_engine
                .body_pose(*id)
                .ok_or(RuntimeError::UnknownContestant(*id))?;
            for executing in actions {
                self.resolve_strikes(*id, &attacker, executing);
            }
        }
        Ok(())
    }

    fn resolve_strikes(&mut self, id: ContestantId, attacker: &BodyPose, executing: &ExecutingAction) {
        let action = &executing.action;
        let Some(victim) = action.victim() else {
            return;
        };
        for ((part, location), strike) in action
            .target_body_locations()
            .iter()
            .zip(action.strike_locations().iter().copied())
        {
            let key = (id, action.serial(), part);
            if self.resolved.contains(&key) {
                continue;
            }
            let limb = attacker.locations.part(part);
            if limb.distance(strike) > Self::ARRIVAL_TOLERANCE {
                continue;
            }
            self.resolved.insert(key);

            let Some(victim_pose) = self.pose_engine.body_pose(victim) else {
                tracing::warn!("Strike by {} aimed at unplaced contestant {}", id, victim);
                continue;
            };
            let striking = BoundingSphere::new(limb, Self::STRIKE_RADIUS);
            if !striking.collides_with(&target_volume(&victim_pose, location)) {
                tracing::debug!(
                    "{} '{}' arrived with {} but missed {}",
                    id,
                    action.name(),
                    part,
                    victim
                );
                continue;
            }

            let hit = Hit {
                part: location.struck_part(),
                impact: executing.impact,
                attacker: id,
                path_tags: action.tags().iter().copied().filter(|t| t.is_path()).collect(),
            };
            tracing::info!(
                "{} landed '{}' on {} ({}, impact {:.1})",
                id,
                action.name(),
                victim,
                hit.part,
                hit.impact
            );
            self.packets
                .entry(victim)
                .or_insert_with(|| EnvInfoPacket::new(victim, victim_pose))
                .hits
                .push(hit);
        }
    }

    /// Packets gathered since the last [`clear`](Self::clear).
    pub fn current_state(&self) -> &Snapshot {
        &self.packets
    }

    pub fn clear(&mut self) {
        self.packets.clear();
    }

    /// Pose of `contestant` according to the pose engine.
    pub fn body_pose(&self, contestant: ContestantId) -> Option<BodyPose> {
        self.pose_engine.body_pose(contestant)
    }

    pub fn simulation_is_over(&self) -> bool {
        self.finished
    }

    /// Ends the match at the end of the current step.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Consults the termination hook, if any, and finishes when it asks to.
    pub fn check_termination(&mut self) -> bool {
        if let Some(check) = self.termination.as_mut() {
            if check.should_finish(&self.packets) {
                tracing::debug!("Termination check requested the match to end");
                self.finished = true;
            }
        }
        self.finished
    }
}

/// Volume a strike at `location` has to reach on `victim`.
fn target_volume(victim: &BodyPose, location: Location) -> BoundingVolume {
    let part = location.struck_part();
    let center = victim.locations.part(part);
    match part {
        BodyPart::Torso => {
            let (z, y, x) = Quat::from_affine3(&victim.transform).to_euler(EulerRot::ZYX);
            BoundingBox::new(center, Vec3::new(x, y, z), Environment::TORSO_HALF_EXTENTS).into()
        }
        _ => BoundingSphere::new(center, Environment::TARGET_RADIUS).into(),
    }
}
