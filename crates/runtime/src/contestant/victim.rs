//! Victim selection policies.

use arena_core::ContestantId;

use crate::environment::Snapshot;

/// Chooses which opponent a contestant targets from a snapshot.
pub trait VictimPolicy: Send + Sync {
    /// Returns a human-readable name for this policy (used in logging).
    fn name(&self) -> &'static str;

    /// Picks a victim for `me`, or `None` if the snapshot holds no opponent.
    fn select(&self, me: ContestantId, snapshot: &Snapshot) -> Option<ContestantId>;
}

/// Targets the first contestant in the snapshot that is not `me`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstOpponent;

impl VictimPolicy for FirstOpponent {
    fn name(&self) -> &'static str {
        "first_opponent"
    }

    fn select(&self, me: ContestantId, snapshot: &Snapshot) -> Option<ContestantId> {
        snapshot.keys().copied().find(|&id| id != me)
    }
}

/// Targets the opponent whose head is closest to `me`'s head.
///
/// Falls back to [`FirstOpponent`] when `me` is missing from the snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestOpponent;

impl VictimPolicy for NearestOpponent {
    fn name(&self) -> &'static str {
        "nearest_opponent"
    }

    fn select(&self, me: ContestantId, snapshot: &Snapshot) -> Option<ContestantId> {
        let Some(own) = snapshot.get(&me) else {
            return FirstOpponent.select(me, snapshot);
        };
        let head = own.pose.locations.head;
        snapshot
            .values()
            .filter(|packet| packet.contestant != me)
            .min_by(|a, b| {
                let da = head.distance(a.pose.most_exposed_vulnerability());
                let db = head.distance(b.pose.most_exposed_vulnerability());
                da.total_cmp(&db)
            })
            .map(|packet| packet.contestant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvInfoPacket;
    use arena_core::{Affine3A, BodyPose, Vec3};

    fn snapshot(positions: &[(u32, f32)]) -> Snapshot {
        positions
            .iter()
            .map(|&(id, y)| {
                let id = ContestantId(id);
                let pose = BodyPose::standing(Affine3A::from_translation(Vec3::new(0.0, y, 0.0)));
                (id, EnvInfoPacket::new(id, pose))
            })
            .collect()
    }

    #[test]
    fn first_opponent_skips_self() {
        let snap = snapshot(&[(0, 0.0), (1, 5.0), (2, 1.0)]);
        assert_eq!(FirstOpponent.select(ContestantId(0), &snap), Some(ContestantId(1)));
        assert_eq!(FirstOpponent.select(ContestantId(1), &snap), Some(ContestantId(0)));
    }

    #[test]
    fn no_opponent_means_no_victim() {
        assert_eq!(FirstOpponent.select(ContestantId(0), &Snapshot::new()), None);
        let alone = snapshot(&[(0, 0.0)]);
        assert_eq!(FirstOpponent.select(ContestantId(0), &alone), None);
        assert_eq!(NearestOpponent.select(ContestantId(0), &alone), None);
    }

    #[test]
    fn nearest_opponent_measures_head_distance() {
        let snap = snapshot(&[(0, 0.0), (1, 5.0), (2, 1.0)]);
        assert_eq!(NearestOpponent.select(ContestantId(0), &snap), Some(ContestantId(2)));
    }
}
