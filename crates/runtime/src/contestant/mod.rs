//! Contestant decision engine.
//!
//! # Module Structure
//!
//! - `window`: Reaction window buffering and consumption counts
//! - `known`: Known attacks sorted by reach
//! - `victim`: Victim selection policies
//!
//! Every update a contestant appends the newest snapshot to its reaction
//! window, consumes zero or more of the oldest snapshots, and runs action
//! selection against each consumed snapshot. The last non-empty selection
//! replaces the current action list; otherwise the contestant keeps doing
//! what it was doing.

pub mod known;
pub mod victim;
pub mod window;

use std::sync::Arc;

use arena_core::{
    Action, ActionCatalog, ActionTemplate, AppliedForce, BodyPose, BodyState, ConcreteAction,
    ContestantId, compute_strike_locations, distance_to_victim,
};
use rand::Rng;

pub use known::KnownAttacks;
pub use victim::{FirstOpponent, NearestOpponent, VictimPolicy};
pub use window::ReactionWindow;

use crate::config::{ContestantConfig, MatchConfig};
use crate::environment::Snapshot;
use crate::error::{Result, RuntimeError};

/// Share of body mass times weight shifted that adds to a strike's impact.
pub const BODY_WEIGHT_IMPACT_CONTRIBUTION: f32 = 0.1;

/// An action being executed together with the impact it would deliver.
#[derive(Clone, Debug)]
pub struct ExecutingAction {
    pub action: ConcreteAction,
    pub impact: f32,
}

/// What a contestant hands the environment after an update.
#[derive(Clone, Debug)]
pub struct ContestantState {
    pub contestant: ContestantId,
    pub pose: BodyPose,
    pub actions: Vec<ExecutingAction>,
}

/// An autonomous fighter.
pub struct Contestant {
    id: ContestantId,
    config: ContestantConfig,
    body: BodyState,
    pose: BodyPose,
    window: ReactionWindow,
    current_actions: Vec<ConcreteAction>,
    known_attacks: KnownAttacks,
    victim_policy: Box<dyn VictimPolicy>,
    time_step: f32,
    next_serial: u64,
}

impl Contestant {
    /// Builds a contestant, resolving its known attacks against `catalog`.
    ///
    /// # Errors
    ///
    /// Fails if a known attack is not in the catalog, references a limb with
    /// no reach, or if the contestant knows no attacks at all.
    pub fn new(id: ContestantId, config: ContestantConfig, catalog: &ActionCatalog) -> Result<Self> {
        let known_attacks = KnownAttacks::from_specs(&config.known_attacks, catalog, &config.reach)?;
        if known_attacks.is_empty() {
            return Err(RuntimeError::NoKnownAttacks { name: config.name });
        }
        Ok(Self {
            id,
            window: ReactionWindow::new(config.reaction_time),
            config,
            body: BodyState::default(),
            pose: BodyPose::default(),
            current_actions: Vec::new(),
            known_attacks,
            victim_policy: Box::new(FirstOpponent),
            time_step: MatchConfig::DEFAULT_DELTA,
            next_serial: 0,
        })
    }

    #[must_use]
    pub fn with_victim_policy(mut self, policy: impl VictimPolicy + 'static) -> Self {
        self.victim_policy = Box::new(policy);
        self
    }

    pub fn set_victim_policy(&mut self, policy: Box<dyn VictimPolicy>) {
        tracing::debug!("{} selects victims by {}", self.name(), policy.name());
        self.victim_policy = policy;
    }

    pub fn id(&self) -> ContestantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &ContestantConfig {
        &self.config
    }

    pub fn body(&self) -> &BodyState {
        &self.body
    }

    pub fn pose(&self) -> &BodyPose {
        &self.pose
    }

    /// Replaces the pose, usually with the pose engine's latest.
    pub fn set_pose(&mut self, pose: BodyPose) {
        self.pose = pose;
    }

    /// Seconds each applied strike force acts for.
    pub fn set_time_step(&mut self, time_step: f32) {
        self.time_step = time_step;
    }

    pub fn reaction_window(&self) -> &ReactionWindow {
        &self.window
    }

    pub fn current_actions(&self) -> &[ConcreteAction] {
        &self.current_actions
    }

    pub fn known_attacks(&self) -> &KnownAttacks {
        &self.known_attacks
    }

    /// Learns `template` with `max_reach`, keeping known attacks sorted.
    ///
    /// Fails if `max_reach` is NaN, infinite or negative.
    pub fn learn_attack(&mut self, template: Arc<ActionTemplate>, max_reach: f32) -> Result<()> {
        tracing::debug!(
            "{} learned '{}' (reach {:.2})",
            self.name(),
            template.name(),
            max_reach
        );
        self.known_attacks.insert(template, max_reach)
    }

    /// Reacts to `snapshot` and returns the resulting state.
    pub fn update<R: Rng + ?Sized>(&mut self, snapshot: &Snapshot, rng: &mut R) -> Result<ContestantState> {
        self.window.push(snapshot.clone());

        let jitter = rng.random_range(0..=ReactionWindow::MAX_JITTER);
        let to_consume = self.window.reactions_to_consume(jitter);
        tracing::trace!(
            "{}: {} stored snapshot(s), consuming {}",
            self.name(),
            self.window.len(),
            to_consume
        );

        let mut chosen = Vec::new();
        for _ in 0..to_consume {
            let Some(state) = self.window.pop_oldest() else {
                break;
            };
            let actions = match self.choose_actions(&state, rng) {
                Err(err) if err.severity().is_recoverable() => {
                    tracing::warn!("{}: skipping snapshot: {}", self.name(), err);
                    continue;
                }
                result => result?,
            };
            if !actions.is_empty() {
                chosen = actions;
            }
        }

        let discarded = self.window.discard_overflow();
        if discarded > 0 {
            tracing::trace!("{}: discarded {} stale snapshot(s)", self.name(), discarded);
        }

        if !chosen.is_empty() {
            tracing::debug!(
                "{} commits to [{}]",
                self.name(),
                chosen.iter().map(|a| a.name()).collect::<Vec<_>>().join(", ")
            );
            self.commit(chosen);
        }

        Ok(self.state())
    }

    /// Picks an attack that reaches the selected victim in `snapshot`.
    ///
    /// Returns no actions when there is no opponent or the opponent is out of
    /// reach of every known attack.
    pub fn choose_actions<R: Rng + ?Sized>(
        &mut self,
        snapshot: &Snapshot,
        rng: &mut R,
    ) -> Result<Vec<ConcreteAction>> {
        let Some(victim) = self.victim_policy.select(self.id, snapshot) else {
            tracing::debug!("{}: no victim found", self.name());
            return Ok(Vec::new());
        };
        let victim_pose = snapshot
            .get(&victim)
            .map(|packet| packet.pose)
            .ok_or(RuntimeError::VictimNotInSnapshot(victim))?;

        let longest = self
            .known_attacks
            .longest()
            .ok_or_else(|| RuntimeError::NoKnownAttacks {
                name: self.config.name.clone(),
            })?;
        let distance = distance_to_victim(&self.pose, &victim_pose);
        if distance > longest {
            tracing::debug!(
                "{}: victim {} out of reach ({:.2} > {:.2})",
                self.name(),
                victim,
                distance,
                longest
            );
            return Ok(Vec::new());
        }

        let candidates: Vec<_> = self
            .known_attacks
            .reaching(distance)
            .map(|(template, _)| Arc::clone(template))
            .collect();
        if candidates.is_empty() {
            tracing::debug!("{}: no attack covers {:.2}", self.name(), distance);
            return Ok(Vec::new());
        }
        let template = Arc::clone(&candidates[rng.random_range(0..candidates.len())]);
        tracing::debug!(
            "{}: picked '{}' from {} candidate(s) at distance {:.2}",
            self.name(),
            template.name(),
            candidates.len(),
            distance
        );

        self.concretize(&template, victim, &victim_pose, distance)
    }

    /// Binds an explicitly chosen `template` to a victim, skipping reach checks.
    ///
    /// Uses `victim` when given, otherwise the victim policy's choice.
    pub fn choose_actions_with(
        &mut self,
        template: &Arc<ActionTemplate>,
        snapshot: &Snapshot,
        victim: Option<ContestantId>,
    ) -> Result<Vec<ConcreteAction>> {
        let Some(victim) = victim.or_else(|| self.victim_policy.select(self.id, snapshot)) else {
            tracing::debug!("{}: no victim found", self.name());
            return Ok(Vec::new());
        };
        let victim_pose = snapshot
            .get(&victim)
            .map(|packet| packet.pose)
            .ok_or(RuntimeError::VictimNotInSnapshot(victim))?;
        let distance = distance_to_victim(&self.pose, &victim_pose);
        self.concretize(template, victim, &victim_pose, distance)
    }

    /// Impact `action` delivers given the forces currently applied.
    pub fn action_impact(&self, action: &ConcreteAction) -> f32 {
        let momentum: f32 = action
            .target_body_locations()
            .parts()
            .map(|part| self.body.part(part).momentum_from(action.serial()))
            .sum();
        momentum
            + action.weight_shift() * self.body.total_mass() * BODY_WEIGHT_IMPACT_CONTRIBUTION
    }

    /// One concrete action per combo member, or one for a plain template.
    fn concretize(
        &mut self,
        template: &Arc<ActionTemplate>,
        victim: ContestantId,
        victim_pose: &BodyPose,
        max_range: f32,
    ) -> Result<Vec<ConcreteAction>> {
        let members = match template.as_combo() {
            Some(combo) => combo.members().to_vec(),
            None => vec![Arc::clone(template)],
        };

        let mut actions = Vec::with_capacity(members.len());
        for member in members {
            let strikes =
                compute_strike_locations(&self.pose, &self.config.reach, member.as_ref(), victim_pose)?;
            let serial = self.next_serial;
            self.next_serial += 1;
            actions.push(
                ConcreteAction::new(member, strikes, max_range)?
                    .with_victim(victim)
                    .with_serial(serial),
            );
        }
        Ok(actions)
    }

    /// Replaces the current actions and re-applies strike forces.
    fn commit(&mut self, actions: Vec<ConcreteAction>) {
        self.body.clear_forces();
        for action in &actions {
            for (part, strike) in action
                .target_body_locations()
                .parts()
                .zip(action.strike_locations().iter())
            {
                let direction = (*strike - self.pose.locations.part(part)).normalize_or_zero();
                self.body.apply_force(
                    part,
                    AppliedForce {
                        action: action.serial(),
                        vector: direction * self.config.strike_force,
                        duration: self.time_step,
                    },
                );
            }
        }
        self.current_actions = actions;
    }

    fn state(&self) -> ContestantState {
        ContestantState {
            contestant: self.id,
            pose: self.pose,
            actions: self
                .current_actions
                .iter()
                .map(|action| ExecutingAction {
                    action: action.clone(),
                    impact: self.action_impact(action),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::EnvInfoPacket;
    use arena_core::{
        ActionSpec, Affine3A, BodyPart, Location, Quat, Range, Reach, Tag, Vec3, WeightDistribution,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::f32::consts::PI;

    const ME: ContestantId = ContestantId(0);
    const THEM: ContestantId = ContestantId(1);

    fn catalog() -> ActionCatalog {
        let mut catalog = ActionCatalog::new();
        catalog
            .insert(
                "JAB_HEAD",
                ActionTemplate::Attack(
                    ActionSpec::new("jab head", Range::Punch)
                        .with_target(BodyPart::HandL, Location::Chin)
                        .with_tags([Tag::Quick, Tag::Light]),
                ),
            )
            .unwrap();
        catalog
            .insert(
                "STEP",
                ActionTemplate::Movement(
                    ActionSpec::new("step", Range::Kick)
                        .with_target(BodyPart::FootL, Location::FootLOutside)
                        .with_weights(
                            WeightDistribution(50.0, 50.0),
                            WeightDistribution(60.0, 40.0),
                            0.5,
                        ),
                ),
            )
            .unwrap();
        catalog
            .register_combo("STEP_JAB_HEAD", "step jab head", &["STEP", "JAB_HEAD"], None)
            .unwrap();
        catalog
    }

    fn snapshot_at(separation: f32) -> Snapshot {
        let me = BodyPose::standing(Affine3A::IDENTITY);
        let them = BodyPose::standing(Affine3A::from_rotation_translation(
            Quat::from_rotation_z(PI),
            Vec3::new(0.0, separation, 0.0),
        ));
        [
            (ME, EnvInfoPacket::new(ME, me)),
            (THEM, EnvInfoPacket::new(THEM, them)),
        ]
        .into_iter()
        .collect()
    }

    fn contestant(config: ContestantConfig) -> Contestant {
        let mut contestant = Contestant::new(ME, config, &catalog()).unwrap();
        contestant.set_pose(BodyPose::standing(Affine3A::IDENTITY));
        contestant
    }

    #[test]
    fn known_attacks_sorted_by_scaled_reach() {
        let contestant = contestant(ContestantConfig::new("Jack"));
        let known: Vec<_> = contestant
            .known_attacks()
            .iter()
            .map(|(t, r)| (t.name().to_owned(), *r))
            .collect();
        assert_eq!(
            known,
            vec![
                ("jab head".to_owned(), 0.7),
                ("step jab head".to_owned(), 0.7 * 1.5)
            ]
        );
    }

    #[test]
    fn empty_known_attacks_is_fatal() {
        let config = ContestantConfig::new("Nobody").with_known_attacks(Vec::new());
        let err = Contestant::new(ME, config, &catalog()).err().unwrap();
        assert!(matches!(err, RuntimeError::NoKnownAttacks { .. }));
        assert!(err.severity().is_fatal());
    }

    #[test]
    fn out_of_reach_victim_yields_nothing() {
        let mut jack = contestant(ContestantConfig::new("Jack"));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let actions = jack.choose_actions(&snapshot_at(3.0), &mut rng).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn lone_contestant_has_no_victim() {
        let mut jack = contestant(ContestantConfig::new("Jack"));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut alone = snapshot_at(1.0);
        alone.remove(&THEM);
        assert!(jack.choose_actions(&alone, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn selected_attack_reaches_the_victim() {
        let mut jack = contestant(ContestantConfig::new("Jack"));
        let snapshot = snapshot_at(0.9);
        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let actions = jack.choose_actions(&snapshot, &mut rng).unwrap();
            // Only the combo reaches 0.9.
            let names: Vec<_> = actions.iter().map(|a| a.name()).collect();
            assert_eq!(names, vec!["step", "jab head"]);
            for action in &actions {
                assert!((action.max_range() - 0.9).abs() < 1e-5);
                assert_eq!(action.victim(), Some(THEM));
            }
        }
    }

    #[test]
    fn combo_members_get_distinct_serials() {
        let mut jack = contestant(ContestantConfig::new("Jack"));
        let combo = Arc::clone(catalog().get("STEP_JAB_HEAD").unwrap());
        let actions = jack
            .choose_actions_with(&combo, &snapshot_at(5.0), None)
            .unwrap();
        assert_eq!(actions.len(), 2);
        assert_ne!(actions[0].serial(), actions[1].serial());

        let jab = Arc::clone(catalog().get("JAB_HEAD").unwrap());
        let err = jack
            .choose_actions_with(&jab, &snapshot_at(5.0), Some(ContestantId(7)))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::VictimNotInSnapshot(ContestantId(7))));
        assert!(err.severity().is_recoverable());
    }

    /// Always picks a contestant that never shows up.
    struct Absent;

    impl VictimPolicy for Absent {
        fn name(&self) -> &'static str {
            "absent"
        }

        fn select(&self, _me: ContestantId, _snapshot: &Snapshot) -> Option<ContestantId> {
            Some(ContestantId(7))
        }
    }

    #[test]
    fn missing_victim_skips_the_snapshot() {
        let mut jack = contestant(ContestantConfig::new("Jack").with_reaction_time(1))
            .with_victim_policy(Absent);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let snapshot = snapshot_at(0.5);

        let err = jack.choose_actions(&snapshot, &mut rng).unwrap_err();
        assert!(err.severity().is_recoverable());
        for _ in 0..5 {
            let state = jack.update(&snapshot, &mut rng).unwrap();
            assert!(state.actions.is_empty());
        }
    }

    #[test]
    fn nearest_policy_picks_the_closer_opponent() {
        let mut jack = contestant(ContestantConfig::new("Jack")).with_victim_policy(NearestOpponent);
        let mut snapshot = snapshot_at(3.0);
        let close = ContestantId(2);
        let pose = BodyPose::standing(Affine3A::from_rotation_translation(
            Quat::from_rotation_z(PI),
            Vec3::new(0.0, 0.5, 0.0),
        ));
        snapshot.insert(close, EnvInfoPacket::new(close, pose));

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let actions = jack.choose_actions(&snapshot, &mut rng).unwrap();
        assert!(!actions.is_empty());
        assert!(actions.iter().all(|action| action.victim() == Some(close)));
    }

    #[test]
    fn nothing_happens_before_min_reaction_time() {
        let mut jack = contestant(ContestantConfig::new("Jack").with_reaction_time(10));
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let snapshot = snapshot_at(0.5);
        for _ in 0..4 {
            let state = jack.update(&snapshot, &mut rng).unwrap();
            assert!(state.actions.is_empty());
        }
        assert_eq!(jack.reaction_window().len(), 4);
    }

    #[test]
    fn window_never_exceeds_reaction_time() {
        let mut jack = contestant(ContestantConfig::new("Jack").with_reaction_time(4));
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        // Empty snapshots never produce actions, so nothing stops the window growing.
        for _ in 0..50 {
            jack.update(&Snapshot::new(), &mut rng).unwrap();
            assert!(jack.reaction_window().len() <= 4);
        }
    }

    #[test]
    fn committed_actions_carry_impact() {
        let config = ContestantConfig::new("Jack")
            .with_reaction_time(2)
            .with_reach(Reach::default());
        let mut jack = contestant(config);
        jack.set_time_step(0.2);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let snapshot = snapshot_at(0.5);

        let mut state = jack.update(&snapshot, &mut rng).unwrap();
        for _ in 0..20 {
            if !state.actions.is_empty() {
                break;
            }
            state = jack.update(&snapshot, &mut rng).unwrap();
        }

        assert!(!state.actions.is_empty());
        for executing in &state.actions {
            let expected = match executing.action.name() {
                // 100 N on a 4 kg hand for 0.2 s: v = 5, p = 20.
                "jab head" => 20.0,
                // 100 N on a 20 kg foot: p = 20, plus 20 weight moved * 98 kg * 0.1.
                "step" => 20.0 + 196.0,
                other => panic!("unexpected action {other}"),
            };
            assert!((executing.impact - expected).abs() < 1e-2);
        }
    }

    #[test]
    fn strike_force_scales_limb_momentum() {
        let config = ContestantConfig::new("Jack")
            .with_reaction_time(2)
            .with_strike_force(200.0);
        let mut jack = contestant(config);
        jack.set_time_step(0.2);
        let combo = Arc::clone(catalog().get("STEP_JAB_HEAD").unwrap());
        let actions = jack
            .choose_actions_with(&combo, &snapshot_at(0.5), None)
            .unwrap();
        jack.commit(actions);

        let impacts: Vec<_> = jack
            .current_actions()
            .iter()
            .map(|action| jack.action_impact(action))
            .collect();
        // Twice the force for the same 0.2 s doubles the momentum part only.
        assert!((impacts[0] - (40.0 + 196.0)).abs() < 1e-2);
        assert!((impacts[1] - 40.0).abs() < 1e-2);
    }
}
