//! Lock-step match loop.
//!
//! A [`Match`] owns the contestants, the environment, and the single seeded
//! generator every random draw in the match comes from. Each step hands all
//! contestants the snapshot produced by the previous step, so nobody reacts to
//! another contestant's choice within the same step.

use std::collections::BTreeMap;
use std::f32::consts::PI;

use arena_core::{ActionCatalog, Affine3A, ContestantId, IdGenerator, Quat, Vec3};
use rand_chacha::ChaCha8Rng;

use crate::config::{ContestantConfig, MatchConfig};
use crate::contestant::{Contestant, ContestantState, VictimPolicy};
use crate::environment::{Environment, Snapshot, TerminationCheck};
use crate::error::{Result, RuntimeError};
use crate::pose::{KinematicPoseEngine, PoseEngine};
use crate::seed::rng_from_str;

/// Per-contestant tallies gathered over a match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContestantStats {
    pub name: String,
    pub hits_landed: u32,
    pub hits_taken: u32,
    pub impact_dealt: f32,
}

/// Outcome of [`Match::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct MatchSummary {
    pub steps: usize,
    /// Simulated seconds.
    pub elapsed: f32,
    /// Stats in the order contestants were added.
    pub contestants: Vec<(ContestantId, ContestantStats)>,
    /// Contestant that dealt the most impact; ties go to whoever was added first.
    pub winner: ContestantId,
}

impl MatchSummary {
    pub fn stats(&self, id: ContestantId) -> Option<&ContestantStats> {
        self.contestants
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, stats)| stats)
    }

    pub fn winner_name(&self) -> &str {
        self.stats(self.winner)
            .map(|stats| stats.name.as_str())
            .unwrap_or_default()
    }
}

/// A configured match, ready to step or run to completion.
pub struct Match {
    config: MatchConfig,
    contestants: Vec<Contestant>,
    environment: Environment,
    rng: ChaCha8Rng,
    stats: BTreeMap<ContestantId, ContestantStats>,
    steps: usize,
}

impl Match {
    /// Create a new builder for configuring a match
    pub fn builder() -> MatchBuilder {
        MatchBuilder::new()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn contestants(&self) -> &[Contestant] {
        &self.contestants
    }

    pub fn contestant(&self, id: ContestantId) -> Option<&Contestant> {
        self.contestants.iter().find(|c| c.id() == id)
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_over(&self) -> bool {
        self.environment.simulation_is_over() || self.steps >= self.config.step_count()
    }

    /// Advances the match by one time step.
    ///
    /// Returns `true` once the environment reports the match as over.
    pub fn step(&mut self) -> Result<bool> {
        let snapshot: Snapshot = self.environment.current_state().clone();
        self.environment.clear();

        for contestant in &mut self.contestants {
            let state = contestant.update(&snapshot, &mut self.rng)?;
            self.environment.update(&state)?;
        }
        self.environment.resolve_hits()?;

        for contestant in &mut self.contestants {
            if let Some(pose) = self.environment.body_pose(contestant.id()) {
                contestant.set_pose(pose);
            }
        }

        self.tally_hits();
        self.steps += 1;
        tracing::trace!("Step {} done", self.steps);

        Ok(self.environment.check_termination())
    }

    /// Steps until the time budget runs out or the environment finishes.
    pub fn run(mut self) -> Result<MatchSummary> {
        tracing::info!(
            "Match starting: {} contestants, {} steps of {}s",
            self.contestants.len(),
            self.config.step_count(),
            self.config.delta
        );

        while !self.is_over() {
            if self.step()? {
                tracing::info!("Match finished early after {} steps", self.steps);
                break;
            }
        }

        let summary = self.summary();
        tracing::info!(
            "Match over after {:.1}s, winner {} ({})",
            summary.elapsed,
            summary.winner_name(),
            summary.winner
        );
        Ok(summary)
    }

    /// Summary of the match so far.
    pub fn summary(&self) -> MatchSummary {
        let contestants: Vec<_> = self
            .contestants
            .iter()
            .map(|c| {
                let stats = self.stats.get(&c.id()).cloned().unwrap_or_default();
                (c.id(), stats)
            })
            .collect();

        let mut winner = contestants.first().map(|(id, _)| *id).unwrap_or_default();
        let mut best = f32::NEG_INFINITY;
        for (id, stats) in &contestants {
            if stats.impact_dealt > best {
                best = stats.impact_dealt;
                winner = *id;
            }
        }

        MatchSummary {
            steps: self.steps,
            elapsed: self.steps as f32 * self.config.delta,
            contestants,
            winner,
        }
    }

    fn tally_hits(&mut self) {
        for (victim, packet) in self.environment.current_state() {
            for hit in &packet.hits {
                if let Some(stats) = self.stats.get_mut(victim) {
                    stats.hits_taken += 1;
                }
                if let Some(stats) = self.stats.get_mut(&hit.attacker) {
                    stats.hits_landed += 1;
                    stats.impact_dealt += hit.impact;
                }
            }
        }
    }
}

/// Builder for [`Match`].
pub struct MatchBuilder {
    config: MatchConfig,
    contestants: Vec<(ContestantConfig, Option<Box<dyn VictimPolicy>>)>,
    pose_engine: Option<Box<dyn PoseEngine + Send>>,
    termination: Option<Box<dyn TerminationCheck>>,
}

impl MatchBuilder {
    fn new() -> Self {
        Self {
            config: MatchConfig::default(),
            contestants: Vec::new(),
            pose_engine: None,
            termination: None,
        }
    }

    /// Override match configuration
    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a contestant using the default victim policy
    pub fn contestant(mut self, config: ContestantConfig) -> Self {
        self.contestants.push((config, None));
        self
    }

    /// Add a contestant with its own victim policy
    pub fn contestant_with_policy(
        mut self,
        config: ContestantConfig,
        policy: impl VictimPolicy + 'static,
    ) -> Self {
        self.contestants.push((config, Some(Box::new(policy))));
        self
    }

    /// Set the pose engine (defaults to [`KinematicPoseEngine`])
    pub fn pose_engine(mut self, engine: impl PoseEngine + Send + 'static) -> Self {
        self.pose_engine = Some(Box::new(engine));
        self
    }

    /// Set a hook that can end the match early
    pub fn termination(mut self, check: impl TerminationCheck + 'static) -> Self {
        self.termination = Some(Box::new(check));
        self
    }

    /// Build the match, resolving every contestant's attacks against `catalog`.
    ///
    /// Contestants are lined up along the y axis `separation` apart, every
    /// other one turned around so neighbours face each other.
    pub fn build(self, catalog: &ActionCatalog) -> Result<Match> {
        let MatchConfig {
            delta, time_limit, ..
        } = self.config;
        if !(delta > 0.0 && time_limit > 0.0) {
            return Err(RuntimeError::InvalidTiming { delta, time_limit });
        }
        if self.contestants.len() < 2 {
            return Err(RuntimeError::NotEnoughContestants {
                found: self.contestants.len(),
            });
        }

        let mut pose_engine = self
            .pose_engine
            .unwrap_or_else(|| Box::new(KinematicPoseEngine::new()));
        let mut ids = IdGenerator::new();
        let mut contestants = Vec::with_capacity(self.contestants.len());
        let mut stats = BTreeMap::new();

        for (index, (config, policy)) in self.contestants.into_iter().enumerate() {
            let id = ids.next_id();
            let rotation = if index % 2 == 1 {
                Quat::from_rotation_z(PI)
            } else {
                Quat::IDENTITY
            };
            let position = Vec3::new(0.0, index as f32 * self.config.separation, 0.0);
            pose_engine.place(id, Affine3A::from_rotation_translation(rotation, position));

            stats.insert(
                id,
                ContestantStats {
                    name: config.name.clone(),
                    ..ContestantStats::default()
                },
            );

            let mut contestant = Contestant::new(id, config, catalog)?;
            if let Some(policy) = policy {
                contestant.set_victim_policy(policy);
            }
            contestant.set_time_step(delta);
            tracing::debug!(
                "Contestant {} '{}' placed at {:?}",
                id,
                contestant.name(),
                position
            );
            contestants.push(contestant);
        }

        let mut environment = Environment::new(pose_engine, delta);
        if let Some(check) = self.termination {
            environment.set_termination_check(check);
        }

        // Publish the starting stances so the first step has something to react to.
        for contestant in &mut contestants {
            let pose = environment
                .body_pose(contestant.id())
                .ok_or(RuntimeError::UnknownContestant(contestant.id()))?;
            contestant.set_pose(pose);
            environment.update(&ContestantState {
                contestant: contestant.id(),
                pose,
                actions: Vec::new(),
            })?;
        }
        environment.resolve_hits()?;

        Ok(Match {
            rng: rng_from_str(&self.config.seed),
            config: self.config,
            contestants,
            environment,
            stats,
            steps: 0,
        })
    }
}
