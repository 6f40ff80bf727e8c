//! Contestant and match configuration records.
//!
//! Both records deserialize with every field optional, falling back to the
//! defaults below, so a roster file only has to name what it changes.

use arena_core::{BodyPart, Reach};
use serde::{Deserialize, Serialize};

/// Slowest possible reaction, in time steps.
pub const MAX_REACTION_TIME: usize = 20;

/// Fighting style. Carried on the configuration for decision heuristics.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Personality {
    /// Prefers non-contact reactions.
    CantTouchThis,
    /// Prefers contact reactions, moves less.
    StandAndBang,
    /// Prefers low-commitment combos such as feints.
    Faker,
}

/// An attack a contestant knows, with its maximum reach expressed relative
/// to one of the contestant's limbs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnownAttackSpec {
    /// Catalog key of the template.
    pub action: String,
    pub limb: BodyPart,
    pub scale: f32,
}

impl KnownAttackSpec {
    pub fn new(action: impl Into<String>, limb: BodyPart, scale: f32) -> Self {
        Self {
            action: action.into(),
            limb,
            scale,
        }
    }
}

/// Per-contestant parameters.
///
/// Only `reaction_time`, `reach`, `known_attacks`, and `strike_force` drive
/// decisions today; the remaining traits are carried for richer heuristics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestantConfig {
    pub name: String,
    /// Time steps that must pass before a snapshot can be reacted to.
    pub reaction_time: usize,
    pub learn_rate: Option<f32>,
    pub caution: Option<f32>,
    pub ambiguity: Option<f32>,
    pub perception: Option<f32>,
    pub reach: Reach,
    pub commitment_precision: Option<f32>,
    pub defensive_mistake_likelihood: Option<f32>,
    pub mobility: Option<f32>,
    pub stamina: Option<f32>,
    pub health: Option<f32>,
    pub mass: Option<f32>,
    pub personality: Option<Personality>,
    pub team_affiliation: Option<u32>,
    pub known_attacks: Vec<KnownAttackSpec>,
    /// Force, in newtons, a striking part is driven with for one time step.
    pub strike_force: f32,
}

impl ContestantConfig {
    pub const DEFAULT_STRIKE_FORCE: f32 = 100.0;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reaction_time: MAX_REACTION_TIME,
            learn_rate: None,
            caution: None,
            ambiguity: None,
            perception: None,
            reach: Reach::default(),
            commitment_precision: None,
            defensive_mistake_likelihood: None,
            mobility: None,
            stamina: None,
            health: None,
            mass: None,
            personality: None,
            team_affiliation: None,
            known_attacks: Self::default_known_attacks(),
            strike_force: Self::DEFAULT_STRIKE_FORCE,
        }
    }

    /// JAB_HEAD at left-hand reach and STEP_JAB_HEAD at one and a half times it.
    pub fn default_known_attacks() -> Vec<KnownAttackSpec> {
        vec![
            KnownAttackSpec::new("JAB_HEAD", BodyPart::HandL, 1.0),
            KnownAttackSpec::new("STEP_JAB_HEAD", BodyPart::HandL, 1.5),
        ]
    }

    /// Half of `reaction_time`, rounded down.
    pub fn min_reaction_time(&self) -> usize {
        self.reaction_time / 2
    }

    #[must_use]
    pub fn with_reaction_time(mut self, reaction_time: usize) -> Self {
        self.reaction_time = reaction_time;
        self
    }

    #[must_use]
    pub fn with_reach(mut self, reach: Reach) -> Self {
        self.reach = reach;
        self
    }

    #[must_use]
    pub fn with_known_attacks(mut self, known_attacks: Vec<KnownAttackSpec>) -> Self {
        self.known_attacks = known_attacks;
        self
    }

    #[must_use]
    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = Some(personality);
        self
    }

    #[must_use]
    pub fn with_team(mut self, team: u32) -> Self {
        self.team_affiliation = Some(team);
        self
    }

    #[must_use]
    pub fn with_strike_force(mut self, strike_force: f32) -> Self {
        self.strike_force = strike_force;
        self
    }
}

impl Default for ContestantConfig {
    fn default() -> Self {
        Self::new("contestant")
    }
}

/// Match-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Simulated seconds per step.
    pub delta: f32,
    /// Simulated seconds before the match ends on time.
    pub time_limit: f32,
    /// Seed string; see [`crate::seed::seed_from_str`].
    pub seed: String,
    /// Head-to-head distance contestants start at.
    pub separation: f32,
}

impl MatchConfig {
    pub const DEFAULT_DELTA: f32 = 0.2;
    pub const DEFAULT_TIME_LIMIT: f32 = 10.0;
    pub const DEFAULT_SEED: &'static str = "Hello world!";
    pub const DEFAULT_SEPARATION: f32 = 0.9;

    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            delta: Self::DEFAULT_DELTA,
            time_limit: Self::DEFAULT_TIME_LIMIT,
            seed: seed.into(),
            separation: Self::DEFAULT_SEPARATION,
        }
    }

    /// Number of steps that fit in the time limit.
    pub fn step_count(&self) -> usize {
        // Tolerate float error so 10.0 / 0.2 is 50 steps, not 51.
        ((self.time_limit / self.delta) - 1e-4).ceil().max(0.0) as usize
    }

    #[must_use]
    pub fn with_delta(mut self, delta: f32) -> Self {
        self.delta = delta;
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: f32) -> Self {
        self.time_limit = time_limit;
        self
    }

    #[must_use]
    pub fn with_separation(mut self, separation: f32) -> Self {
        self.separation = separation;
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_reaction_time_truncates() {
        assert_eq!(ContestantConfig::new("a").min_reaction_time(), 10);
        assert_eq!(
            ContestantConfig::new("a")
                .with_reaction_time(7)
                .min_reaction_time(),
            3
        );
    }

    #[test]
    fn builder_sets_personality_and_team() {
        let personality: Personality = "stand_and_bang".parse().unwrap();
        assert_eq!(personality.to_string(), "STAND_AND_BANG");

        let config = ContestantConfig::new("Jill")
            .with_personality(personality)
            .with_team(2)
            .with_strike_force(150.0);
        assert_eq!(config.personality, Some(Personality::StandAndBang));
        assert_eq!(config.team_affiliation, Some(2));
        assert_eq!(config.strike_force, 150.0);
        assert_eq!(ContestantConfig::new("Jill").personality, None);
    }

    #[test]
    fn default_match_runs_fifty_steps() {
        assert_eq!(MatchConfig::default().step_count(), 50);
        assert_eq!(MatchConfig::default().with_delta(0.3).step_count(), 34);
    }
}
