//! Match runtime for the melee arena.
//!
//! This crate turns the combat model from `arena-core` into a running match:
//! contestants perceive delayed snapshots, pick attacks they can reach, and the
//! environment resolves the strikes that land. Consumers assemble a [`Match`]
//! through [`MatchBuilder`] and either step it manually or run it to completion.
//!
//! Modules are organized by responsibility:
//! - [`contestant`] hosts the decision engine (reaction window, known attacks, victim policies)
//! - [`environment`] collects contestant states into snapshots and records hits
//! - [`pose`] is the boundary to whatever moves the bodies
//! - [`match_loop`] drives the lock-step loop and summarizes the outcome
//! - [`config`] and [`seed`] hold the knobs that make a match reproducible
pub mod config;
pub mod contestant;
pub mod environment;
pub mod error;
pub mod match_loop;
pub mod pose;
pub mod seed;

pub use config::{
    ContestantConfig, KnownAttackSpec, MAX_REACTION_TIME, MatchConfig, Personality,
};
pub use contestant::{
    BODY_WEIGHT_IMPACT_CONTRIBUTION, Contestant, ContestantState, ExecutingAction,
    FirstOpponent, KnownAttacks, NearestOpponent, ReactionWindow, VictimPolicy,
};
pub use environment::{EnvInfoPacket, Environment, Hit, Snapshot, TerminationCheck};
pub use error::{Result, RuntimeError};
pub use match_loop::{ContestantStats, Match, MatchBuilder, MatchSummary};
pub use pose::{KinematicPoseEngine, PoseEngine};
pub use seed::{rng_from_str, seed_from_str};
