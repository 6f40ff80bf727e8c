//! Unified error type surfaced by the match runtime.
//!
//! Wraps failures from the combat model (catalog lookups, reach, targeting)
//! together with match assembly problems so callers can bubble them up with
//! consistent context.
use arena_core::{
    ArenaError, CatalogError, ContestantId, ErrorSeverity, ReachError, StrikeLocationMismatch,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Reach(#[from] ReachError),

    #[error(transparent)]
    StrikeLocations(#[from] StrikeLocationMismatch),

    #[error("contestant '{name}' knows no attacks")]
    NoKnownAttacks { name: String },

    #[error("contestant {0} is not part of this match")]
    UnknownContestant(ContestantId),

    #[error("victim {0} is missing from the snapshot")]
    VictimNotInSnapshot(ContestantId),

    #[error("a match needs at least two contestants, got {found}")]
    NotEnoughContestants { found: usize },

    #[error("time step {delta} and time limit {time_limit} must both be positive")]
    InvalidTiming { delta: f32, time_limit: f32 },
}

impl RuntimeError {
    /// Severity of the underlying failure, following the combat model's classification.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Catalog(err) => err.severity(),
            Self::Reach(err) => err.severity(),
            Self::StrikeLocations(err) => err.severity(),
            Self::UnknownContestant(_) => ErrorSeverity::Validation,
            Self::VictimNotInSnapshot(_) => ErrorSeverity::Recoverable,
            Self::NoKnownAttacks { .. }
            | Self::NotEnoughContestants { .. }
            | Self::InvalidTiming { .. } => ErrorSeverity::Fatal,
        }
    }
}
