//! Arena binary configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use runtime::{MAX_REACTION_TIME, MatchConfig};

/// Configuration for a single run of the arena binary.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    pub seed: String,
    pub delta: f32,
    pub time_limit: f32,
    /// Directory of RON action files replacing the embedded catalog.
    pub catalog_dir: Option<PathBuf>,
    /// Reaction time of the first contestant.
    pub reaction_time: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: MatchConfig::DEFAULT_SEED.to_owned(),
            delta: MatchConfig::DEFAULT_DELTA,
            time_limit: MatchConfig::DEFAULT_TIME_LIMIT,
            catalog_dir: None,
            reaction_time: MAX_REACTION_TIME / 2,
        }
    }
}

impl ArenaConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_SEED` - Seed string for the match (default: "Hello world!")
    /// - `ARENA_DELTA` - Seconds per time step (default: 0.2)
    /// - `ARENA_TIME_LIMIT` - Seconds before the match ends (default: 10)
    /// - `ARENA_CATALOG_DIR` - Directory of action RON files (default: embedded catalog)
    /// - `ARENA_REACTION_TIME` - First contestant's reaction time in steps (default: 10)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(seed) = env::var("ARENA_SEED") {
            config.seed = seed;
        }

        if let Some(delta) = read_env::<f32>("ARENA_DELTA") {
            config.delta = delta;
        }

        if let Some(time_limit) = read_env::<f32>("ARENA_TIME_LIMIT") {
            config.time_limit = time_limit;
        }

        config.catalog_dir = env::var("ARENA_CATALOG_DIR").ok().map(PathBuf::from);

        if let Some(reaction_time) = read_env::<usize>("ARENA_REACTION_TIME") {
            config.reaction_time = reaction_time.min(MAX_REACTION_TIME);
        }

        config
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::new(self.seed.clone())
            .with_delta(self.delta)
            .with_time_limit(self.time_limit)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_bout() {
        let config = ArenaConfig::default();
        assert_eq!(config.reaction_time, 10);
        assert_eq!(config.match_config(), MatchConfig::default());
    }
}
