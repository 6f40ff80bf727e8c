//! Melee arena binary.
//!
//! Composition root that assembles a match from:
//! 1. The action catalog (embedded, or RON files from `ARENA_CATALOG_DIR`)
//! 2. Two contestants, Jack and Jill
//! 3. The match runtime with its default kinematic pose engine
//!
//! # Examples
//!
//! ```bash
//! # Default match
//! cargo run -p arena-client
//!
//! # Different seed, decision traces on
//! ARENA_SEED="rematch" RUST_LOG=runtime=debug cargo run -p arena-client
//! ```

mod config;

use anyhow::{Context, Result};
use arena_content::CatalogLoader;
use runtime::{ContestantConfig, Match};

use crate::config::ArenaConfig;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    setup_logging();

    let config = ArenaConfig::from_env();
    tracing::debug!("Configuration: {:?}", config);

    let catalog = match &config.catalog_dir {
        Some(dir) => CatalogLoader::load_dir(dir)
            .with_context(|| format!("Failed to load action catalog from {}", dir.display()))?,
        None => CatalogLoader::load()?,
    };
    tracing::info!("Loaded {} actions", catalog.len());

    let summary = Match::builder()
        .config(config.match_config())
        .contestant(ContestantConfig::new("Jack").with_reaction_time(config.reaction_time))
        .contestant(ContestantConfig::new("Jill"))
        .build(&catalog)
        .context("Failed to assemble match")?
        .run()?;

    for (id, stats) in &summary.contestants {
        tracing::info!(
            "{} {}: {} hit(s) landed, {} taken, impact {:.1}",
            id,
            stats.name,
            stats.hits_landed,
            stats.hits_taken,
            stats.impact_dealt
        );
    }

    println!("{} won!", summary.winner_name());
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
