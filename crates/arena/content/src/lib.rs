//! Data-driven action content and loaders.
//!
//! This crate houses the standard action catalog as RON data files:
//! - Attacks (`data/actions/attacks.ron`)
//! - Reactions (`data/actions/reactions.ron`)
//! - Movements (`data/actions/movements.ron`)
//! - Combos built from the above (`data/actions/combos.ron`)
//!
//! Loaders turn those files into an [`arena_core::ActionCatalog`], either from
//! the copies embedded at build time or from a directory on disk.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ComboSpec, LoadResult};
