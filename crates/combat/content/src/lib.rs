//! Data-driven content for duels.
//!
//! Combat tunables and arena layouts live in TOML/RON files so balance can be
//! adjusted without recompiling. [`DuelSetup`] is the in-memory form of a
//! complete duel description.

#[cfg(feature = "loaders")]
pub mod loaders;
pub mod setup;

pub use setup::{DuelSetup, SetupError, SpawnSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, SetupLoader};
