//! Headless duel runner.
//!
//! Reads its settings from the environment, runs a batch of seeded duels
//! and reports the per-episode statistics through `tracing`.

pub mod config;
pub mod logging;
pub mod session;

pub use config::RunnerConfig;
pub use logging::setup_logging;
pub use session::{EpisodeReport, Session, Summary, load_setup};
