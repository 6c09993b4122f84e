//! Duel runner configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use runtime::PresetKind;

/// Settings for a batch of duels.
#[derive(Clone, Debug, PartialEq)]
pub struct RunnerConfig {
    /// Combat tunables file (TOML or RON).
    pub config_path: Option<PathBuf>,
    /// Complete duel setup file (arena, obstacles, spawns).
    pub setup_path: Option<PathBuf>,
    pub seed: u64,
    pub episodes: u32,
    /// Fixed step length in seconds.
    pub dt: f32,
    pub max_steps: u64,
    pub presets: [PresetKind; 2],
    pub log_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            setup_path: None,
            seed: 0,
            episodes: 10,
            dt: 0.05,
            max_steps: 6_000,
            presets: [PresetKind::Aggressive, PresetKind::Defensive],
            log_dir: None,
        }
    }
}

impl RunnerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_CONFIG` - Combat tunables file (default: built-in values)
    /// - `DUEL_SETUP` - Duel setup file (default: spawns facing off 8 apart)
    /// - `DUEL_SEED` - Base seed, episode `i` uses `seed + i` (default: 0)
    /// - `DUEL_EPISODES` - Number of duels (default: 10)
    /// - `DUEL_DT` - Step length in seconds (default: 0.05)
    /// - `DUEL_MAX_STEPS` - Step budget per duel (default: 6000)
    /// - `DUEL_PRESET_A` / `DUEL_PRESET_B` - Agent presets (default:
    ///   aggressive vs defensive)
    /// - `DUEL_LOG_DIR` - Also write logs to `<dir>/duel.log`
    ///
    /// # Errors
    ///
    /// Fails on an unknown preset name. Unparsable numbers fall back to the
    /// defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`RunnerConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        config.config_path = read("DUEL_CONFIG").map(PathBuf::from);
        config.setup_path = read("DUEL_SETUP").map(PathBuf::from);
        config.log_dir = read("DUEL_LOG_DIR").map(PathBuf::from);

        if let Some(seed) = parse(read("DUEL_SEED")) {
            config.seed = seed;
        }
        if let Some(episodes) = parse::<u32>(read("DUEL_EPISODES")) {
            config.episodes = episodes.max(1);
        }
        if let Some(dt) = parse::<f32>(read("DUEL_DT")).filter(|dt| dt.is_finite() && *dt > 0.0) {
            config.dt = dt;
        }
        if let Some(max_steps) = parse::<u64>(read("DUEL_MAX_STEPS")) {
            config.max_steps = max_steps.max(1);
        }

        for (slot, key) in ["DUEL_PRESET_A", "DUEL_PRESET_B"].into_iter().enumerate() {
            if let Some(name) = read(key) {
                config.presets[slot] = name.parse()?;
            }
        }

        Ok(config)
    }
}

fn parse<T: FromStr>(value: Option<String>) -> Option<T> {
    value?.trim().parse().ok()
}
