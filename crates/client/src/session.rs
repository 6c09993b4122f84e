//! Batch of seeded duels driven by a [`RunnerConfig`].

use std::fmt;

use anyhow::{Context, Result};
use combat_content::{ConfigLoader, DuelSetup, SetupLoader};
use combat_core::CombatantId;
use runtime::{Duel, DuelOutcome, EpisodeStats, Fighter};
use tracing::{info, warn};

use crate::config::RunnerConfig;

/// Result of a single episode.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeReport {
    pub index: u32,
    pub seed: u64,
    pub outcome: DuelOutcome,
    pub steps: u64,
    pub elapsed: f64,
    pub stats: EpisodeStats,
}

/// Totals over every episode of a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub episodes: u32,
    pub wins: [u32; 2],
    pub draws: u32,
    pub timeouts: u32,
    pub labels: [String; 2],
}

impl Summary {
    fn record(&mut self, outcome: DuelOutcome) {
        self.episodes += 1;
        match outcome {
            DuelOutcome::Winner(CombatantId(slot)) => {
                if let Some(wins) = self.wins.get_mut(slot as usize) {
                    *wins += 1;
                }
            }
            DuelOutcome::Draw => self.draws += 1,
            DuelOutcome::Timeout => self.timeouts += 1,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} episodes: {} (#0) won {}, {} (#1) won {}, {} draws, {} timeouts",
            self.episodes,
            self.labels[0],
            self.wins[0],
            self.labels[1],
            self.wins[1],
            self.draws,
            self.timeouts
        )
    }
}

/// Resolves the duel setup: `DUEL_SETUP` or the default layout, with the
/// tunables from `DUEL_CONFIG` taking precedence.
pub fn load_setup(config: &RunnerConfig) -> Result<DuelSetup> {
    let mut setup = match &config.setup_path {
        Some(path) => SetupLoader::load(path)?,
        None => DuelSetup::default(),
    };
    if let Some(path) = &config.config_path {
        setup.config = ConfigLoader::load(path)?;
    }
    Ok(setup)
}

/// A configured batch of duels.
pub struct Session {
    config: RunnerConfig,
    setup: DuelSetup,
}

impl Session {
    pub fn new(config: RunnerConfig, setup: DuelSetup) -> Self {
        Self { config, setup }
    }

    /// Loads the setup named by `config` and builds a session over it.
    pub fn load(config: RunnerConfig) -> Result<Self> {
        let setup = load_setup(&config)?;
        Ok(Self::new(config, setup))
    }

    pub fn setup(&self) -> &DuelSetup {
        &self.setup
    }

    /// Runs episode `index` alone. Its seed is `seed + index`, so the result
    /// does not depend on earlier episodes.
    pub fn run_episode(&self, index: u32) -> Result<EpisodeReport> {
        let seed = self.config.seed.wrapping_add(u64::from(index));
        let [a, b] = self.config.presets;
        let fighters = [
            Fighter::preset(a, seed, self.setup.arena),
            // Offset so mirrored random presets do not pick in lockstep.
            Fighter::preset(b, seed.wrapping_add(1 << 32), self.setup.arena),
        ];

        let mut duel = Duel::from_setup(&self.setup, fighters)
            .with_context(|| format!("failed to build episode {index}"))?
            .with_listener(EpisodeStats::new());
        let outcome = duel.run(self.config.dt, self.config.max_steps);

        let report = EpisodeReport {
            index,
            seed,
            outcome,
            steps: duel.steps(),
            elapsed: duel.elapsed(),
            stats: duel.into_listener(),
        };
        log_episode(&report);
        Ok(report)
    }

    /// Runs every episode in order.
    pub fn run(&self) -> Result<Summary> {
        let mut summary = Summary {
            labels: self.config.presets.map(|kind| kind.to_string()),
            ..Summary::default()
        };
        for index in 0..self.config.episodes {
            let report = self.run_episode(index)?;
            summary.record(report.outcome);
        }
        Ok(summary)
    }
}

fn log_episode(report: &EpisodeReport) {
    info!(
        episode = report.index,
        seed = report.seed,
        outcome = %report.outcome,
        steps = report.steps,
        time = report.elapsed,
        "episode finished"
    );
    for (id, stats) in report.stats.iter() {
        info!(
            episode = report.index,
            combatant = %id,
            attacks = stats.attacks_started,
            landed = stats.attacks_landed,
            dealt = stats.damage_dealt,
            taken = stats.damage_taken,
            blocks = stats.blocks,
            dodges = stats.dodges,
            rejected = stats.rejected_actions,
            died = stats.died,
            "episode stats"
        );
    }
    if report.outcome == DuelOutcome::Timeout {
        warn!(episode = report.index, "step budget exhausted before a knockout");
    }
}
