use anyhow::Result;
use duel_client::{RunnerConfig, Session, setup_logging};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = RunnerConfig::from_env()?;
    let _guard = setup_logging(config.log_dir.as_deref())?;

    tracing::info!(
        seed = config.seed,
        episodes = config.episodes,
        dt = config.dt,
        max_steps = config.max_steps,
        a = %config.presets[0],
        b = %config.presets[1],
        "starting duel session"
    );

    let session = Session::load(config)?;
    let summary = session.run()?;
    tracing::info!(%summary, "session complete");
    println!("{summary}");

    Ok(())
}
