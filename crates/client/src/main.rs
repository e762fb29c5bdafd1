//! `combat-sim`: runs a batch of encounters and prints a JSON summary.
use anyhow::Result;
use combat_client::{ConsolePresenter, SimConfig, logging, run};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!(
        seed = config.seed,
        encounters = config.encounters,
        monster = %config.monster,
        hero_level = config.hero_level,
        "Starting combat simulation"
    );

    let summary = run(&config, ConsolePresenter::stdout()).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
