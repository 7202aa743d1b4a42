//! Stdio entry point for the Roboko battle agent.
//!
//! Plays one side of one battle. Protocol chunks arrive on stdin separated
//! by blank lines; commands leave on stdout as `>{side} {choice}`. Logs go
//! to stderr so they never mix with commands.
//!
//! # Architecture
//!
//! ```text
//! stdin --> ChunkReader --> BattleAgent --> write_choice --> stdout
//! ```
//!
//! The process exits when the battle ends, when stdin closes, or on the
//! first fatal agent error.

mod config;
mod error;
mod runner;
mod stream;

use std::sync::Arc;

use anyhow::Context;
use roboko_agent::BattleAgent;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::RunnerConfig;

/// Application entry point.
///
/// Loads configuration from the environment, reads the reference data,
/// then runs the battle loop until it finishes.
///
/// # Errors
///
/// Returns an error if startup fails or the agent hits a fatal condition.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RunnerConfig::from_env().context("loading runner configuration")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(
        side = %config.side,
        dex_path = %config.dex_path.display(),
        config_path = ?config.config_path,
        "roboko-runner starting"
    );

    let agent_config = config.agent_config().context("loading agent configuration")?;
    let dex = config
        .load_dex()
        .with_context(|| format!("loading reference data from {}", config.dex_path.display()))?;

    let mut agent = BattleAgent::new(config.side, Arc::new(dex), agent_config);
    info!(agent_id = %agent.id(), "agent ready, reading battle stream");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    match runner::run_battle(&mut agent, stdin, &mut stdout).await {
        Ok(outcome) => {
            info!(outcome = ?outcome, "roboko-runner exiting");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "battle aborted");
            Err(e.into())
        }
    }
}
