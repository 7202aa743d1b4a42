//! Error types for the runner.
//!
//! Uses `thiserror` for typed errors covering startup (environment, data
//! files, agent config) and the battle loop (stream I/O, fatal agent
//! errors).

use roboko_agent::{AgentError, ConfigError};
use roboko_dex::DexError;

/// Errors that can occur while running a battle.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Environment configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// The agent configuration file could not be loaded.
    #[error("agent config error: {0}")]
    AgentConfig(#[from] ConfigError),

    /// Reference data could not be loaded.
    #[error("reference data error: {0}")]
    Dex(#[from] DexError),

    /// The agent hit a fatal condition.
    #[error("agent error: {0}")]
    Agent(#[from] AgentError),

    /// Reading the input stream or writing a command failed.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}
