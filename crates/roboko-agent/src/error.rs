//! Error types for the battle agent.
//!
//! Malformed or irrelevant event lines are never errors; they are dropped
//! by the parser. What remains here is either a fault reported by the rules
//! engine, a request the agent cannot read, or a decision the agent cannot
//! make without guessing.

use roboko_types::{Choice, Identity, Request};

/// Errors that terminate a battle session.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// No legal candidate exists for a slot that demands a decision.
    #[error(
        "unable to make a choice for active slot {slot}: request={request:?}, state={state}, chosen={chosen:?}"
    )]
    NoLegalChoice {
        /// Zero-based active slot index.
        slot: usize,
        /// The full prompt being answered.
        request: Box<Request>,
        /// Snapshot of the tracked positional state.
        state: String,
        /// Choices already made earlier in this cycle.
        chosen: Vec<Choice>,
    },

    /// The rules engine reported a fault other than an unavailable choice.
    #[error("rules engine error: {0}")]
    Protocol(String),

    /// An identity is not bound to any slot.
    #[error("identity not on the field: {identity}")]
    UnknownIdentity {
        /// The identity that was looked up.
        identity: Identity,
    },

    /// A prompt could not be deserialized.
    #[error("malformed request: {0}")]
    Request(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid {name}: {value}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
