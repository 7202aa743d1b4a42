//! Protocol state tracking and heuristic choice selection for one side of a
//! two-sided battle.
//!
//! The agent consumes the rules engine's append-only text stream, rebuilds
//! just enough positional state to know who stands where, and answers each
//! decision prompt with a legal command drawn from a score-weighted
//! distribution.
//!
//! # Architecture
//!
//! ```text
//! chunk --> protocol (line parser) --> tracker (slot/species tables)
//!                 |
//!                 +--> session (Idle -> AwaitingUpdate -> ReadyToRespond)
//!                                   |
//!        candidate (generate) --> scoring (score) --> selector (sample)
//! ```
//!
//! # Modules
//!
//! - [`agent`] -- [`BattleAgent`], the per-side façade driving everything
//! - [`candidate`] -- Legal move / switch / pass candidates
//! - [`config`] -- YAML configuration ([`AgentConfig`], [`ScoringConfig`])
//! - [`error`] -- Error types ([`AgentError`], [`ConfigError`])
//! - [`protocol`] -- Stateless line parser
//! - [`scoring`] -- Candidate desirability
//! - [`selector`] -- Squared-score inverse-CDF sampling
//! - [`session`] -- Prompt/update sequencing state machine
//! - [`tracker`] -- Slot ↔ identity ↔ species bindings

pub mod agent;
pub mod candidate;
pub mod config;
pub mod error;
pub mod protocol;
pub mod scoring;
pub mod selector;
pub mod session;
pub mod tracker;

#[cfg(test)]
pub(crate) mod fixtures;

pub use agent::{AgentOutput, BattleAgent, BattleOutcome, DecisionRecord};
pub use candidate::{Action, Candidate};
pub use config::{AgentConfig, ScoringConfig};
pub use error::{AgentError, ConfigError};
pub use session::{SessionInput, SessionState};
pub use tracker::Tracker;
