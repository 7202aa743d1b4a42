//! Prompt/update sequencing.
//!
//! Prompts and state lines can arrive in either order within a chunk. A
//! decision is made only once a prompt is stored *and* at least one
//! state-changing line has been seen since the last response.
//!
//! ```text
//!            Prompt (no update yet)           Update
//!   Idle ------------------------> Awaiting ----------> Ready
//!    ^  \                                                 |
//!    |   `------ Prompt (update already seen) ----------->|
//!    |                                                    |
//!    `-------------------- Responded ---------------------'
//! ```
//!
//! A later prompt always replaces the stored one.

use roboko_types::Request;

/// Session state. The stored prompt lives inside the state that needs it.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No pending prompt.
    Idle {
        /// A state-changing line has arrived since the last response.
        update_seen: bool,
    },
    /// A prompt is stored but state may be stale.
    AwaitingUpdate(Box<Request>),
    /// A prompt is stored and state is fresh.
    ReadyToRespond(Box<Request>),
}

/// Inputs that drive [`SessionState::transition`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionInput {
    /// A prompt arrived.
    Prompt(Box<Request>),
    /// A state-changing line arrived.
    Update,
    /// A decision for the stored prompt was emitted.
    Responded,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle { update_seen: false }
    }
}

impl SessionState {
    /// The single transition function.
    #[must_use]
    pub fn transition(self, input: SessionInput) -> Self {
        match (self, input) {
            (_, SessionInput::Responded) => Self::default(),
            (Self::Idle { update_seen: true } | Self::ReadyToRespond(_), SessionInput::Prompt(request)) => {
                Self::ReadyToRespond(request)
            }
            (Self::Idle { update_seen: false } | Self::AwaitingUpdate(_), SessionInput::Prompt(request)) => {
                Self::AwaitingUpdate(request)
            }
            (Self::Idle { .. }, SessionInput::Update) => Self::Idle { update_seen: true },
            (Self::AwaitingUpdate(request) | Self::ReadyToRespond(request), SessionInput::Update) => {
                Self::ReadyToRespond(request)
            }
        }
    }

    /// The prompt ready to be answered, if any.
    pub fn ready(&self) -> Option<&Request> {
        match self {
            Self::ReadyToRespond(request) => Some(request),
            _ => None,
        }
    }

    /// Short state name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle { .. } => "idle",
            Self::AwaitingUpdate(_) => "awaiting_update",
            Self::ReadyToRespond(_) => "ready_to_respond",
        }
    }
}
