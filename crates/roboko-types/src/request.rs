//! Structured decision prompts.
//!
//! The rules engine delivers prompts out-of-band as JSON objects, never as
//! ordinary event lines. Exactly one of `wait`, `forceSwitch`, `active`, or
//! `teamPreview` is meaningful per request; every request also carries the
//! agent's roster with per-member condition.

use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{MoveTarget, Side};

/// A decision prompt for the agent's side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The opponent is deciding; nothing to do.
    #[serde(default)]
    pub wait: bool,
    /// One flag per active slot: `true` means that slot must be refilled.
    #[serde(default)]
    pub force_switch: Option<Vec<bool>>,
    /// One entry per active slot with its legal moves.
    #[serde(default)]
    pub active: Option<Vec<ActiveSlot>>,
    /// Team order must be chosen.
    #[serde(default)]
    pub team_preview: bool,
    /// The agent's roster.
    #[serde(default)]
    pub side: SideRoster,
    /// Request sequence number assigned by the rules engine.
    #[serde(default)]
    pub rqid: Option<u64>,
}

/// Borrowed classification of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestKind<'a> {
    /// No decision needed.
    Wait,
    /// Refill empty slots.
    ForceSwitch(&'a [bool]),
    /// Choose a move or switch for each active slot.
    Active(&'a [ActiveSlot]),
    /// Choose a team order.
    TeamPreview,
}

impl Request {
    /// Classify the prompt. Wait wins over everything, then forced
    /// switches, then move slates; anything else is treated as team
    /// preview.
    pub fn kind(&self) -> RequestKind<'_> {
        if self.wait {
            RequestKind::Wait
        } else if let Some(flags) = &self.force_switch {
            RequestKind::ForceSwitch(flags)
        } else if let Some(active) = &self.active {
            RequestKind::Active(active)
        } else {
            RequestKind::TeamPreview
        }
    }

    /// Roster member at a zero-based index.
    pub fn member(&self, index: usize) -> Option<&RosterMember> {
        self.side.pokemon.get(index)
    }
}

/// Per-slot legal options for a move turn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSlot {
    /// Legal moves in slot order.
    #[serde(default)]
    pub moves: Vec<MoveOption>,
    /// Switching out is not allowed this turn.
    #[serde(default)]
    pub trapped: bool,
    /// Trapping is possible but not confirmed.
    #[serde(default)]
    pub maybe_trapped: bool,
    /// Mega evolution is available.
    #[serde(default)]
    pub can_mega_evo: bool,
    /// Ultra burst is available.
    #[serde(default)]
    pub can_ultra_burst: bool,
    /// Z-move slate, if any.
    #[serde(default)]
    pub can_z_move: Option<serde_json::Value>,
}

/// One move entry in an [`ActiveSlot`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveOption {
    /// Display name of the move.
    #[serde(rename = "move")]
    pub name: String,
    /// Normalized move ID.
    #[serde(default)]
    pub id: String,
    /// Target tag.
    #[serde(default)]
    pub target: MoveTarget,
    /// Whether the move cannot be chosen. The rules engine sends either a
    /// boolean or the name of the disabling effect.
    #[serde(default, deserialize_with = "bool_or_source")]
    pub disabled: bool,
    /// Remaining PP.
    #[serde(default)]
    pub pp: Option<u32>,
    /// Maximum PP.
    #[serde(default)]
    pub maxpp: Option<u32>,
}

/// The agent's side as seen in a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SideRoster {
    /// Player display name.
    #[serde(default)]
    pub name: String,
    /// Player side code.
    #[serde(default)]
    pub id: Option<Side>,
    /// Roster in team order; active members come first.
    #[serde(default)]
    pub pokemon: Vec<RosterMember>,
}

/// One roster member.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RosterMember {
    /// Full identifier such as `p2a: Nickname`.
    pub ident: String,
    /// Details such as `Garchomp, L50, M`.
    #[serde(default)]
    pub details: String,
    /// Condition such as `143/143`, `48/143 par`, or `0 fnt`.
    #[serde(default)]
    pub condition: String,
    /// Whether this member is currently on the field.
    #[serde(default)]
    pub active: bool,
}

impl RosterMember {
    /// Whether this member has fainted.
    pub fn is_fainted(&self) -> bool {
        self.condition.ends_with(" fnt")
    }

    /// Species name from the details string.
    pub fn species(&self) -> &str {
        self.details.split(',').next().unwrap_or_default().trim()
    }
}

fn bool_or_source<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    })
}
