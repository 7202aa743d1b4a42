//! Outbound choice commands.
//!
//! A decision cycle produces one [`Choice`] per slot that demands one; the
//! cycle's output is a single [`ChoiceLine`] joining them with `", "`.

use serde::{Deserialize, Serialize};

use crate::enums::Slot;

/// One per-slot command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// Use the move in the 1-based `slot`, optionally aimed at `target`.
    Move {
        /// 1-based move slot.
        slot: usize,
        /// Target slot, if the move takes one.
        target: Option<Slot>,
    },
    /// Switch to the 1-based roster position `slot`.
    Switch {
        /// 1-based roster position.
        slot: usize,
    },
    /// Do nothing for this slot.
    Pass,
    /// Team order for preview, as 1-based roster positions.
    Team {
        /// Roster positions in lead order.
        order: Vec<usize>,
    },
}

impl core::fmt::Display for Choice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Move { slot, target: Some(t) } => write!(f, "move {slot} {}", t.target_number()),
            Self::Move { slot, target: None } => write!(f, "move {slot}"),
            Self::Switch { slot } => write!(f, "switch {slot}"),
            Self::Pass => f.write_str("pass"),
            Self::Team { order } => {
                f.write_str("team ")?;
                for position in order {
                    write!(f, "{position}")?;
                }
                Ok(())
            }
        }
    }
}

/// The full outbound line for one decision cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChoiceLine(pub Vec<Choice>);

impl core::fmt::Display for ChoiceLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for choice in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{choice}")?;
            first = false;
        }
        Ok(())
    }
}
