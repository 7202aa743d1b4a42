//! Shared type definitions for the Roboko battle agent.
//!
//! This crate holds everything that crosses a boundary between the rules
//! engine's text stream, the reference data, and the decision core: sides,
//! battlefield slots, move target tags, structured prompts, and the choice
//! commands sent back.
//!
//! # Modules
//!
//! - [`ids`] -- Agent instance IDs and protocol identities
//! - [`enums`] -- Sides, slots, target tags, move categories, elemental types
//! - [`request`] -- Structured decision prompts delivered out-of-band
//! - [`choice`] -- Outbound choice commands

pub mod choice;
pub mod enums;
pub mod ids;
pub mod request;

// Re-export all public types at crate root for convenience.
pub use choice::{Choice, ChoiceLine};
pub use enums::{MoveCategory, MoveTarget, PokemonType, Position, Side, Slot, TargetClass};
pub use ids::{AgentId, Identity};
pub use request::{ActiveSlot, MoveOption, Request, RequestKind, RosterMember, SideRoster};
