//! Enumeration types shared by the tracker, generator, and scorer.
//!
//! Target tags and elemental types arrive as free-form strings from the
//! rules engine and the reference data. Both are closed enums here with a
//! catch-all variant, so an unfamiliar tag degrades to the most permissive
//! behavior instead of failing deserialization.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Sides and slots
// ---------------------------------------------------------------------------

/// One of the two players in a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Player one.
    P1,
    /// Player two.
    P2,
}

impl Side {
    /// Protocol code (`p1` / `p2`).
    pub const fn code(self) -> &'static str {
        match self {
            Self::P1 => "p1",
            Self::P2 => "p2",
        }
    }

    /// The other player.
    pub const fn opponent(self) -> Self {
        match self {
            Self::P1 => Self::P2,
            Self::P2 => Self::P1,
        }
    }

    /// Parse a side code prefix. Accepts `p1`, `p2`, and anything that
    /// starts with one of them (`p2a`, `p1b: Name`).
    pub fn from_prefix(token: &str) -> Option<Self> {
        if token.starts_with("p1") {
            Some(Self::P1)
        } else if token.starts_with("p2") {
            Some(Self::P2)
        } else {
            None
        }
    }
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl core::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "p1" => Ok(Self::P1),
            "p2" => Ok(Self::P2),
            other => Err(format!("unknown side: {other}")),
        }
    }
}

/// Front or back position on one side of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Position `a`.
    Front,
    /// Position `b`.
    Back,
}

/// A battlefield position relative to the agent's own side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// Our front position.
    MineFront,
    /// Our back position.
    MineBack,
    /// Opponent's front position.
    OppFront,
    /// Opponent's back position.
    OppBack,
}

impl Slot {
    /// Every slot, in table order.
    pub const ALL: [Self; 4] = [Self::MineFront, Self::MineBack, Self::OppFront, Self::OppBack];

    /// Opponent slots, front first.
    pub const OPPONENT: [Self; 2] = [Self::OppFront, Self::OppBack];

    /// Build a slot from ownership and position.
    pub const fn new(mine: bool, position: Position) -> Self {
        match (mine, position) {
            (true, Position::Front) => Self::MineFront,
            (true, Position::Back) => Self::MineBack,
            (false, Position::Front) => Self::OppFront,
            (false, Position::Back) => Self::OppBack,
        }
    }

    /// Our slot for the given active index (0 = front, 1 = back).
    pub const fn mine_at(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::MineFront),
            1 => Some(Self::MineBack),
            _ => None,
        }
    }

    /// Index into a fixed four-entry slot table.
    pub const fn index(self) -> usize {
        match self {
            Self::MineFront => 0,
            Self::MineBack => 1,
            Self::OppFront => 2,
            Self::OppBack => 3,
        }
    }

    /// Whether this slot belongs to the agent's side.
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::MineFront | Self::MineBack)
    }

    /// Front or back.
    pub const fn position(self) -> Position {
        match self {
            Self::MineFront | Self::OppFront => Position::Front,
            Self::MineBack | Self::OppBack => Position::Back,
        }
    }

    /// The other slot on the same side.
    pub const fn partner(self) -> Self {
        match self {
            Self::MineFront => Self::MineBack,
            Self::MineBack => Self::MineFront,
            Self::OppFront => Self::OppBack,
            Self::OppBack => Self::OppFront,
        }
    }

    /// Target number used in `move` commands: foes are positive, allies
    /// negative.
    pub const fn target_number(self) -> i8 {
        match self {
            Self::MineFront => -1,
            Self::MineBack => -2,
            Self::OppFront => 1,
            Self::OppBack => 2,
        }
    }
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::MineFront => "mine-front",
            Self::MineBack => "mine-back",
            Self::OppFront => "opp-front",
            Self::OppBack => "opp-back",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Move target tags
// ---------------------------------------------------------------------------

/// Target tag attached to a move by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MoveTarget {
    /// One adjacent target chosen by the user.
    Normal,
    /// Any single target, adjacent or not.
    Any,
    /// One adjacent foe.
    AdjacentFoe,
    /// The user's partner only.
    AdjacentAlly,
    /// The user or its partner.
    AdjacentAllyOrSelf,
    /// The user itself.
    SelfTarget,
    /// Every adjacent combatant.
    AllAdjacent,
    /// Every adjacent foe.
    AllAdjacentFoes,
    /// The whole field.
    All,
    /// The user's side of the field.
    AllySide,
    /// The opposing side of the field.
    FoeSide,
    /// The user's whole team.
    AllyTeam,
    /// A random adjacent foe.
    RandomNormal,
    /// Target decided by the move's script.
    Scripted,
    /// A tag this agent does not recognize.
    #[default]
    Other,
}

/// How a [`MoveTarget`] expands into candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetClass {
    /// One candidate per occupied opponent slot.
    FoeSingle,
    /// One candidate aimed at the partner.
    Ally,
    /// Two candidates: self and partner.
    AllyOrSelf,
    /// Exactly one candidate with no target.
    Untargeted,
}

impl MoveTarget {
    /// Protocol spelling of the tag.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Any => "any",
            Self::AdjacentFoe => "adjacentFoe",
            Self::AdjacentAlly => "adjacentAlly",
            Self::AdjacentAllyOrSelf => "adjacentAllyOrSelf",
            Self::SelfTarget => "self",
            Self::AllAdjacent => "allAdjacent",
            Self::AllAdjacentFoes => "allAdjacentFoes",
            Self::All => "all",
            Self::AllySide => "allySide",
            Self::FoeSide => "foeSide",
            Self::AllyTeam => "allyTeam",
            Self::RandomNormal => "randomNormal",
            Self::Scripted => "scripted",
            Self::Other => "other",
        }
    }

    /// Candidate expansion rule for this tag.
    pub const fn class(&self) -> TargetClass {
        match self {
            Self::Normal | Self::Any | Self::AdjacentFoe => TargetClass::FoeSingle,
            Self::AdjacentAlly => TargetClass::Ally,
            Self::AdjacentAllyOrSelf => TargetClass::AllyOrSelf,
            _ => TargetClass::Untargeted,
        }
    }
}

impl From<&str> for MoveTarget {
    fn from(raw: &str) -> Self {
        match raw {
            "normal" => Self::Normal,
            "any" => Self::Any,
            "adjacentFoe" => Self::AdjacentFoe,
            "adjacentAlly" => Self::AdjacentAlly,
            "adjacentAllyOrSelf" => Self::AdjacentAllyOrSelf,
            "self" => Self::SelfTarget,
            "allAdjacent" => Self::AllAdjacent,
            "allAdjacentFoes" => Self::AllAdjacentFoes,
            "all" => Self::All,
            "allySide" => Self::AllySide,
            "foeSide" => Self::FoeSide,
            "allyTeam" => Self::AllyTeam,
            "randomNormal" => Self::RandomNormal,
            "scripted" => Self::Scripted,
            _ => Self::Other,
        }
    }
}

impl From<String> for MoveTarget {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<MoveTarget> for String {
    fn from(target: MoveTarget) -> Self {
        target.as_str().to_owned()
    }
}

// ---------------------------------------------------------------------------
// Move categories and elemental types
// ---------------------------------------------------------------------------

/// Damage category of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    /// Uses Attack against Defense.
    Physical,
    /// Uses Special Attack against Special Defense.
    Special,
    /// Deals no direct damage.
    Status,
}

/// Elemental type of a species or move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[allow(missing_docs)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
    /// Typeless or unrecognized (`???`).
    Unknown,
}

impl PokemonType {
    /// The eighteen real types, in chart order.
    pub const ALL: [Self; 18] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Electric,
        Self::Grass,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
    ];

    /// Display name as used in reference data.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Electric => "Electric",
            Self::Grass => "Grass",
            Self::Ice => "Ice",
            Self::Fighting => "Fighting",
            Self::Poison => "Poison",
            Self::Ground => "Ground",
            Self::Flying => "Flying",
            Self::Psychic => "Psychic",
            Self::Bug => "Bug",
            Self::Rock => "Rock",
            Self::Ghost => "Ghost",
            Self::Dragon => "Dragon",
            Self::Dark => "Dark",
            Self::Steel => "Steel",
            Self::Fairy => "Fairy",
            Self::Unknown => "???",
        }
    }
}

impl From<&str> for PokemonType {
    fn from(raw: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or(Self::Unknown)
    }
}

impl From<String> for PokemonType {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<PokemonType> for String {
    fn from(t: PokemonType) -> Self {
        t.as_str().to_owned()
    }
}

impl core::fmt::Display for PokemonType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
