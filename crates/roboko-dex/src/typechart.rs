//! Built-in type effectiveness chart (generation 6 onward).
//!
//! The chart is stored the way the rules engine stores it: per defending
//! type, a damage-taken code for each attacking type.
//!
//! | Code | Meaning | Multiplier |
//! |---|---|---|
//! | 0 | neutral (also unknown) | 1 |
//! | 1 | super-effective | 2 |
//! | 2 | resisted | 0.5 |
//! | 3 | immune | 0 |

use roboko_types::PokemonType;

/// Effectiveness of one attacking type against one defending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effectiveness {
    /// Normal damage.
    Neutral,
    /// Double damage.
    SuperEffective,
    /// Half damage.
    Resisted,
    /// No damage.
    Immune,
}

impl Effectiveness {
    /// Decode a damage-taken code. Unrecognized codes are neutral.
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::SuperEffective,
            2 => Self::Resisted,
            3 => Self::Immune,
            _ => Self::Neutral,
        }
    }

    /// Damage-taken code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Neutral => 0,
            Self::SuperEffective => 1,
            Self::Resisted => 2,
            Self::Immune => 3,
        }
    }

    /// Damage multiplier.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Neutral => 1.0,
            Self::SuperEffective => 2.0,
            Self::Resisted => 0.5,
            Self::Immune => 0.0,
        }
    }
}

/// Damage-taken code for `defending` when hit by `attacking`.
pub fn damage_taken(defending: PokemonType, attacking: PokemonType) -> u8 {
    use PokemonType::{
        Bug, Dark, Dragon, Electric, Fairy, Fighting, Fire, Flying, Ghost, Grass, Ground, Ice,
        Normal, Poison, Psychic, Rock, Steel, Unknown, Water,
    };

    let (weak, resist, immune): (&[PokemonType], &[PokemonType], &[PokemonType]) = match defending {
        Normal => (&[Fighting], &[], &[Ghost]),
        Fire => (
            &[Water, Ground, Rock],
            &[Fire, Grass, Ice, Bug, Steel, Fairy],
            &[],
        ),
        Water => (&[Electric, Grass], &[Fire, Water, Ice, Steel], &[]),
        Electric => (&[Ground], &[Electric, Flying, Steel], &[]),
        Grass => (
            &[Fire, Ice, Poison, Flying, Bug],
            &[Water, Electric, Grass, Ground],
            &[],
        ),
        Ice => (&[Fire, Fighting, Rock, Steel], &[Ice], &[]),
        Fighting => (&[Flying, Psychic, Fairy], &[Bug, Rock, Dark], &[]),
        Poison => (&[Ground, Psychic], &[Grass, Fighting, Poison, Bug, Fairy], &[]),
        Ground => (&[Water, Grass, Ice], &[Poison, Rock], &[Electric]),
        Flying => (&[Electric, Ice, Rock], &[Grass, Fighting, Bug], &[Ground]),
        Psychic => (&[Bug, Ghost, Dark], &[Fighting, Psychic], &[]),
        Bug => (&[Fire, Flying, Rock], &[Grass, Fighting, Ground], &[]),
        Rock => (
            &[Water, Grass, Fighting, Ground, Steel],
            &[Normal, Fire, Poison, Flying],
            &[],
        ),
        Ghost => (&[Ghost, Dark], &[Poison, Bug], &[Normal, Fighting]),
        Dragon => (&[Ice, Dragon, Fairy], &[Fire, Water, Electric, Grass], &[]),
        Dark => (&[Fighting, Bug, Fairy], &[Ghost, Dark], &[Psychic]),
        Steel => (
            &[Fire, Fighting, Ground],
            &[Normal, Grass, Ice, Flying, Psychic, Bug, Rock, Dragon, Steel, Fairy],
            &[Poison],
        ),
        Fairy => (&[Poison, Steel], &[Fighting, Bug, Dark], &[Dragon]),
        Unknown => (&[], &[], &[]),
    };

    if immune.contains(&attacking) {
        Effectiveness::Immune.code()
    } else if weak.contains(&attacking) {
        Effectiveness::SuperEffective.code()
    } else if resist.contains(&attacking) {
        Effectiveness::Resisted.code()
    } else {
        Effectiveness::Neutral.code()
    }
}

/// Effectiveness of `attacking` against `defending`.
pub fn effectiveness(attacking: PokemonType, defending: PokemonType) -> Effectiveness {
    Effectiveness::from_code(damage_taken(defending, attacking))
}
