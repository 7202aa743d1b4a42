//! Reference data gateway for the Roboko battle agent.
//!
//! Species stats and types, move stats, and the type chart are read-only
//! inputs to scoring. Everything is keyed by a normalized identifier (see
//! [`to_id`]), so callers may pass display names straight from the event
//! stream.
//!
//! # Modules
//!
//! - [`data`] -- JSON-backed [`DexData`] and its record types
//! - [`error`] -- Loading errors ([`DexError`])
//! - [`typechart`] -- Built-in eighteen-type effectiveness chart

pub mod data;
pub mod error;
pub mod typechart;

pub use data::{BaseStats, DexData, MoveData, Species};
pub use error::DexError;
pub use typechart::Effectiveness;

use roboko_types::PokemonType;

/// Normalize a display name into a lookup key: lowercase ASCII
/// alphanumerics only (`"Rotom-Wash"` becomes `"rotomwash"`).
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Read-only lookups over reference data.
///
/// The decision core only ever talks to this trait, so a test can hand it
/// a tiny in-memory dex and production can load a full data file.
pub trait Dex {
    /// Species record by name or ID.
    fn species(&self, name: &str) -> Option<&Species>;

    /// Move record by name or ID.
    fn move_data(&self, name: &str) -> Option<&MoveData>;

    /// How effective an attacking type is against one defending type.
    fn effectiveness(&self, attacking: PokemonType, defending: PokemonType) -> Effectiveness {
        typechart::effectiveness(attacking, defending)
    }
}

impl<T: Dex + ?Sized> Dex for &T {
    fn species(&self, name: &str) -> Option<&Species> {
        (**self).species(name)
    }

    fn move_data(&self, name: &str) -> Option<&MoveData> {
        (**self).move_data(name)
    }

    fn effectiveness(&self, attacking: PokemonType, defending: PokemonType) -> Effectiveness {
        (**self).effectiveness(attacking, defending)
    }
}

impl<T: Dex + ?Sized> Dex for std::sync::Arc<T> {
    fn species(&self, name: &str) -> Option<&Species> {
        (**self).species(name)
    }

    fn move_data(&self, name: &str) -> Option<&MoveData> {
        (**self).move_data(name)
    }

    fn effectiveness(&self, attacking: PokemonType, defending: PokemonType) -> Effectiveness {
        (**self).effectiveness(attacking, defending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_id_strips_punctuation_and_case() {
        assert_eq!(to_id("Rotom-Wash"), "rotomwash");
        assert_eq!(to_id("Farfetch’d"), "farfetchd");
        assert_eq!(to_id("U-turn"), "uturn");
        assert_eq!(to_id("  Mr. Mime "), "mrmime");
        assert_eq!(to_id(""), "");
    }
}
