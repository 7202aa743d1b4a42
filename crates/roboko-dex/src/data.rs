//! JSON-backed reference data.
//!
//! The data file is a single JSON object with two maps keyed by name or
//! ID:
//!
//! ```json
//! {
//!   "species": {"garchomp": {"name": "Garchomp", "types": ["Dragon", "Ground"],
//!                "baseStats": {"hp": 108, "atk": 130, "def": 95, "spa": 80, "spd": 85, "spe": 102}}},
//!   "moves": {"earthquake": {"name": "Earthquake", "category": "Physical", "type": "Ground",
//!             "basePower": 100, "target": "allAdjacent"}}
//! }
//! ```
//!
//! Keys are re-normalized on load, so `"Rotom-Wash"` and `"rotomwash"`
//! both work.

use std::collections::HashMap;
use std::path::Path;

use roboko_types::{MoveCategory, MoveTarget, PokemonType};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DexError;
use crate::{Dex, to_id};

/// Base stat block of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseStats {
    /// Hit points.
    pub hp: u16,
    /// Attack.
    pub atk: u16,
    /// Defense.
    pub def: u16,
    /// Special Attack.
    pub spa: u16,
    /// Special Defense.
    pub spd: u16,
    /// Speed.
    pub spe: u16,
}

impl BaseStats {
    /// Offensive stat used by a move of `category`. Status moves have none.
    pub const fn offense(&self, category: MoveCategory) -> Option<u16> {
        match category {
            MoveCategory::Physical => Some(self.atk),
            MoveCategory::Special => Some(self.spa),
            MoveCategory::Status => None,
        }
    }

    /// Defensive stat that soaks a hit of `category`.
    pub const fn defense(&self, category: MoveCategory) -> Option<u16> {
        match category {
            MoveCategory::Physical => Some(self.def),
            MoveCategory::Special => Some(self.spd),
            MoveCategory::Status => None,
        }
    }
}

/// Species record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    /// Display name.
    pub name: String,
    /// One or two elemental types.
    pub types: Vec<PokemonType>,
    /// Base stats.
    pub base_stats: BaseStats,
}

impl Species {
    /// Build a species record.
    pub fn new(name: impl Into<String>, types: &[PokemonType], base_stats: BaseStats) -> Self {
        Self {
            name: name.into(),
            types: types.to_vec(),
            base_stats,
        }
    }

    /// Whether the species has the given type.
    pub fn has_type(&self, t: PokemonType) -> bool {
        self.types.contains(&t)
    }
}

/// Move record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveData {
    /// Display name.
    pub name: String,
    /// Damage category.
    pub category: MoveCategory,
    /// Elemental type.
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    /// Listed base power; `0` for status moves and variable-power moves.
    #[serde(default)]
    pub base_power: u16,
    /// Target tag.
    #[serde(default)]
    pub target: MoveTarget,
    /// Stat the defender uses, when it differs from `category`.
    #[serde(default)]
    pub defensive_category: Option<MoveCategory>,
}

impl MoveData {
    /// Build a move record whose defensive category matches its category.
    pub fn new(
        name: impl Into<String>,
        category: MoveCategory,
        move_type: PokemonType,
        base_power: u16,
        target: MoveTarget,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            move_type,
            base_power,
            target,
            defensive_category: None,
        }
    }

    /// Override the defending stat category.
    #[must_use]
    pub const fn with_defensive_category(mut self, category: MoveCategory) -> Self {
        self.defensive_category = Some(category);
        self
    }

    /// Category the defender resists with.
    pub fn defensive_category(&self) -> MoveCategory {
        self.defensive_category.unwrap_or(self.category)
    }

    /// Whether the move deals direct damage.
    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status
    }
}

/// Raw file shape before key normalization.
#[derive(Debug, Default, Deserialize)]
struct RawDex {
    #[serde(default)]
    species: HashMap<String, Species>,
    #[serde(default)]
    moves: HashMap<String, MoveData>,
}

/// In-memory reference data keyed by normalized ID.
#[derive(Debug, Clone, Default)]
pub struct DexData {
    species: HashMap<String, Species>,
    moves: HashMap<String, MoveData>,
}

impl DexData {
    /// An empty dex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse reference data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Json`] if the document does not match the
    /// schema.
    pub fn from_json(json: &str) -> Result<Self, DexError> {
        let raw: RawDex = serde_json::from_str(json)?;
        let mut dex = Self::new();
        for (key, species) in raw.species {
            dex.species.insert(to_id(&key), species);
        }
        for (key, data) in raw.moves {
            dex.moves.insert(to_id(&key), data);
        }
        Ok(dex)
    }

    /// Load reference data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Io`] if the file cannot be read, or
    /// [`DexError::Json`] if its content is invalid.
    pub fn from_path(path: &Path) -> Result<Self, DexError> {
        let contents = std::fs::read_to_string(path)?;
        let dex = Self::from_json(&contents)?;
        info!(
            path = %path.display(),
            species = dex.species.len(),
            moves = dex.moves.len(),
            "reference data loaded"
        );
        Ok(dex)
    }

    /// Add or replace a species, keyed by its normalized name.
    pub fn insert_species(&mut self, species: Species) {
        self.species.insert(to_id(&species.name), species);
    }

    /// Add or replace a move, keyed by its normalized name.
    pub fn insert_move(&mut self, data: MoveData) {
        self.moves.insert(to_id(&data.name), data);
    }

    /// Builder form of [`DexData::insert_species`].
    #[must_use]
    pub fn with_species(mut self, species: Species) -> Self {
        self.insert_species(species);
        self
    }

    /// Builder form of [`DexData::insert_move`].
    #[must_use]
    pub fn with_move(mut self, data: MoveData) -> Self {
        self.insert_move(data);
        self
    }

    /// Number of species records.
    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Number of move records.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

impl Dex for DexData {
    fn species(&self, name: &str) -> Option<&Species> {
        self.species.get(&to_id(name))
    }

    fn move_data(&self, name: &str) -> Option<&MoveData> {
        self.moves.get(&to_id(name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "species": {
            "Rotom-Wash": {"name": "Rotom-Wash", "types": ["Electric", "Water"],
                "baseStats": {"hp": 50, "atk": 65, "def": 107, "spa": 105, "spd": 107, "spe": 86}}
        },
        "moves": {
            "psyshock": {"name": "Psyshock", "category": "Special", "type": "Psychic",
                "basePower": 80, "target": "normal", "defensiveCategory": "Physical"},
            "protect": {"name": "Protect", "category": "Status", "type": "Normal", "target": "self"}
        }
    }"#;

    #[test]
    fn loads_and_normalizes_keys() {
        let dex = DexData::from_json(SAMPLE).unwrap();
        assert_eq!(dex.species_count(), 1);
        assert_eq!(dex.move_count(), 2);
        let rotom = dex.species("rotomwash").unwrap();
        assert_eq!(rotom.types, vec![PokemonType::Electric, PokemonType::Water]);
        assert!(dex.species("Rotom-Wash").is_some());
        assert!(dex.species("Garchomp").is_none());
    }

    #[test]
    fn defensive_category_override() {
        let dex = DexData::from_json(SAMPLE).unwrap();
        let psyshock = dex.move_data("Psyshock").unwrap();
        assert_eq!(psyshock.category, MoveCategory::Special);
        assert_eq!(psyshock.defensive_category(), MoveCategory::Physical);

        let protect = dex.move_data("protect").unwrap();
        assert_eq!(protect.base_power, 0);
        assert_eq!(protect.defensive_category(), MoveCategory::Status);
        assert!(!protect.is_damaging());
        assert_eq!(protect.target, MoveTarget::SelfTarget);
    }

    #[test]
    fn builder_inserts_by_normalized_name() {
        let dex = DexData::new()
            .with_species(Species::new("Mr. Mime", &[PokemonType::Psychic, PokemonType::Fairy], BaseStats::default()))
            .with_move(MoveData::new("U-turn", MoveCategory::Physical, PokemonType::Bug, 70, MoveTarget::Normal));
        assert!(dex.species("mrmime").is_some());
        assert!(dex.move_data("uturn").is_some());
    }

    #[test]
    fn stat_selection_by_category() {
        let stats = BaseStats { hp: 1, atk: 2, def: 3, spa: 4, spd: 5, spe: 6 };
        assert_eq!(stats.offense(MoveCategory::Physical), Some(2));
        assert_eq!(stats.offense(MoveCategory::Special), Some(4));
        assert_eq!(stats.defense(MoveCategory::Physical), Some(3));
        assert_eq!(stats.defense(MoveCategory::Special), Some(5));
        assert_eq!(stats.offense(MoveCategory::Status), None);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(DexData::from_json("{"), Err(DexError::Json { .. })));
    }
}
