//! Agent configuration.
//!
//! Loaded from YAML; every field has a default, so an empty document is a
//! valid configuration. `ROBOKO_SEED` overrides the seed from the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level agent configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Seed for the agent's random generator. `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Scoring constants.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

/// Constants used by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Flat score for non-damaging moves.
    pub status_move_score: f64,
    /// Base power assumed for damaging moves listed at zero power.
    pub fallback_base_power: u16,
    /// Multiplier when the attacker shares the move's type.
    pub stab_multiplier: f64,
    /// Divisor applied to switch matchup products.
    pub switch_divisor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            status_move_score: 0.5,
            fallback_base_power: 60,
            stab_multiplier: 1.5,
            switch_divisor: 4.0,
        }
    }
}

impl AgentConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `ROBOKO_SEED` if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if the value is not a `u64`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(raw) = std::env::var("ROBOKO_SEED") {
            let seed = raw.trim().parse().map_err(|_parse| ConfigError::InvalidEnv {
                name: "ROBOKO_SEED",
                value: raw.clone(),
            })?;
            self.seed = Some(seed);
        }
        Ok(())
    }

    /// Builder: fix the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AgentConfig::parse("").unwrap();
        assert_eq!(config, AgentConfig::default());
        assert!((config.scoring.switch_divisor - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.scoring.fallback_base_power, 60);
    }

    #[test]
    fn partial_scoring_section_keeps_other_defaults() {
        let yaml = "seed: 42\nscoring:\n  status_move_score: 0.8\n";
        let config = AgentConfig::parse(yaml).unwrap();
        assert_eq!(config.seed, Some(42));
        assert!((config.scoring.status_move_score - 0.8).abs() < f64::EPSILON);
        assert!((config.scoring.stab_multiplier - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        assert!(matches!(
            AgentConfig::parse("seed: [not a number"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let config = AgentConfig::parse(include_str!("../../../roboko.yaml")).unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn with_seed_sets_seed() {
        assert_eq!(AgentConfig::default().with_seed(7).seed, Some(7));
    }
}
