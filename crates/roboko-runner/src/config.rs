//! Configuration for the runner.
//!
//! Everything the runner needs is loaded from environment variables. Agent
//! tuning lives in an optional YAML file whose path is one of them.

use std::path::PathBuf;

use roboko_agent::AgentConfig;
use roboko_dex::DexData;
use roboko_types::Side;

use crate::error::RunnerError;

/// Default location of the reference data file.
const DEFAULT_DEX_PATH: &str = "data/dex.json";

/// Complete runner configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Side this process plays.
    pub side: Side,
    /// Path to the JSON reference data.
    pub dex_path: PathBuf,
    /// Path to the agent YAML config, if any.
    pub config_path: Option<PathBuf>,
    /// Emit logs as JSON instead of human-readable text.
    pub log_json: bool,
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `ROBOKO_SIDE` -- `p1` or `p2`
    ///
    /// Optional variables:
    /// - `ROBOKO_DEX_PATH` -- reference data file (default `data/dex.json`)
    /// - `ROBOKO_CONFIG_PATH` -- agent YAML config (default: built-in defaults)
    /// - `ROBOKO_LOG_JSON` -- `true` for JSON logs (default `false`)
    ///
    /// `ROBOKO_SEED` is read by [`AgentConfig::apply_env_overrides`].
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunnerError> {
        let side = env_var(&lookup, "ROBOKO_SIDE")?
            .parse::<Side>()
            .map_err(|e| RunnerError::Config(format!("invalid ROBOKO_SIDE: {e}")))?;

        let dex_path = lookup("ROBOKO_DEX_PATH").unwrap_or_else(|| DEFAULT_DEX_PATH.to_owned());
        let config_path = lookup("ROBOKO_CONFIG_PATH").filter(|p| !p.trim().is_empty());

        let log_json: bool = lookup("ROBOKO_LOG_JSON")
            .unwrap_or_else(|| "false".to_owned())
            .parse()
            .map_err(|e| RunnerError::Config(format!("invalid ROBOKO_LOG_JSON: {e}")))?;

        Ok(Self {
            side,
            dex_path: PathBuf::from(dex_path),
            config_path: config_path.map(PathBuf::from),
            log_json,
        })
    }

    /// Load the agent config from `config_path`, or start from defaults.
    /// Environment overrides apply either way.
    pub fn agent_config(&self) -> Result<AgentConfig, RunnerError> {
        match &self.config_path {
            Some(path) => Ok(AgentConfig::from_file(path)?),
            None => {
                let mut config = AgentConfig::default();
                config.apply_env_overrides()?;
                Ok(config)
            }
        }
    }

    /// Load the reference data named by `dex_path`.
    pub fn load_dex(&self) -> Result<DexData, RunnerError> {
        Ok(DexData::from_path(&self.dex_path)?)
    }
}

/// Read a required variable.
fn env_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, RunnerError> {
    lookup(name).ok_or_else(|| RunnerError::Config(format!("missing required env var {name}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_with_only_side() {
        let config = RunnerConfig::from_lookup(lookup(&[("ROBOKO_SIDE", "p2")])).unwrap();
        assert_eq!(config.side, Side::P2);
        assert_eq!(config.dex_path, PathBuf::from("data/dex.json"));
        assert_eq!(config.config_path, None);
        assert!(!config.log_json);
    }

    #[test]
    fn all_variables() {
        let config = RunnerConfig::from_lookup(lookup(&[
            ("ROBOKO_SIDE", "p1"),
            ("ROBOKO_DEX_PATH", "/srv/dex.json"),
            ("ROBOKO_CONFIG_PATH", "roboko.yaml"),
            ("ROBOKO_LOG_JSON", "true"),
        ]))
        .unwrap();
        assert_eq!(config.side, Side::P1);
        assert_eq!(config.dex_path, PathBuf::from("/srv/dex.json"));
        assert_eq!(config.config_path, Some(PathBuf::from("roboko.yaml")));
        assert!(config.log_json);
    }

    #[test]
    fn missing_or_bad_side_is_rejected() {
        assert!(matches!(RunnerConfig::from_lookup(lookup(&[])), Err(RunnerError::Config(_))));
        assert!(matches!(
            RunnerConfig::from_lookup(lookup(&[("ROBOKO_SIDE", "p3")])),
            Err(RunnerError::Config(_))
        ));
    }

    #[test]
    fn bad_log_flag_is_rejected() {
        let result = RunnerConfig::from_lookup(lookup(&[("ROBOKO_SIDE", "p1"), ("ROBOKO_LOG_JSON", "yes")]));
        assert!(matches!(result, Err(RunnerError::Config(_))));
    }
}
