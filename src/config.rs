//! Pipeline configuration: reading, pruning and community detection knobs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Thresholds and tuning parameters for one pipeline run.
///
/// Keys are camelCase so that a JSON config file uses the same option names
/// as the command line (`minFreq`, `simThreshold`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkConfig {
    pub min_freq: u64,
    pub sim_threshold: f64,
    pub degree_threshold: f64,
    /// Names with a rank at or below this value are exempt from degree pruning.
    pub rank_threshold: u32,
    /// Multiplier applied to edge weights touching a name ranked above `rank_threshold`.
    pub bonus_multiplier: f64,
    pub resolution: f64,
    /// Seed for the Louvain node visiting order; `None` visits in index order.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            min_freq: 10,
            sim_threshold: 0.2,
            degree_threshold: 1.0,
            rank_threshold: 100,
            bonus_multiplier: 1.2,
            resolution: 1.0,
            seed: None,
        }
    }
}

impl NetworkConfig {
    /// Load a config from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Reject values that would make pruning or partitioning meaningless.
    pub fn validate(&self) -> Result<()> {
        non_negative("simThreshold", self.sim_threshold)?;
        non_negative("degreeThreshold", self.degree_threshold)?;
        positive("bonusMultiplier", self.bonus_multiplier)?;
        positive("resolution", self.resolution)?;
        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(NetworkError::InvalidParameter {
            name,
            message: format!("expected a finite value >= 0, got {value}"),
        });
    }
    Ok(())
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(NetworkError::InvalidParameter {
            name,
            message: format!("expected a finite value > 0, got {value}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_command_line_defaults() {
        let config = NetworkConfig::default();
        assert_eq!(config.min_freq, 10);
        assert_eq!(config.sim_threshold, 0.2);
        assert_eq!(config.degree_threshold, 1.0);
        assert_eq!(config.rank_threshold, 100);
        assert_eq!(config.bonus_multiplier, 1.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: NetworkConfig =
            serde_json::from_str(r#"{"minFreq": 3, "simThreshold": 0.5}"#).unwrap();
        assert_eq!(config.min_freq, 3);
        assert_eq!(config.sim_threshold, 0.5);
        assert_eq!(config.rank_threshold, 100);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn rejects_non_positive_bonus() {
        let config = NetworkConfig {
            bonus_multiplier: 0.0,
            ..NetworkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(NetworkError::InvalidParameter { name: "bonusMultiplier", .. })
        ));
    }

    #[test]
    fn rejects_nan_threshold() {
        let config = NetworkConfig {
            sim_threshold: f64::NAN,
            ..NetworkConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
