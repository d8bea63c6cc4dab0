//! Search and self-play settings, loadable from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// MCTS knobs. Missing JSON fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsParams {
    pub simulations: usize,
    pub cpuct: f32,
    /// Plies a single simulation may descend before evaluating.
    pub max_depth: usize,
    pub dirichlet_alpha: f32,
    /// Root noise weight; 0 disables noise.
    pub dirichlet_epsilon: f32,
    /// Visit-count temperature; <= 0 picks the most visited move.
    pub temperature: f32,
}

impl Default for MctsParams {
    fn default() -> Self {
        Self {
            simulations: 800,
            cpuct: 2.5,
            max_depth: 20,
            dirichlet_alpha: 0.2,
            dirichlet_epsilon: 0.25,
            temperature: 1.0,
        }
    }
}

impl MctsParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulations == 0 {
            return Err(ConfigError::Invalid("simulations must be > 0".into()));
        }
        if !(self.cpuct > 0.0) {
            return Err(ConfigError::Invalid(format!("cpuct must be > 0, got {}", self.cpuct)));
        }
        if !(0.0..=1.0).contains(&self.dirichlet_epsilon) {
            return Err(ConfigError::Invalid(format!("dirichlet_epsilon must be in [0, 1], got {}", self.dirichlet_epsilon)));
        }
        if self.dirichlet_alpha < 0.0 {
            return Err(ConfigError::Invalid(format!("dirichlet_alpha must be >= 0, got {}", self.dirichlet_alpha)));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be > 0".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    Random,
    #[default]
    Rollout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    pub games: usize,
    pub seed: u64,
    /// Hard cap on plies per game.
    pub max_plies: usize,
    /// Plies played with the search temperature; greedy afterwards.
    pub temperature_moves: usize,
    pub evaluator: EvaluatorKind,
    pub mcts: MctsParams,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            games: 10,
            seed: 42,
            max_plies: 400,
            temperature_moves: 10,
            evaluator: EvaluatorKind::default(),
            mcts: MctsParams::default(),
        }
    }
}

impl SelfPlayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_plies == 0 {
            return Err(ConfigError::Invalid("max_plies must be > 0".into()));
        }
        self.mcts.validate()
    }
}

/// Load and validate a self-play config file.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<SelfPlayConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let cfg: SelfPlayConfig = serde_json::from_str(&text)?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_takes_defaults() {
        let cfg: SelfPlayConfig = serde_json::from_str(r#"{"games": 3, "mcts": {"simulations": 50}}"#).unwrap();
        assert_eq!(cfg.games, 3);
        assert_eq!(cfg.mcts.simulations, 50);
        assert_eq!(cfg.mcts.cpuct, 2.5);
        assert_eq!(cfg.evaluator, EvaluatorKind::Rollout);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut p = MctsParams::default();
        p.dirichlet_epsilon = 1.5;
        assert!(matches!(p.validate(), Err(ConfigError::Invalid(_))));
        p = MctsParams { simulations: 0, ..MctsParams::default() };
        assert!(p.validate().is_err());
    }
}
