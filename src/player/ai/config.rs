use super::eval::EvalWeights;
use anyhow::{ensure, Context};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_PATH: &str = "ai_config.json";

static CONFIG: Lazy<AIConfig> = Lazy::new(AIConfig::load_or_default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AIConfig {
    pub version: String,
    pub search: SearchConfig,
    pub evaluation: EvaluationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched by minimax, counting the root move.
    pub minimax_depth: usize,
    pub expectimax_depth: usize,
    pub mcts_iterations: usize,
    pub exploration_weight: f64,
    /// Chance that the modelled opponent plays a weighted-random reply.
    pub opponent_randomness: f64,
    /// UCT bonus per unit of normalised square weight. 0 disables it.
    pub position_bonus: f64,
    pub expectimax_samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub minimax: EvalWeights,
    pub expectimax: EvalWeights,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            search: SearchConfig::default(),
            evaluation: EvaluationConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            minimax_depth: 5,
            expectimax_depth: 5,
            mcts_iterations: 1000,
            exploration_weight: 1.4,
            opponent_randomness: 0.3,
            position_bonus: 0.0,
            expectimax_samples: 1,
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            minimax: EvalWeights::blended(),
            expectimax: EvalWeights::stability(),
        }
    }
}

impl AIConfig {
    /// Process-wide config, read from `ai_config.json` on first use.
    pub fn get() -> &'static AIConfig {
        &CONFIG
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: AIConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                if Path::new(CONFIG_PATH).exists() {
                    log::warn!("ignoring {}: {:#}", CONFIG_PATH, e);
                }
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let s = &self.search;
        ensure!(s.minimax_depth >= 1, "minimax_depth must be at least 1");
        ensure!(s.expectimax_depth >= 1, "expectimax_depth must be at least 1");
        ensure!(s.expectimax_samples >= 1, "expectimax_samples must be at least 1");
        ensure!(
            (0.0..=1.0).contains(&s.opponent_randomness),
            "opponent_randomness must be in [0, 1], got {}",
            s.opponent_randomness
        );
        ensure!(
            s.exploration_weight.is_finite() && s.exploration_weight >= 0.0,
            "exploration_weight must be a non-negative number"
        );
        ensure!(
            s.position_bonus.is_finite(),
            "position_bonus must be finite"
        );
        Ok(())
    }
}
