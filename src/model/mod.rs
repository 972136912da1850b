pub mod frame;
pub mod live;
pub mod math;
pub mod pricing;
pub mod race;
pub mod season;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use frame::{combine_to_frame_probability, frame_probability, FrameProbability, RealismConfig};
pub use live::{live_boost, live_breakdown, LiveBreakdown, LiveStats, LiveWeights, SignalSet};
pub use pricing::{compare_value, fair_odds, ValueBand, ValueCheck};
pub use race::{match_win_probability, race_probability, race_target, MatchState};
pub use season::{season_strength, SeasonStats, SeasonWeights};

/// Every tunable of the model, shared by both players in an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    pub season: SeasonWeights,
    pub live: LiveWeights,
    pub realism: RealismConfig,
}

impl ModelParams {
    /// Load parameters from a JSON file. Omitted fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse model config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let params: ModelParams = serde_json::from_str(
            r#"{ "realism": { "shrink_lambda": 0.9 }, "live": { "weights": { "pot": 1.0 } } }"#,
        )
        .unwrap();
        assert_relative_eq!(params.realism.shrink_lambda, 0.9);
        assert!(params.realism.cap_enabled);
        assert_relative_eq!(params.live.weights.pot, 1.0);
        let defaults = LiveWeights::default();
        assert_relative_eq!(params.live.weights.shot_time, defaults.weights.shot_time);
        assert_relative_eq!(params.live.weights.table_share, defaults.weights.table_share);
        assert_eq!(params.live.sds, defaults.sds);
        assert_relative_eq!(params.live.k_shots, 150.0);
        assert_eq!(params.season, SeasonWeights::default());
    }

    #[test]
    fn empty_json_is_default() {
        let params: ModelParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, ModelParams::default());
    }
}
