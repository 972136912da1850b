//! Combination of season and live signals into a per-frame probability, with
//! the realism guards applied on top.

use serde::{Deserialize, Serialize};

use super::math::{clamp, inv_logit};

/// Dampening applied to the raw model probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealismConfig {
    /// λ in [0, 1]: 1 keeps the raw probability, 0 forces 0.5.
    pub shrink_lambda: f64,
    pub cap_enabled: bool,
    /// Lower cap, clamped into [0, 0.5] before use.
    pub cap_min: f64,
    /// Upper cap, clamped into [0.5, 1] before use.
    pub cap_max: f64,
}

impl Default for RealismConfig {
    fn default() -> Self {
        RealismConfig {
            shrink_lambda: 0.70,
            cap_enabled: true,
            cap_min: 0.45,
            cap_max: 0.66,
        }
    }
}

impl RealismConfig {
    /// Effective cap interval, or `None` when capping is off.
    pub fn cap_bounds(&self) -> Option<(f64, f64)> {
        if !self.cap_enabled {
            return None;
        }
        let lo = clamp(self.cap_min, 0.0, 0.5);
        let hi = clamp(self.cap_max, 0.5, 1.0);
        if lo > hi {
            Some((hi, lo))
        } else {
            Some((lo, hi))
        }
    }

    /// Pull `p` toward 0.5 by λ, then cap it.
    pub fn apply(&self, p: f64) -> f64 {
        let lambda = clamp(self.shrink_lambda, 0.0, 1.0);
        let shrunk = 0.5 + lambda * (p - 0.5);
        match self.cap_bounds() {
            Some((lo, hi)) => clamp(shrunk, lo, hi),
            None => shrunk,
        }
    }
}

/// Every stage of the per-frame probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameProbability {
    /// `season_a - season_b + boost`
    pub logit: f64,
    pub raw: f64,
    /// After the λ shrink, before the cap.
    pub shrunk: f64,
    /// Value fed to the race model.
    pub value: f64,
}

/// Per-frame win probability for player A.
pub fn combine_to_frame_probability(
    season_a: f64,
    season_b: f64,
    boost: f64,
    realism: &RealismConfig,
) -> f64 {
    frame_probability(season_a, season_b, boost, realism).value
}

/// Same as [`combine_to_frame_probability`] but keeps the intermediate stages.
pub fn frame_probability(
    season_a: f64,
    season_b: f64,
    boost: f64,
    realism: &RealismConfig,
) -> FrameProbability {
    let logit = season_a - season_b + boost;
    let raw = inv_logit(logit);
    let shrunk = RealismConfig {
        cap_enabled: false,
        ..*realism
    }
    .apply(raw);

    FrameProbability {
        logit,
        raw,
        shrunk,
        value: realism.apply(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn uncapped(lambda: f64) -> RealismConfig {
        RealismConfig {
            shrink_lambda: lambda,
            cap_enabled: false,
            ..RealismConfig::default()
        }
    }

    #[test]
    fn lambda_zero_forces_even_odds() {
        for (sa, sb, boost) in [(3.0, -2.0, 1.5), (-10.0, 4.0, -2.0), (0.0, 0.0, 0.0)] {
            let p = combine_to_frame_probability(sa, sb, boost, &uncapped(0.0));
            assert_eq!(p, 0.5);
            let capped = RealismConfig {
                shrink_lambda: 0.0,
                ..RealismConfig::default()
            };
            assert_eq!(combine_to_frame_probability(sa, sb, boost, &capped), 0.5);
        }
    }

    #[test]
    fn lambda_one_is_identity() {
        let p = combine_to_frame_probability(0.8, 0.2, 0.1, &uncapped(1.0));
        assert_relative_eq!(p, inv_logit(0.7), epsilon = 1e-12);
    }

    #[test]
    fn shrink_moves_toward_half() {
        let stages = frame_probability(1.2, 0.0, 0.0, &uncapped(0.7));
        assert!(stages.raw > stages.shrunk);
        assert!(stages.shrunk > 0.5);
        assert_relative_eq!(stages.shrunk, 0.5 + 0.7 * (stages.raw - 0.5), epsilon = 1e-12);
    }

    #[test]
    fn lambda_outside_unit_interval_is_clamped() {
        let over = combine_to_frame_probability(1.0, 0.0, 0.0, &uncapped(4.0));
        assert_relative_eq!(over, inv_logit(1.0), epsilon = 1e-12);
        let under = combine_to_frame_probability(1.0, 0.0, 0.0, &uncapped(-1.0));
        assert_eq!(under, 0.5);
    }

    #[test]
    fn capped_result_stays_inside_interval() {
        let realism = RealismConfig::default();
        for logit in [-40.0, -5.0, -0.3, 0.0, 0.3, 5.0, 40.0] {
            let p = combine_to_frame_probability(logit, 0.0, 0.0, &realism);
            assert!((0.45..=0.66).contains(&p), "p={p} for logit {logit}");
        }
    }

    #[test]
    fn cap_bounds_are_clamped_into_valid_halves() {
        let realism = RealismConfig {
            cap_min: 0.7,
            cap_max: 0.2,
            ..RealismConfig::default()
        };
        // 0.7 -> 0.5 and 0.2 -> 0.5
        assert_eq!(realism.cap_bounds(), Some((0.5, 0.5)));

        let wide = RealismConfig {
            cap_min: -1.0,
            cap_max: 2.0,
            ..RealismConfig::default()
        };
        assert_eq!(wide.cap_bounds(), Some((0.0, 1.0)));
    }

    #[test]
    fn disabled_cap_has_no_bounds() {
        assert_eq!(uncapped(0.7).cap_bounds(), None);
    }

    #[test]
    fn uncapped_output_stays_strictly_inside_unit_interval() {
        let realism = uncapped(0.7);
        let hi = combine_to_frame_probability(1e6, 0.0, 0.0, &realism);
        let lo = combine_to_frame_probability(-1e6, 0.0, 0.0, &realism);
        assert!(hi < 1.0 && hi > 0.5);
        assert!(lo > 0.0 && lo < 0.5);
    }
}
