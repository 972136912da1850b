//! Pre-match "season strength" index.
//!
//! Each signal is centred on a soft league-average baseline and expressed as a
//! fractional deviation from it, then weighted and scaled. The index has no
//! fixed bound: only the difference between two players' indices matters, and
//! that difference is used directly as a logit-space term.

use serde::{Deserialize, Serialize};

// ── League-average baselines ─────────────────────────────────────────────────

/// Points scored per match by an average tour player.
const POINTS_PER_MATCH_BASELINE: f64 = 300.0;
/// 50+ breaks per match.
const FIFTY_RATE_BASELINE: f64 = 1.0;
/// 100+ breaks per match.
const HUNDRED_RATE_BASELINE: f64 = 0.15;
/// Average shot time in seconds.
const SHOT_TIME_BASELINE: f64 = 30.0;

/// Denominator floors for the break-rate deviations. Keeps a small baseline
/// from turning a handful of breaks into a huge relative deviation.
const FIFTY_RATE_FLOOR: f64 = 0.3;
const HUNDRED_RATE_FLOOR: f64 = 0.05;

/// Cumulative season statistics for one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub points_scored: f64,
    /// Rounded and floored at 1 before any per-match rate is taken.
    pub matches_played: f64,
    /// Match win rate in percent.
    pub win_rate: f64,
    /// Average shot time in seconds.
    pub avg_shot_time: f64,
    pub fifties: f64,
    pub centuries: f64,
}

/// Weights of the five season signals plus a global scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonWeights {
    pub win_rate: f64,
    pub points_per_match: f64,
    pub fifty_rate: f64,
    pub hundred_rate: f64,
    /// Faster than the baseline shot time counts positively.
    pub shot_speed: f64,
    pub scale: f64,
}

impl Default for SeasonWeights {
    fn default() -> Self {
        SeasonWeights {
            win_rate: 0.82,
            points_per_match: 0.70,
            fifty_rate: 0.60,
            hundred_rate: 0.40,
            shot_speed: 0.46,
            scale: 0.72,
        }
    }
}

/// Season strength index for one player.
pub fn season_strength(stats: &SeasonStats, weights: &SeasonWeights) -> f64 {
    let matches = effective_matches(stats.matches_played);
    let points_per_match = stats.points_scored / matches;
    let fifty_rate = stats.fifties / matches;
    let hundred_rate = stats.centuries / matches;

    let index = weights.win_rate * (stats.win_rate / 100.0 - 0.5)
        + weights.points_per_match
            * relative_deviation(points_per_match, POINTS_PER_MATCH_BASELINE, 0.0)
        + weights.fifty_rate * relative_deviation(fifty_rate, FIFTY_RATE_BASELINE, FIFTY_RATE_FLOOR)
        + weights.hundred_rate
            * relative_deviation(hundred_rate, HUNDRED_RATE_BASELINE, HUNDRED_RATE_FLOOR)
        + weights.shot_speed * (SHOT_TIME_BASELINE - stats.avg_shot_time) / SHOT_TIME_BASELINE;

    weights.scale * index
}

/// Matches played as a whole number of at least one.
fn effective_matches(matches_played: f64) -> f64 {
    matches_played.round().max(1.0)
}

/// `(value - baseline) / max(floor, baseline)`
fn relative_deviation(value: f64, baseline: f64, floor: f64) -> f64 {
    (value - baseline) / baseline.max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn league_average() -> SeasonStats {
        SeasonStats {
            points_scored: 3000.0,
            matches_played: 10.0,
            win_rate: 50.0,
            avg_shot_time: 30.0,
            fifties: 10.0,
            centuries: 1.5,
        }
    }

    fn strong_player() -> SeasonStats {
        SeasonStats {
            points_scored: 3000.0,
            matches_played: 10.0,
            win_rate: 60.0,
            avg_shot_time: 25.0,
            fifties: 20.0,
            centuries: 5.0,
        }
    }

    fn weaker_player() -> SeasonStats {
        SeasonStats {
            points_scored: 2500.0,
            matches_played: 10.0,
            win_rate: 45.0,
            avg_shot_time: 32.0,
            fifties: 12.0,
            centuries: 2.0,
        }
    }

    #[test]
    fn league_average_player_scores_zero() {
        let s = season_strength(&league_average(), &SeasonWeights::default());
        assert_relative_eq!(s, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn strong_player_outscores_weaker_player() {
        let w = SeasonWeights::default();
        let a = season_strength(&strong_player(), &w);
        let b = season_strength(&weaker_player(), &w);
        assert!(a > b, "expected {a:.4} > {b:.4}");
        // 0.72 * (0.082 + 0 + 0.6 + 0.4 * 7/3 + 0.46 / 6)
        assert_relative_eq!(a, 1.21824, epsilon = 1e-4);
    }

    #[test]
    fn zero_matches_is_treated_as_one() {
        let w = SeasonWeights::default();
        let mut zero = league_average();
        zero.matches_played = 0.0;
        zero.points_scored = 300.0;
        zero.fifties = 1.0;
        zero.centuries = 0.15;
        assert!(season_strength(&zero, &w).is_finite());
        assert_relative_eq!(season_strength(&zero, &w), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn fractional_matches_are_rounded() {
        let w = SeasonWeights::default();
        let mut rounded = league_average();
        rounded.matches_played = 9.6;
        assert_relative_eq!(
            season_strength(&rounded, &w),
            season_strength(&league_average(), &w),
            epsilon = 1e-12
        );
    }

    #[test]
    fn faster_shot_time_contributes_positively() {
        let w = SeasonWeights {
            win_rate: 0.0,
            points_per_match: 0.0,
            fifty_rate: 0.0,
            hundred_rate: 0.0,
            shot_speed: 1.0,
            scale: 1.0,
        };
        let mut fast = league_average();
        fast.avg_shot_time = 24.0;
        let mut slow = league_average();
        slow.avg_shot_time = 36.0;
        assert_relative_eq!(season_strength(&fast, &w), 0.2, epsilon = 1e-12);
        assert_relative_eq!(season_strength(&slow, &w), -0.2, epsilon = 1e-12);
    }

    #[test]
    fn scale_multiplies_whole_index() {
        let base = SeasonWeights::default();
        let doubled = SeasonWeights {
            scale: base.scale * 2.0,
            ..base
        };
        let s1 = season_strength(&strong_player(), &base);
        let s2 = season_strength(&strong_player(), &doubled);
        assert_relative_eq!(s2, 2.0 * s1, epsilon = 1e-12);
    }

    #[test]
    fn relative_deviation_respects_floor() {
        assert_relative_eq!(relative_deviation(0.2, 0.15, 0.05), 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(relative_deviation(0.2, 0.01, 0.05), 3.8, epsilon = 1e-12);
    }
}
