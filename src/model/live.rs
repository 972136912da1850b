//! In-play "live boost": a bounded logit-space adjustment built from snapshot
//! match statistics of both players.
//!
//! Every signal is a directional difference (or a re-centred share) between
//! player A and player B, converted to a z-score against its own standard
//! deviation and clamped to ±3. The weighted sum is then scaled by a
//! reliability weight that ramps linearly from 0 (no shots played) to 1
//! (`k_shots` or more), so early-match noise barely moves the price.

use serde::{Deserialize, Deserializer, Serialize};

use super::math::clamp;

/// Any single z-score is clamped to ±this many standard deviations.
const Z_LIMIT: f64 = 3.0;
/// Floor applied to standard deviations.
const SD_FLOOR: f64 = 1e-9;

/// Snapshot in-play statistics for one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveStats {
    /// Pot success rate in percent.
    pub pot_rate: f64,
    /// Average shot time in seconds.
    pub avg_shot_time: f64,
    pub fifties: f64,
    pub centuries: f64,
    pub highest_break: f64,
    /// Cumulative points scored in the match.
    pub points: f64,
    pub shots: f64,
    /// Time on table in percent.
    pub table_time: f64,
}

/// One value per live signal. Used for weights, standard deviations and the
/// per-signal z-scores alike.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalSet {
    pub pot: f64,
    pub shot_time: f64,
    pub fifties: f64,
    pub hundreds: f64,
    pub high_break: f64,
    pub points_share: f64,
    pub shots_share: f64,
    pub table_share: f64,
}

impl SignalSet {
    fn dot(&self, other: &SignalSet) -> f64 {
        self.pot * other.pot
            + self.shot_time * other.shot_time
            + self.fifties * other.fifties
            + self.hundreds * other.hundreds
            + self.high_break * other.high_break
            + self.points_share * other.points_share
            + self.shots_share * other.shots_share
            + self.table_share * other.table_share
    }

    fn abs_sum(&self) -> f64 {
        [
            self.pot,
            self.shot_time,
            self.fifties,
            self.hundreds,
            self.high_break,
            self.points_share,
            self.shots_share,
            self.table_share,
        ]
        .iter()
        .map(|w| w.abs())
        .sum()
    }
}

/// A partially specified [`SignalSet`], as found in config files.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SignalOverrides {
    pot: Option<f64>,
    shot_time: Option<f64>,
    fifties: Option<f64>,
    hundreds: Option<f64>,
    high_break: Option<f64>,
    points_share: Option<f64>,
    shots_share: Option<f64>,
    table_share: Option<f64>,
}

impl SignalOverrides {
    fn over(self, base: SignalSet) -> SignalSet {
        SignalSet {
            pot: self.pot.unwrap_or(base.pot),
            shot_time: self.shot_time.unwrap_or(base.shot_time),
            fifties: self.fifties.unwrap_or(base.fifties),
            hundreds: self.hundreds.unwrap_or(base.hundreds),
            high_break: self.high_break.unwrap_or(base.high_break),
            points_share: self.points_share.unwrap_or(base.points_share),
            shots_share: self.shots_share.unwrap_or(base.shots_share),
            table_share: self.table_share.unwrap_or(base.table_share),
        }
    }
}

fn weights_over_defaults<'de, D: Deserializer<'de>>(d: D) -> Result<SignalSet, D::Error> {
    Ok(SignalOverrides::deserialize(d)?.over(LiveWeights::default().weights))
}

fn sds_over_defaults<'de, D: Deserializer<'de>>(d: D) -> Result<SignalSet, D::Error> {
    Ok(SignalOverrides::deserialize(d)?.over(LiveWeights::default().sds))
}

/// Live-signal weights, z-score scales and the reliability/output scaling.
///
/// Omitted entries of `weights` and `sds` keep their default values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveWeights {
    #[serde(deserialize_with = "weights_over_defaults")]
    pub weights: SignalSet,
    /// Standard deviation per signal. `pot` is in percentage points and
    /// `high_break` in points; both are divided by 100 like their raw
    /// differences. The rest are in the signal's own units.
    #[serde(deserialize_with = "sds_over_defaults")]
    pub sds: SignalSet,
    /// Combined shots at which live stats reach full influence.
    pub k_shots: f64,
    /// Output scale of the boost in logit units.
    pub beta: f64,
    /// Use `totA / (totA + totB)` for the table-time share instead of player
    /// A's absolute percentage.
    pub symmetric_table_share: bool,
}

impl Default for LiveWeights {
    fn default() -> Self {
        LiveWeights {
            weights: SignalSet {
                pot: 0.52,
                shot_time: 0.44,
                fifties: 0.34,
                hundreds: 0.12,
                high_break: 0.20,
                points_share: 0.68,
                shots_share: 0.43,
                table_share: 0.44,
            },
            sds: SignalSet {
                pot: 8.0,
                shot_time: 2.2,
                fifties: 1.8,
                hundreds: 1.0,
                high_break: 30.0,
                points_share: 0.18,
                shots_share: 0.18,
                table_share: 0.16,
            },
            k_shots: 150.0,
            beta: 0.25,
            symmetric_table_share: false,
        }
    }
}

impl LiveWeights {
    /// Largest absolute boost these weights can produce.
    pub fn max_abs_boost(&self) -> f64 {
        self.beta.abs() * self.weights.abs_sum() * Z_LIMIT
    }
}

/// Intermediate values of one live-boost evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LiveBreakdown {
    /// Clamped z-score per signal, positive favouring player A.
    pub z: SignalSet,
    /// Weighted sum of the z-scores.
    pub composite: f64,
    /// Sample-size reliability in [0, 1].
    pub reliability: f64,
    pub boost: f64,
}

/// Logit-space live adjustment in favour of player A.
pub fn live_boost(a: &LiveStats, b: &LiveStats, weights: &LiveWeights) -> f64 {
    live_breakdown(a, b, weights).boost
}

/// Same as [`live_boost`] but keeps the per-signal z-scores.
pub fn live_breakdown(a: &LiveStats, b: &LiveStats, weights: &LiveWeights) -> LiveBreakdown {
    let sds = &weights.sds;

    let table_share = if weights.symmetric_table_share {
        share(a.table_time, b.table_time)
    } else {
        a.table_time / 100.0
    };

    let z = SignalSet {
        pot: z_score((a.pot_rate - b.pot_rate) / 100.0, sds.pot / 100.0),
        // Faster A is positive.
        shot_time: z_score(b.avg_shot_time - a.avg_shot_time, sds.shot_time),
        fifties: z_score(a.fifties - b.fifties, sds.fifties),
        hundreds: z_score(a.centuries - b.centuries, sds.hundreds),
        high_break: z_score(
            (a.highest_break - b.highest_break) / 100.0,
            sds.high_break / 100.0,
        ),
        points_share: z_score(share(a.points, b.points) - 0.5, sds.points_share),
        shots_share: z_score(share(a.shots, b.shots) - 0.5, sds.shots_share),
        table_share: z_score(table_share - 0.5, sds.table_share),
    };

    let composite = weights.weights.dot(&z);
    let reliability = reliability(a.shots + b.shots, weights.k_shots);

    LiveBreakdown {
        z,
        composite,
        reliability,
        boost: weights.beta * reliability * composite,
    }
}

/// Linear ramp from 0 at zero shots to 1 at `k_shots`.
pub fn reliability(total_shots: f64, k_shots: f64) -> f64 {
    clamp(total_shots / k_shots.max(1.0), 0.0, 1.0)
}

fn z_score(diff: f64, sd: f64) -> f64 {
    clamp(diff / sd.max(SD_FLOOR), -Z_LIMIT, Z_LIMIT)
}

/// A's share of a combined quantity. Neutral when nothing has accumulated yet.
fn share(a: f64, b: f64) -> f64 {
    let total = a + b;
    if total <= 0.0 {
        return 0.5;
    }
    a / total
}
