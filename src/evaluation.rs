use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::validate_params;
use crate::input::{BookPrice, EvaluationRequest, InputError, RawField};
use crate::model::{
    compare_value, fair_odds, frame_probability, live_breakdown, match_win_probability,
    season_strength, FrameProbability, LiveBreakdown, MatchState, ModelParams, ValueCheck,
};

/// Fair decimal prices derived from the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FairPrices {
    /// Player A to win the next frame.
    pub frame: f64,
    pub player_a: f64,
    pub player_b: f64,
}

/// Outcome of the bookmaker comparison for one side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SideValue {
    Blank,
    Invalid,
    Checked(ValueCheck),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueReport {
    pub player_a: SideValue,
    pub player_b: SideValue,
}

/// Everything one evaluation produces, from the season indices down to the
/// match price.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub season_a: f64,
    pub season_b: f64,
    pub live: LiveBreakdown,
    pub frame: FrameProbability,
    pub score: MatchState,
    pub target: u32,
    /// Probability that player A wins the match from the current score.
    pub match_probability: f64,
    pub fair: FairPrices,
    pub value: ValueReport,
    pub evaluated_at: DateTime<Utc>,
}

/// Run the whole model for one request.
///
/// `defaults` are used unless the request carries its own `model` block,
/// which must pass [`validate_params`] like a host config. All inputs are
/// parsed before any computation, so a rejected request has no partial
/// output.
pub fn evaluate(
    request: &EvaluationRequest,
    defaults: &ModelParams,
) -> Result<Evaluation, InputError> {
    if let Some(model) = &request.model {
        validate_params(model).map_err(|e| InputError::InvalidNumericInput {
            field: "model".to_string(),
            value: e.to_string(),
        })?;
    }
    let params = request.model.unwrap_or(*defaults);

    let season_a_stats = request.season.a.parse("a")?;
    let season_b_stats = request.season.b.parse("b")?;
    let live_a = request.live.a.parse("a")?;
    let live_b = request.live.b.parse("b")?;
    let score = request.score.parse()?;

    let season_a = season_strength(&season_a_stats, &params.season);
    let season_b = season_strength(&season_b_stats, &params.season);
    debug!(season_a, season_b, "Season strength indices");

    let live = live_breakdown(&live_a, &live_b, &params.live);
    debug!(
        composite = live.composite,
        reliability = live.reliability,
        boost = live.boost,
        "Live boost"
    );

    let frame = frame_probability(season_a, season_b, live.boost, &params.realism);
    debug!(
        raw = frame.raw,
        shrunk = frame.shrunk,
        value = frame.value,
        "Per-frame probability"
    );

    let target = score.target();
    let match_probability = match_win_probability(frame.value, &score);
    debug!(
        best_of = score.best_of,
        frames_a = score.frames_a,
        frames_b = score.frames_b,
        target,
        match_probability,
        "Match probability"
    );

    let fair = FairPrices {
        frame: fair_odds(frame.value),
        player_a: fair_odds(match_probability),
        player_b: fair_odds(1.0 - match_probability),
    };

    let value = ValueReport {
        player_a: side_value(&request.book_odds.a, match_probability),
        player_b: side_value(&request.book_odds.b, 1.0 - match_probability),
    };

    Ok(Evaluation {
        season_a,
        season_b,
        live,
        frame,
        score,
        target,
        match_probability,
        fair,
        value,
        evaluated_at: Utc::now(),
    })
}

fn side_value(raw: &Option<RawField>, p: f64) -> SideValue {
    match BookPrice::parse(raw) {
        BookPrice::Blank => SideValue::Blank,
        BookPrice::Invalid => SideValue::Invalid,
        BookPrice::Odds(book) => SideValue::Checked(compare_value(p, book)),
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Score: {}-{} (best of {}, first to {})",
            self.score.frames_a, self.score.frames_b, self.score.best_of, self.target
        )?;
        writeln!(f, "Per-frame win p (A):       {:.3}", self.frame.value)?;
        writeln!(f, "Per-frame fair odds:       {:.2}", self.fair.frame)?;
        writeln!(f, "Match win p (A):           {:.3}", self.match_probability)?;
        writeln!(f, "Player A fair odds:        {:.2}", self.fair.player_a)?;
        write!(f, "Player B fair odds:        {:.2}", self.fair.player_b)?;
        for (label, side) in [("Player A", &self.value.player_a), ("Player B", &self.value.player_b)] {
            match side {
                SideValue::Blank => {}
                SideValue::Invalid => write!(f, "\n{label}: invalid odds")?,
                SideValue::Checked(check) => write!(
                    f,
                    "\n{label}: Fair {:.2} vs Book {:.2} -> Edge {:+.1}% {}",
                    check.fair_odds,
                    check.book_odds,
                    check.edge_pct,
                    check.band.label()
                )?,
            }
        }
        Ok(())
    }
}
