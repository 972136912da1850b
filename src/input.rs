//! Raw host input and its conversion into model inputs.
//!
//! The form collaborator hands over loosely-typed fields: numbers, numeric
//! strings, blanks or nothing at all. Required fields that are blank raise
//! [`InputError::MissingRequiredInput`]; anything that does not parse as a
//! finite number raises [`InputError::InvalidNumericInput`]. Optional fields
//! fall back to their defaults silently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{LiveStats, MatchState, ModelParams, SeasonStats};

/// Shown to the user whenever an evaluation is rejected.
pub const INPUT_HINT: &str = "Fill required Season + Live + Score fields and click Update.";

/// Time on table assumed when the field is left blank, in percent.
const DEFAULT_TABLE_TIME: f64 = 50.0;

/// Longest match accepted. Professional matches top out at best-of-35.
pub const MAX_BEST_OF: u32 = 1001;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("missing required input: {field}")]
    MissingRequiredInput { field: String },

    #[error("invalid numeric input for {field}: {value:?}")]
    InvalidNumericInput { field: String, value: String },
}

impl InputError {
    pub fn field(&self) -> &str {
        match self {
            InputError::MissingRequiredInput { field } => field,
            InputError::InvalidNumericInput { field, .. } => field,
        }
    }

    pub fn hint(&self) -> &'static str {
        INPUT_HINT
    }
}

/// A single form field as received from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl From<&str> for RawField {
    fn from(v: &str) -> Self {
        RawField::Text(v.to_string())
    }
}

/// Parse a field; `Ok(None)` when absent or blank.
fn parse_field(raw: Option<&RawField>, field: &str) -> Result<Option<f64>, InputError> {
    let invalid = |value: String| InputError::InvalidNumericInput {
        field: field.to_string(),
        value,
    };
    let value = match raw {
        None => return Ok(None),
        Some(RawField::Number(v)) => *v,
        Some(RawField::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>().map_err(|_| invalid(s.to_string()))?
        }
    };
    if !value.is_finite() {
        return Err(invalid(value.to_string()));
    }
    Ok(Some(value))
}

fn required(raw: &Option<RawField>, field: &str) -> Result<f64, InputError> {
    parse_field(raw.as_ref(), field)?.ok_or_else(|| InputError::MissingRequiredInput {
        field: field.to_string(),
    })
}

fn optional(raw: &Option<RawField>, field: &str, default: f64) -> Result<f64, InputError> {
    Ok(parse_field(raw.as_ref(), field)?.unwrap_or(default))
}

/// Required whole number, truncated toward zero, within `min..=max`.
fn required_count(
    raw: &Option<RawField>,
    field: &str,
    min: u32,
    max: u32,
) -> Result<u32, InputError> {
    let value = required(raw, field)?.trunc();
    if value < min as f64 || value > max as f64 {
        return Err(InputError::InvalidNumericInput {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value as u32)
}

// ── Form blocks ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonForm {
    pub points: Option<RawField>,
    pub matches: Option<RawField>,
    pub win_rate: Option<RawField>,
    pub shot_time: Option<RawField>,
    pub fifties: Option<RawField>,
    pub centuries: Option<RawField>,
}

impl SeasonForm {
    pub fn parse(&self, player: &str) -> Result<SeasonStats, InputError> {
        let name = |f: &str| format!("season.{player}.{f}");
        Ok(SeasonStats {
            points_scored: required(&self.points, &name("points"))?,
            matches_played: required(&self.matches, &name("matches"))?,
            win_rate: required(&self.win_rate, &name("win_rate"))?,
            avg_shot_time: required(&self.shot_time, &name("shot_time"))?,
            fifties: optional(&self.fifties, &name("fifties"), 0.0)?,
            centuries: optional(&self.centuries, &name("centuries"), 0.0)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveForm {
    pub pot_rate: Option<RawField>,
    pub shot_time: Option<RawField>,
    pub fifties: Option<RawField>,
    pub centuries: Option<RawField>,
    pub high_break: Option<RawField>,
    pub points: Option<RawField>,
    pub shots: Option<RawField>,
    pub table_time: Option<RawField>,
}

impl LiveForm {
    pub fn parse(&self, player: &str) -> Result<LiveStats, InputError> {
        let name = |f: &str| format!("live.{player}.{f}");
        Ok(LiveStats {
            pot_rate: required(&self.pot_rate, &name("pot_rate"))?,
            avg_shot_time: required(&self.shot_time, &name("shot_time"))?,
            fifties: optional(&self.fifties, &name("fifties"), 0.0)?,
            centuries: optional(&self.centuries, &name("centuries"), 0.0)?,
            highest_break: optional(&self.high_break, &name("high_break"), 0.0)?,
            points: required(&self.points, &name("points"))?,
            shots: required(&self.shots, &name("shots"))?,
            table_time: optional(&self.table_time, &name("table_time"), DEFAULT_TABLE_TIME)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreForm {
    pub best_of: Option<RawField>,
    pub frames_a: Option<RawField>,
    pub frames_b: Option<RawField>,
}

impl ScoreForm {
    pub fn parse(&self) -> Result<MatchState, InputError> {
        Ok(MatchState {
            best_of: required_count(&self.best_of, "score.best_of", 1, MAX_BEST_OF)?,
            frames_a: required_count(&self.frames_a, "score.frames_a", 0, u32::MAX)?,
            frames_b: required_count(&self.frames_b, "score.frames_b", 0, u32::MAX)?,
        })
    }
}

/// Per-player pair of form blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PlayerPair<T> {
    pub a: T,
    pub b: T,
}

/// Bookmaker back odds for the match, per player. Both optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookOdds {
    pub a: Option<RawField>,
    pub b: Option<RawField>,
}

/// One complete evaluation request from the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationRequest {
    pub season: PlayerPair<SeasonForm>,
    pub live: PlayerPair<LiveForm>,
    pub score: ScoreForm,
    pub book_odds: BookOdds,
    /// Replaces the host's parameters for this request only.
    pub model: Option<ModelParams>,
}

/// A bookmaker price as parsed from the form. Bad odds never fail the
/// evaluation; they are reported back per side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BookPrice {
    Blank,
    Invalid,
    Odds(f64),
}

impl BookPrice {
    pub fn parse(raw: &Option<RawField>) -> Self {
        match parse_field(raw.as_ref(), "book_odds") {
            Ok(None) => BookPrice::Blank,
            Ok(Some(v)) => BookPrice::Odds(v),
            Err(_) => BookPrice::Invalid,
        }
    }
}
