/// Fair decimal odds and value comparison against a bookmaker's price.
///
/// Fair odds are simply `1 / p`. The edge of a bookmaker price over the fair
/// price is
///   edge% = (book − fair) / fair · 100
/// and is banded as value (> +2%), marginal (within ±2%) or no value.
use serde::Serialize;

/// Edge threshold, in percent, separating the value bands.
const VALUE_THRESHOLD_PCT: f64 = 2.0;
/// Probability floor used when converting to odds.
const MIN_PROB: f64 = 1e-9;

/// Qualitative verdict on a bookmaker price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueBand {
    Value,
    Marginal,
    NoValue,
}

impl ValueBand {
    pub fn from_edge(edge_pct: f64) -> Self {
        if edge_pct > VALUE_THRESHOLD_PCT {
            ValueBand::Value
        } else if edge_pct >= -VALUE_THRESHOLD_PCT {
            ValueBand::Marginal
        } else {
            ValueBand::NoValue
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ValueBand::Value => "VALUE",
            ValueBand::Marginal => "MARGINAL",
            ValueBand::NoValue => "NO VALUE",
        }
    }
}

/// Result of comparing one side's fair price with the bookmaker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueCheck {
    pub fair_odds: f64,
    pub book_odds: f64,
    pub edge_pct: f64,
    pub band: ValueBand,
}

/// Fair decimal odds for an outcome of probability `p`.
pub fn fair_odds(p: f64) -> f64 {
    1.0 / p.max(MIN_PROB)
}

/// Percentage by which `book_odds` exceed `fair_odds`.
pub fn edge_percent(book_odds: f64, fair_odds: f64) -> f64 {
    (book_odds - fair_odds) / fair_odds * 100.0
}

/// Compare a bookmaker price against the fair price for probability `p`.
pub fn compare_value(p: f64, book_odds: f64) -> ValueCheck {
    let fair = fair_odds(p);
    let edge_pct = edge_percent(book_odds, fair);
    ValueCheck {
        fair_odds: fair,
        book_odds,
        edge_pct,
        band: ValueBand::from_edge(edge_pct),
    }
}
