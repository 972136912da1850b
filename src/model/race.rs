//! Best-of-N race model.
//!
//! With a fixed per-frame probability `p` for player A (frames assumed i.i.d.),
//! the probability that A reaches `target` frames first from score `a`-`b`
//! obeys
//!
//! ```text
//! f(a, b) = 1                                   if a >= target
//!         = 0                                   if b >= target
//!         = p * f(a + 1, b) + (1 - p) * f(a, b + 1)
//! ```
//!
//! The recurrence is solved bottom-up over the frames each player still
//! needs, one row at a time, in a table scoped to one call. An evaluation
//! costs O(target²) time and O(target) memory, with no recursion.

use serde::{Deserialize, Serialize};

/// Current state of a best-of-N match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub best_of: u32,
    pub frames_a: u32,
    pub frames_b: u32,
}

impl MatchState {
    pub fn target(&self) -> u32 {
        race_target(self.best_of)
    }

    pub fn is_decided(&self) -> bool {
        let target = self.target();
        self.frames_a >= target || self.frames_b >= target
    }
}

/// Frames needed to win a best-of-`best_of` match.
pub fn race_target(best_of: u32) -> u32 {
    best_of / 2 + 1
}

/// Probability that player A wins the match from the given state.
pub fn match_win_probability(p: f64, state: &MatchState) -> f64 {
    race_probability(p, state.frames_a, state.frames_b, state.target())
}

/// Probability that A reaches `target` frames before B, from score `a`-`b`.
///
/// Terminal scores return exactly 1.0 (A already there) or 0.0 (B already
/// there) without building a table.
pub fn race_probability(p: f64, a: u32, b: u32, target: u32) -> f64 {
    if a >= target {
        return 1.0;
    }
    if b >= target {
        return 0.0;
    }
    RaceTable::new(target - b).solve(p, target - a)
}

/// One row of the race table: `row[j]` is the probability that A wins when A
/// still needs `i` frames and B still needs `j`, for the current `i`.
struct RaceTable {
    row: Vec<f64>,
}

impl RaceTable {
    /// Row `i = 0`: A has won for every `j > 0`. Column `j = 0` is B having
    /// won and stays 0 in every row.
    fn new(need_b: u32) -> Self {
        let mut row = vec![1.0; need_b as usize + 1];
        row[0] = 0.0;
        RaceTable { row }
    }

    fn solve(mut self, p: f64, need_a: u32) -> f64 {
        let q = 1.0 - p;
        for _ in 0..need_a {
            for j in 1..self.row.len() {
                self.row[j] = p * self.row[j] + q * self.row[j - 1];
            }
        }
        self.row[self.row.len() - 1]
    }
}
