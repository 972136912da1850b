//! Live win probability and fair odds for a two-player snooker match.
//!
//! Season strength and in-play statistics are combined in logit space into a
//! per-frame probability, dampened toward 50/50, and then run through a
//! best-of-N race model to price the match from the current frame score.

pub mod config;
pub mod dashboard;
pub mod evaluation;
pub mod input;
pub mod model;
