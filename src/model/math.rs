/// Numeric link functions shared by every estimator.
///
/// `logit` clamps its input away from 0 and 1 so the whole model stays finite
/// for any finite input.
const EPS: f64 = 1e-6;

/// Bound `x` into `[lo, hi]`.
///
/// Unlike `f64::clamp` this never panics when the bounds arrive inverted; the
/// upper bound wins, matching `max(lo, min(hi, x))`.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(x))
}

/// Log-odds of `p`, with `p` first clamped into `[1e-6, 1 - 1e-6]`.
pub fn logit(p: f64) -> f64 {
    let p = clamp(p, EPS, 1.0 - EPS);
    (p / (1.0 - p)).ln()
}

/// Standard logistic sigmoid. Output lies in the open interval (0, 1) for
/// finite `z`.
pub fn inv_logit(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
