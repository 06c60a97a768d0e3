//! Defense-to-reduction curve.
//!
//! # Formula
//!
//! For `defense <= 150`, linear interpolation over a breakpoint table:
//!
//! ```text
//! (0, 0%) (35, 25%) (60, 37%) (85, 52%) (110, 60%) (125, 65%) (150, 75%)
//! ```
//!
//! Above 150 the curve flattens exponentially:
//!
//! ```text
//! reduction = 0.75 + 0.20 * (1 - e^(-0.0045 * (defense - 150)))
//! ```
//!
//! asymptotically approaching the hard cap of 95%.

/// Breakpoints for the interpolated low-defense segment.
const BREAKPOINTS: [(i32, f64); 7] = [
    (0, 0.00),
    (35, 0.25),
    (60, 0.37),
    (85, 0.52),
    (110, 0.60),
    (125, 0.65),
    (150, 0.75),
];

/// Hard cap on the reduction fraction.
pub const REDUCTION_CAP: f64 = 0.95;

const TAIL_START: i32 = 150;
const TAIL_BASE: f64 = 0.75;
const TAIL_SPAN: f64 = 0.20;
const TAIL_RATE: f64 = 0.0045;

/// Fraction of raw damage removed by `defense`. Always in `[0, 0.95]`.
pub fn defense_reduction(defense: i32) -> f64 {
    if defense <= 0 {
        return 0.0;
    }
    if defense > TAIL_START {
        let tail = TAIL_SPAN * (1.0 - (-TAIL_RATE * f64::from(defense - TAIL_START)).exp());
        return (TAIL_BASE + tail).min(REDUCTION_CAP);
    }
    // Find the surrounding breakpoints and interpolate.
    for window in BREAKPOINTS.windows(2) {
        let (lo_def, lo_frac) = window[0];
        let (hi_def, hi_frac) = window[1];
        if defense <= hi_def {
            let t = f64::from(defense - lo_def) / f64::from(hi_def - lo_def);
            return lo_frac + t * (hi_frac - lo_frac);
        }
    }
    TAIL_BASE
}
