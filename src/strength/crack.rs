//! Crack-time estimation and rendering.

use serde::{Deserialize, Serialize};

/// Reference attacker rate: guesses per second for a large cluster.
pub const DEFAULT_GUESSES_PER_SECOND: f64 = 1e9;

/// Divisor chain: seconds→minutes, minutes→hours, hours→days, days→years.
const UNIT_DIVISORS: [f64; 4] = [60.0, 60.0, 24.0, 365.0];

/// Unit suffixes; the index advances once per division applied.
const UNIT_LABELS: [&str; 5] = ["s", "m", "h", "d", "y"];

/// Sentinel label when `2^bits` overflows to infinity.
const INFINITE_LABEL: &str = "∞";

/// Estimates wall-clock time for an attacker to exhaust the search space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrackTimeEstimator {
    guesses_per_second: f64,
}

impl Default for CrackTimeEstimator {
    fn default() -> Self {
        Self {
            guesses_per_second: DEFAULT_GUESSES_PER_SECOND,
        }
    }
}

impl CrackTimeEstimator {
    /// Creates an estimator with a custom attacker rate.
    pub fn new(guesses_per_second: f64) -> Self {
        Self { guesses_per_second }
    }

    /// Returns the assumed attacker rate.
    #[inline]
    pub fn guesses_per_second(&self) -> f64 {
        self.guesses_per_second
    }

    /// Returns estimated seconds to exhaustion: `2^bits / rate`.
    pub fn estimate_seconds(&self, bits: f64) -> f64 {
        bits.exp2() / self.guesses_per_second
    }

    /// Renders a seconds estimate as a compact human-readable label.
    ///
    /// Non-finite input renders the infinite sentinel. Sub-second values
    /// render as integer milliseconds. Otherwise the value is divided
    /// through the unit chain, stopping as soon as it drops below the
    /// next threshold or the chain is exhausted, and rendered to two
    /// decimal places with its unit suffix.
    pub fn humanize(seconds: f64) -> String {
        if !seconds.is_finite() {
            return INFINITE_LABEL.to_string();
        }
        if seconds < 1.0 {
            return format!("{} ms", (seconds * 1000.0).round() as i64);
        }

        let mut value = seconds;
        let mut unit = 0;
        while unit < UNIT_DIVISORS.len() && value >= UNIT_DIVISORS[unit] {
            value /= UNIT_DIVISORS[unit];
            unit += 1;
        }
        format!("{value:.2} {}", UNIT_LABELS[unit])
    }

    /// Convenience: estimate from bits and render in one step.
    pub fn label(&self, bits: f64) -> String {
        Self::humanize(self.estimate_seconds(bits))
    }
}
