//! System randomness with silent degradation.
//!
//! The strong path draws one unsigned 32-bit integer from the OS entropy
//! source and normalizes it by 2^32 so the result stays strictly below 1.
//! When the OS source is unavailable the call falls back to a
//! non-cryptographic SplitMix64 stream. Availability is an environment
//! fact, not a failure: the fallback is decided per call and never
//! surfaces an error to the caller.

use super::RandomSource;
use rand_core::RngCore;

/// Divisor for normalizing a u32 into `[0, 1)`: `0xFFFF_FFFF + 1`.
const NORMALIZER: f64 = (u32::MAX as f64) + 1.0;

/// Uniform sample source backed by the OS entropy source.
pub struct SystemRandom {
    fallback: SplitMix64,
    /// Latch so the degradation warning is logged once, not per call.
    degraded: bool,
}

impl SystemRandom {
    /// Creates a source with the fallback stream seeded from the clock.
    pub fn new() -> Self {
        Self {
            fallback: SplitMix64::seeded_from_clock(),
            degraded: false,
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn sample(&mut self) -> f64 {
        let mut buf = [0u8; 4];
        match rand_core::OsRng.try_fill_bytes(&mut buf) {
            Ok(()) => f64::from(u32::from_le_bytes(buf)) / NORMALIZER,
            Err(err) => {
                if !self.degraded {
                    self.degraded = true;
                    tracing::warn!(
                        error = %err,
                        "OS entropy source unavailable, degrading to non-cryptographic fallback"
                    );
                }
                self.fallback.next_f64()
            }
        }
    }
}

/// SplitMix64 stream. Statistical uniformity only, no cryptographic claims.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn seeded_from_clock() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e37_79b9_7f4a_7c15);
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        ((self.next_u64() >> 32) as f64) / NORMALIZER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_in_unit_interval() {
        let mut source = SystemRandom::new();
        for _ in 0..1000 {
            let u = source.sample();
            assert!((0.0..1.0).contains(&u), "sample {u} out of [0, 1)");
        }
    }

    #[test]
    fn test_samples_vary() {
        let mut source = SystemRandom::new();
        let first = source.sample();
        let all_equal = (0..100).all(|_| source.sample() == first);
        assert!(!all_equal);
    }

    #[test]
    fn test_fallback_stream_in_unit_interval() {
        let mut stream = SplitMix64 { state: 1 };
        for _ in 0..1000 {
            let u = stream.next_f64();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_fallback_stream_deterministic() {
        let mut a = SplitMix64 { state: 42 };
        let mut b = SplitMix64 { state: 42 };
        for _ in 0..10 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}
