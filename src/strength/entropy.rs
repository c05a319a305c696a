//! Entropy estimation from observed character classes.

use crate::charset::{self, CharacterClass};

/// Estimates password entropy in bits.
///
/// Every character is classified into its class; the pool size is the sum
/// of the alphabet sizes of the classes actually observed. An empty
/// password estimates to 0 bits. Otherwise
/// `bits = log2(pool_size) * length`.
///
/// Characters outside the generation alphabet count toward the punctuation
/// class, keeping the function total over arbitrary strings.
///
/// Always recomputed from scratch: an incremental formula would have to
/// re-weight every prior character when a previously unseen class appears,
/// and the length cap keeps the full scan O(1).
pub fn estimate(password: &str) -> f64 {
    if password.is_empty() {
        return 0.0;
    }

    let mut observed = [false; CharacterClass::ALL.len()];
    let mut length = 0usize;
    for ch in password.chars() {
        let class = charset::classify(ch).unwrap_or(CharacterClass::Symbol);
        observed[class as usize] = true;
        length += 1;
    }

    let pool_size: usize = CharacterClass::ALL
        .into_iter()
        .filter(|class| observed[*class as usize])
        .map(CharacterClass::size)
        .sum();

    (pool_size as f64).log2() * length as f64
}
