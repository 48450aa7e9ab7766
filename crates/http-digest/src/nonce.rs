// http-digest - HTTP Digest Authorization for clients
// Copyright (C) 2026 The http-digest Contributors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nonce-count tracking and client nonce generation.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::{thread_rng, Rng};
use smol_str::SmolStr;

/// Monotonic nonce-count (`nc`) sequence, first value 1.
///
/// Safe to share between threads: every `next` call receives its own value
/// and no value is skipped.
#[derive(Debug, Default)]
pub struct NonceCounter {
    count: AtomicU64,
}

impl NonceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the counter and returns the new value.
    ///
    /// Past `u64::MAX` the sequence wraps to 0 instead of panicking.
    pub fn next(&self) -> u64 {
        self.count.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Last value handed out, 0 before the first `next`.
    pub fn current(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Renders a count as the 8-digit lowercase hex `nc` field.
    ///
    /// Counts above `u32::MAX` widen the field rather than wrapping.
    pub fn format(count: u64) -> String {
        format!("{:08x}", count)
    }
}

/// Source of client nonces.
pub trait CnonceSource: Send + Sync {
    fn generate(&self) -> SmolStr;
}

/// 128 random bits rendered as 32 lowercase hex characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCnonce;

impl CnonceSource for RandomCnonce {
    fn generate(&self) -> SmolStr {
        let bytes: [u8; 16] = thread_rng().gen();
        SmolStr::new(hex::encode(bytes))
    }
}

/// Always yields the same value. Useful for reproducible test vectors.
#[derive(Debug, Clone)]
pub struct FixedCnonce(pub SmolStr);

impl FixedCnonce {
    pub fn new(value: &str) -> Self {
        Self(SmolStr::new(value))
    }
}

impl CnonceSource for FixedCnonce {
    fn generate(&self) -> SmolStr {
        self.0.clone()
    }
}

impl<F> CnonceSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> SmolStr {
        SmolStr::new(self())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn is_lower_hex_32(s: &str) -> bool {
        s.len() == 32 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    #[test]
    fn counter_starts_at_one() {
        let counter = NonceCounter::new();
        assert_eq!(counter.current(), 0);
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.next(), 2);
        assert_eq!(counter.current(), 2);
    }

    #[test]
    fn counter_wraps_at_the_end_of_its_range() {
        let counter = NonceCounter {
            count: AtomicU64::new(u64::MAX - 1),
        };
        assert_eq!(counter.next(), u64::MAX);
        assert_eq!(NonceCounter::format(u64::MAX), "ffffffffffffffff");
        assert_eq!(counter.next(), 0);
        assert_eq!(counter.next(), 1);
    }

    #[test]
    fn format_pads_to_eight_hex_digits() {
        assert_eq!(NonceCounter::format(1), "00000001");
        assert_eq!(NonceCounter::format(2), "00000002");
        assert_eq!(NonceCounter::format(255), "000000ff");
        assert_eq!(NonceCounter::format(u32::MAX as u64), "ffffffff");
        assert_eq!(NonceCounter::format(u32::MAX as u64 + 1), "100000000");
    }

    #[test]
    fn counter_is_gap_free_across_threads() {
        let counter = Arc::new(NonceCounter::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || (0..250).map(|_| counter.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value), "duplicate nc {}", value);
            }
        }
        assert_eq!(seen.len(), 1000);
        assert_eq!(seen.iter().copied().max(), Some(1000));
        assert_eq!(seen.iter().copied().min(), Some(1));
    }

    #[test]
    fn random_cnonce_shape_and_uniqueness() {
        let source = RandomCnonce;
        let first = source.generate();
        let second = source.generate();
        assert!(is_lower_hex_32(&first), "bad cnonce {}", first);
        assert!(is_lower_hex_32(&second), "bad cnonce {}", second);
        assert_ne!(first, second);
    }

    #[test]
    fn fixed_and_closure_sources() {
        let fixed = FixedCnonce::new("9ea5ff3bd34554a4165bbdc1df91dcff");
        assert_eq!(fixed.generate(), "9ea5ff3bd34554a4165bbdc1df91dcff");
        assert_eq!(fixed.generate(), fixed.generate());

        let closure = || "abc".to_owned();
        assert_eq!(closure.generate(), "abc");
    }
}
