//! Identifier generation: random global session ids and the per-session
//! monotonic scope-id counter, grounded in `wampproto`'s `idgen` module.
//!
//! Per spec, all WAMP ids live in `[1, 2^53]`. Session ids are drawn once
//! per session from a CSPRNG; everything else a single component hands out
//! (request, registration, subscription, publication ids) comes from a
//! plain counter local to that component — no lock is needed since the
//! core is single-threaded per instance.

use rand::Rng;

/// Upper bound (inclusive) for any WAMP id, `2^53`.
pub const MAX_ID: u64 = 9_007_199_254_740_992;

/// Draws a new session id uniformly from `[1, 2^53]` using the OS CSPRNG.
pub fn generate_session_id() -> u64 {
    rand::rngs::OsRng.gen_range(1..=MAX_ID)
}

/// A monotonic counter that wraps back to 1 after `2^53`, scoped to a
/// single session (or a single router component, for ids it hands out
/// across sessions such as registration/subscription ids).
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionScopeIdGenerator {
    last: u64,
}

impl SessionScopeIdGenerator {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Returns the next id in sequence, wrapping to 1 after `MAX_ID`.
    pub fn next(&mut self) -> u64 {
        self.last = if self.last >= MAX_ID { 1 } else { self.last + 1 };
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_within_range() {
        for _ in 0..1000 {
            let id = generate_session_id();
            assert!(id >= 1 && id <= MAX_ID);
        }
    }

    #[test]
    fn scope_generator_increments_from_one() {
        let mut gen = SessionScopeIdGenerator::new();
        assert_eq!(gen.next(), 1);
        assert_eq!(gen.next(), 2);
        assert_eq!(gen.next(), 3);
    }

    #[test]
    fn scope_generator_wraps_after_max() {
        let mut gen = SessionScopeIdGenerator { last: MAX_ID };
        assert_eq!(gen.next(), 1);
    }
}
