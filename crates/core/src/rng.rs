//! RNG module - piece selection
//!
//! A linear congruential generator with GCC's constants picks catalog indices.
//! It is not a general purpose RNG: the hash of `seed + offset` is scaled into
//! `0..CATALOG_LEN` and the hash itself becomes the next state.
//!
//! The free function [`random_index`] is the plain (wall-clock fraction, offset)
//! form. [`PieceSelector`] threads the generator state through the game state so
//! that transitions stay pure and a fixed seed replays the same piece sequence.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{PieceKind, CATALOG_LEN};

/// LCG multiplier (GCC)
pub const LCG_A: u64 = 1_103_515_245;
/// LCG increment (GCC)
pub const LCG_C: u64 = 12_345;
/// LCG modulus, 2^31
pub const LCG_M: u64 = 0x8000_0000;

/// `(a * seed + c) mod m`
pub fn hash(seed: u32) -> u32 {
    ((LCG_A * seed as u64 + LCG_C) % LCG_M) as u32
}

/// Scale a hash in `0..m` to a catalog index in `0..CATALOG_LEN`
pub fn scale(hash: u32) -> usize {
    ((hash as u64 % LCG_M) * CATALOG_LEN as u64 / LCG_M) as usize
}

/// Millisecond component of the wall clock (0..1000)
pub fn wall_clock_millis() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_millis())
        .unwrap_or(0)
}

/// Catalog index as a deterministic function of (millis, offset).
///
/// Different offsets within the same millisecond land in different buckets.
pub fn random_index(millis: u32, offset: u32) -> usize {
    scale(hash(millis.wrapping_add(offset)))
}

/// Piece selector state carried inside the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSelector {
    state: u32,
}

impl PieceSelector {
    /// Create a selector from an explicit seed
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed from the current wall-clock milliseconds
    pub fn from_wall_clock() -> Self {
        Self::new(wall_clock_millis())
    }

    /// Draw a piece kind. Returns the kind and the advanced selector.
    pub fn draw(self, offset: u32) -> (PieceKind, PieceSelector) {
        let h = hash(self.state.wrapping_add(offset));
        // scale() is always below CATALOG_LEN
        let kind = PieceKind::ALL[scale(h)];
        (kind, PieceSelector { state: h })
    }
}

impl Default for PieceSelector {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_lcg_formula() {
        assert_eq!(hash(0), 12_345);
        assert_eq!(hash(1), ((1_103_515_245u64 + 12_345) % LCG_M) as u32);
        // Large seeds must not overflow.
        let h = hash(u32::MAX);
        assert!((h as u64) < LCG_M);
    }

    #[test]
    fn scale_covers_catalog_range() {
        assert_eq!(scale(0), 0);
        assert_eq!(scale((LCG_M - 1) as u32), CATALOG_LEN - 1);
        assert_eq!(scale((LCG_M / 2) as u32), 2);
    }

    #[test]
    fn selector_is_deterministic() {
        let mut a = PieceSelector::new(12345);
        let mut b = PieceSelector::new(12345);
        for _ in 0..100 {
            let (ka, na) = a.draw(0);
            let (kb, nb) = b.draw(0);
            assert_eq!(ka, kb);
            a = na;
            b = nb;
        }
    }

    #[test]
    fn first_draw_matches_random_index() {
        for millis in [0u32, 1, 499, 999] {
            let (kind, _) = PieceSelector::new(millis).draw(1);
            assert_eq!(kind.index(), random_index(millis, 1));
        }
    }

    #[test]
    fn offsets_decorrelate_draws_in_the_same_millisecond() {
        let differing = (0..1000u32)
            .filter(|&m| random_index(m, 0) != random_index(m, 1))
            .count();
        assert!(differing >= 950, "only {} of 1000 differed", differing);
    }

    #[test]
    fn sequence_uses_every_shape() {
        let mut sel = PieceSelector::new(7);
        let mut seen = [false; CATALOG_LEN];
        for _ in 0..200 {
            let (kind, next) = sel.draw(0);
            seen[kind.index()] = true;
            sel = next;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn wall_clock_millis_is_a_fraction_of_a_second() {
        assert!(wall_clock_millis() < 1000);
    }
}
