//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible contests and generations.
//! Uses xorshift64* and plugs into `rand` through `RngCore`, so shuffles
//! and weighted draws come from the same stream as injury rolls.

use rand::{RngCore, SeedableRng};

/// Replacement state for seeds that mix down to zero (a fixed point of xorshift)
const NONZERO_STATE: u64 = 0x853c_49e6_748f_ea9b;

/// Seeded random number generator
///
/// Deterministic: same seed + stream = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 32-byte seed and stream index
    pub fn new(seed: &[u8; 32], stream: u32) -> Self {
        let mut state = 0u64;
        for (i, chunk) in seed.chunks(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes[..chunk.len()].copy_from_slice(chunk);
            state ^= u64::from_le_bytes(bytes).wrapping_add(i as u64);
        }

        state ^= (stream as u64).wrapping_mul(0x517c_c1b7_2722_0a95);
        if state == 0 {
            state = NONZERO_STATE;
        }

        // Warm up the generator
        let mut rng = Self { state };
        for _ in 0..8 {
            rng.step();
        }

        rng
    }

    fn step(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform value in [0, 1) built from the top 53 bits
    pub fn next_f64(&mut self) -> f64 {
        (self.step() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Bernoulli trial: consumes exactly one draw, true with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 32];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(&seed, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_determinism() {
        let seed = [42u8; 32];
        let mut r1 = SeededRng::new(&seed, 0);
        let mut r2 = SeededRng::new(&seed, 0);

        for _ in 0..100 {
            assert_eq!(r1.next_u64(), r2.next_u64());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SeededRng::new(&[1u8; 32], 0);
        let mut rng2 = SeededRng::new(&[2u8; 32], 0);

        let vals1: Vec<_> = (0..10).map(|_| rng1.next_u64()).collect();
        let vals2: Vec<_> = (0..10).map(|_| rng2.next_u64()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_different_streams() {
        let seed = [42u8; 32];
        let mut rng1 = SeededRng::new(&seed, 0);
        let mut rng2 = SeededRng::new(&seed, 1);

        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_zero_seed_still_moves() {
        let mut rng = SeededRng::new(&[0u8; 32], 0);
        let vals: Vec<_> = (0..4).map(|_| rng.next_u64()).collect();
        assert!(vals.iter().any(|v| *v != 0));
        assert_ne!(vals[0], vals[1]);
    }

    #[test]
    fn test_seed_from_u64_determinism() {
        let mut r1 = SeededRng::seed_from_u64(7);
        let mut r2 = SeededRng::seed_from_u64(7);
        let mut r3 = SeededRng::seed_from_u64(8);

        let a: Vec<_> = (0..8).map(|_| r1.next_u32()).collect();
        let b: Vec<_> = (0..8).map(|_| r2.next_u32()).collect();
        let c: Vec<_> = (0..8).map(|_| r3.next_u32()).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unit_interval() {
        let mut rng = SeededRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x), "next_f64 returned {}", x);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = SeededRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_chance_frequency() {
        let mut rng = SeededRng::seed_from_u64(11);
        let hits = (0..100_000).filter(|_| rng.chance(0.1)).count();
        let rate = hits as f64 / 100_000.0;
        assert!((rate - 0.1).abs() < 0.005, "rate {} not ~0.1", rate);
    }

    #[test]
    fn test_fill_bytes_partial_chunk() {
        let mut r1 = SeededRng::seed_from_u64(5);
        let mut r2 = SeededRng::seed_from_u64(5);
        let mut buf = [0u8; 13];
        r1.fill_bytes(&mut buf);

        let first = r2.next_u64().to_le_bytes();
        let second = r2.next_u64().to_le_bytes();
        assert_eq!(&buf[..8], &first[..]);
        assert_eq!(&buf[8..], &second[..5]);
    }

    #[test]
    fn test_works_as_rand_rng() {
        let mut rng = SeededRng::seed_from_u64(9);
        for max in [1usize, 10, 100, 1000] {
            for _ in 0..100 {
                let val = rng.random_range(0..max);
                assert!(val < max, "random_range(0..{}) returned {}", max, val);
            }
        }
    }
}
