//! Random number generation for dungeon generation
//!
//! Uses a seeded ChaCha RNG so the same seed produces the same dungeon on
//! every platform. Each generation call owns its own `DungeonRng`; nothing is
//! drawn from shared global state.

use core::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stride used when deriving per-chunk numeric seeds.
const DERIVE_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// A generation seed, either numeric or textual.
///
/// Serialized untagged so both `"seed": 42` and `"seed": "abc"` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(u64),
    Text(String),
}

impl Seed {
    /// Fold the seed into the 64-bit value the RNG is keyed with.
    ///
    /// Text seeds are hashed with FNV-1a, which is stable across platforms and
    /// compiler versions (unlike `std`'s `DefaultHasher`).
    pub fn to_u64(&self) -> u64 {
        match self {
            Seed::Number(n) => *n,
            Seed::Text(s) => s.bytes().fold(FNV_OFFSET, |hash, byte| {
                (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
            }),
        }
    }

    /// Derive the seed of the `index`-th chunk of a chain started from `self`.
    pub fn derive(&self, index: u64) -> Seed {
        match self {
            Seed::Number(n) => Seed::Number(n.wrapping_add(index.wrapping_mul(DERIVE_STRIDE))),
            Seed::Text(s) => Seed::Text(format!("{s}/{index}")),
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Text("IRQKIJRx1aTTgDnnvsI5y".to_string())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Number(n) => write!(f, "{n}"),
            Seed::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Number(n)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Text(s)
    }
}

/// Dungeon random number generator
///
/// Wraps ChaCha8Rng for reproducible generation.
#[derive(Debug, Clone)]
pub struct DungeonRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl DungeonRng {
    /// Create a new RNG keyed by the given seed
    pub fn new(seed: &Seed) -> Self {
        Self::from_u64(seed.to_u64())
    }

    /// Create a new RNG from a raw 64-bit key
    pub fn from_u64(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Get the 64-bit key this RNG was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[low, high)`.
    ///
    /// Returns `low` when the range is empty.
    pub fn range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..high)
    }

    /// Uniform index in `0..len`. Returns 0 if `len` is 0.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.index(items.len())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        let mut rng = DungeonRng::from_u64(42);
        for _ in 0..1000 {
            let n = rng.range(1, 10);
            assert!((1..10).contains(&n));
        }
    }

    #[test]
    fn test_empty_range() {
        let mut rng = DungeonRng::from_u64(42);
        assert_eq!(rng.range(5, 5), 5);
        assert_eq!(rng.range(5, 2), 5);
        assert_eq!(rng.index(0), 0);
        assert!(rng.choose::<u8>(&[]).is_none());
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = DungeonRng::new(&Seed::from("test-1"));
        let mut rng2 = DungeonRng::new(&Seed::from("test-1"));

        for _ in 0..100 {
            assert_eq!(rng1.range(0, 100), rng2.range(0, 100));
        }
    }

    #[test]
    fn test_text_seed_hash_is_stable() {
        // FNV-1a of the empty string is the offset basis
        assert_eq!(Seed::from("").to_u64(), FNV_OFFSET);
        assert_eq!(Seed::from("a").to_u64(), 0xaf63_dc4c_8601_ec8c);
        assert_ne!(Seed::from("test-1").to_u64(), Seed::from("test-2").to_u64());
    }

    #[test]
    fn test_derive_is_distinct_and_stable() {
        let base = Seed::from("chain");
        assert_eq!(base.derive(1), Seed::from("chain/1"));
        assert_ne!(base.derive(1), base.derive(2));

        let numeric = Seed::from(7u64);
        assert_eq!(numeric.derive(0), Seed::from(7u64));
        assert_ne!(numeric.derive(1), numeric);
    }

    #[test]
    fn test_seed_serde_untagged() {
        let n: Seed = serde_json::from_str("42").unwrap();
        assert_eq!(n, Seed::Number(42));
        let s: Seed = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(s, Seed::Text("abc".to_string()));
    }
}
