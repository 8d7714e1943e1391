//! Keyed placement order for pixel sites.
//!
//! Payload bits are scattered over the image in an order that is fully
//! determined by the key. The order is a Fisher-Yates shuffle of all site
//! indices, drawn lazily: only as many sites as are consumed get shuffled, and
//! a site can never be returned twice.

use std::collections::HashMap;

use fastrand::Rng;

/// Lazily drawn pseudo random permutation of `0..length`.
///
/// Two permutations with the same key and length yield the same sequence,
/// which lets the decoder walk the exact sites the encoder has written.
#[derive(Debug, Clone)]
pub struct Permutation {
    rng: Rng,
    /// Next position of the shuffle, everything below is already drawn.
    position: usize,
    length: usize,
    /// Sparse view of the shuffled index array, untouched slots hold their own index.
    swapped: HashMap<usize, usize>,
}

impl Permutation {
    /// Create a permutation over `0..length` seeded by the given key.
    pub fn from_key(key: &str, length: usize) -> Self {
        Self::from_seed(key.as_bytes(), length)
    }

    /// Create a permutation over `0..length` seeded by raw seed bytes.
    pub fn from_seed(seed: &[u8], length: usize) -> Self {
        Self {
            rng: Rng::with_seed(hash_seed(seed)),
            position: 0,
            length,
            swapped: HashMap::new(),
        }
    }

    fn slot(&self, i: usize) -> usize {
        self.swapped.get(&i).copied().unwrap_or(i)
    }
}

impl Iterator for Permutation {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.length {
            return None;
        }
        let j = self.rng.usize(self.position..self.length);
        let drawn = self.slot(j);
        let current = self.slot(self.position);
        self.swapped.insert(j, current);
        self.swapped.remove(&self.position);
        self.position += 1;

        Some(drawn)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.length - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Permutation {}

/// Hash seed bytes to u64 for RNG seeding.
///
/// FNV-1a, stable across platforms and releases.
fn hash_seed(seed: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    seed.iter().fold(FNV_OFFSET, |hash, &byte| {
        (hash ^ (byte as u64)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_deterministic() {
        let p1: Vec<usize> = Permutation::from_key("test_seed", 100).collect();
        let p2: Vec<usize> = Permutation::from_key("test_seed", 100).collect();

        assert_eq!(p1, p2);
    }

    #[test]
    fn test_permutation_different_keys() {
        let p1 = Permutation::from_key("seed_a", 100);
        let p2 = Permutation::from_key("seed_b", 100);

        let differences = p1.zip(p2).filter(|(a, b)| a != b).count();
        assert!(
            differences > 50,
            "Only {} differences, expected > 50",
            differences
        );
    }

    #[test]
    fn test_permutation_visits_every_site_once() {
        let mut seen = vec![false; 1000];
        for site in Permutation::from_key("", 1000) {
            assert!(!seen[site], "Duplicate site {}", site);
            seen[site] = true;
        }

        assert!(seen.iter().all(|&x| x), "Not all sites covered");
    }

    #[test]
    fn test_prefix_does_not_depend_on_how_far_it_is_read() {
        let head: Vec<usize> = Permutation::from_key("k", 500).take(16).collect();
        let full: Vec<usize> = Permutation::from_key("k", 500).collect();

        assert_eq!(head, full[..16]);
    }

    #[test]
    fn test_exact_size() {
        let mut p = Permutation::from_key("k", 10);
        assert_eq!(p.len(), 10);
        p.next();
        assert_eq!(p.len(), 9);
    }

    #[test]
    fn test_empty_permutation() {
        let mut p = Permutation::from_key("test", 0);
        assert_eq!(p.len(), 0);
        assert_eq!(p.next(), None);
    }

    #[test]
    fn test_hash_seed_deterministic() {
        assert_eq!(hash_seed(b"test"), hash_seed(b"test"));
        assert_ne!(hash_seed(b"test1"), hash_seed(b"test2"));
        assert_ne!(hash_seed(b""), 0);
    }
}
