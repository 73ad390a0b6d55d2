use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Randomness used by the bucket draw.
///
/// Implementations must return an index below `len`; `len` is never zero.
pub trait DrawSource {
    fn shuffle(&mut self, names: &mut [String]);
    fn choose_index(&mut self, len: usize) -> usize;
}

/// [`DrawSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Fresh OS-seeded source; every run differs.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible source for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DrawSource for RngSource<R> {
    fn shuffle(&mut self, names: &mut [String]) {
        names.shuffle(&mut self.rng);
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_agree() {
        let mut a = RngSource::seeded(7);
        let mut b = RngSource::seeded(7);
        let mut left: Vec<String> = (0..8).map(|i| format!("p{i}")).collect();
        let mut right = left.clone();
        a.shuffle(&mut left);
        b.shuffle(&mut right);
        assert_eq!(left, right);
        for len in 1..20 {
            let i = a.choose_index(len);
            assert_eq!(i, b.choose_index(len));
            assert!(i < len);
        }
    }
}
