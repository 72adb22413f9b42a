use std::ops::{Index, AddAssign};

/// Discrete probability mass over `N` buckets. Mass is unnormalized until `normalized()` is called.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution<const N: usize> {
    buckets: [f64; N],
}

impl<const N: usize> Default for Distribution<N> {
    fn default() -> Self {
        Self { buckets: [0.0; N] }
    }
}

impl<const N: usize> Distribution<N> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_buckets(buckets: [f64; N]) -> Self {
        Self { buckets }
    }

    /// Route `mass` into the `bucket`-th cell.
    #[inline]
    pub fn add(&mut self, bucket: usize, mass: f64) {
        self.buckets[bucket] += mass;
    }

    #[inline]
    #[must_use]
    pub fn get(&self, bucket: usize) -> f64 {
        self.buckets[bucket]
    }

    #[must_use]
    pub fn buckets(&self) -> &[f64; N] {
        &self.buckets
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.buckets.iter().sum()
    }

    /// Add every bucket of `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        self.buckets.iter_mut()
            .zip(other.buckets.iter())
            .for_each(|(mass, other)| *mass += other);
    }

    /// Returns a copy of this distribution, where every bucket is divided by the total mass. Returns `None` if the
    /// total mass is zero, or not a finite number. `self` is left untouched.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let total = self.total();
        if total == 0.0 || !total.is_finite() {
            return None
        }
        Some(Self { buckets: self.buckets.map(|mass| mass / total) })
    }
}

impl<const N: usize> Index<usize> for Distribution<N> {
    type Output = f64;
    fn index(&self, bucket: usize) -> &Self::Output {
        &self.buckets[bucket]
    }
}

impl<const N: usize> AddAssign<&Distribution<N>> for Distribution<N> {
    fn add_assign(&mut self, other: &Distribution<N>) {
        self.merge(other);
    }
}
