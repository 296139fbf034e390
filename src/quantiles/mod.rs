//! Quantile estimation policies
//!
//! Two interchangeable policies answer "what value sits at percentile p",
//! selected per run through [`QuantilePolicy`]:
//!
//! - [`SortedEstimator`]: buffer everything, sort once on demand; exact for
//!   the buffer's final contents
//! - [`HeapEstimator`]: min-heap reservoir trimmed to the upper half of the
//!   stream; approximate, cheaper to maintain
//!
//! The two policies deliberately do NOT promise identical answers: the heap
//! keeps only a partial order and drops the lower half of what it sees, which
//! is an accuracy/performance trade-off a caller opts into.
//!
//! # Example
//!
//! ```
//! use streamstats::quantiles::SortedEstimator;
//! use streamstats::traits::{QuantileEstimator, StreamCollector};
//!
//! let mut est = SortedEstimator::new();
//! for value in [2, 2, 5, 5, 5, 9] {
//!     est.observe(value);
//! }
//!
//! assert_eq!(est.estimate(0.5).unwrap(), 5);
//! ```

mod heap;
mod sorted;

pub use heap::HeapEstimator;
pub use sorted::SortedEstimator;

use crate::error::{Error, Result};
use crate::traits::{QuantileEstimator, StreamCollector};
use core::fmt::Debug;

/// Which quantile estimation policy a run uses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum QuantilePolicy {
    /// Buffer all observations, sort on demand (exact)
    #[default]
    Sorted,
    /// Min-heap reservoir of the upper half (approximate)
    Heap,
}

/// The 25th/50th/75th percentile markers of one run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Quartiles<T> {
    /// Value at the 25th percentile
    pub p25: T,
    /// Value at the 50th percentile (median)
    pub p50: T,
    /// Value at the 75th percentile
    pub p75: T,
}

/// Map a percentile to a buffer index: `floor(p * len)` clamped to `len - 1`
///
/// The clamp keeps `p = 1.0` in range. An empty buffer and a percentile
/// outside [0, 1] are reported as caller errors.
pub(crate) fn percentile_index(percentile: f64, len: usize) -> Result<usize> {
    if !(0.0..=1.0).contains(&percentile) {
        return Err(Error::PercentileOutOfRange(percentile));
    }
    if len == 0 {
        return Err(Error::EmptyInput);
    }
    Ok(((percentile * len as f64).floor() as usize).min(len - 1))
}

/// Runtime-selected quantile estimator
///
/// Strategies hold one of these, constructed from the run's
/// [`QuantilePolicy`], and feed it whatever the strategy deems observable:
/// raw values for the greedy pass, per-batch medians for the batched passes.
#[derive(Clone, Debug)]
pub enum Estimator<T: Ord + Clone + Debug> {
    /// Sort-based policy
    Sorted(SortedEstimator<T>),
    /// Heap-based policy
    Heap(HeapEstimator<T>),
}

impl<T: Ord + Clone + Debug> Estimator<T> {
    /// Create an empty estimator for the given policy
    pub fn for_policy(policy: QuantilePolicy) -> Self {
        match policy {
            QuantilePolicy::Sorted => Self::Sorted(SortedEstimator::new()),
            QuantilePolicy::Heap => Self::Heap(HeapEstimator::new()),
        }
    }

    /// The policy this estimator was built for
    pub fn policy(&self) -> QuantilePolicy {
        match self {
            Self::Sorted(_) => QuantilePolicy::Sorted,
            Self::Heap(_) => QuantilePolicy::Heap,
        }
    }
}

impl<T: Ord + Clone + Debug> StreamCollector for Estimator<T> {
    type Item = T;

    fn observe(&mut self, value: T) {
        match self {
            Self::Sorted(est) => est.observe(value),
            Self::Heap(est) => est.observe(value),
        }
    }

    /// Merge two estimators built with the same policy.
    ///
    /// # Panics
    ///
    /// Panics if the policies differ; partial results of one run always share
    /// a policy, so a mismatch is a caller bug, not a data condition.
    fn merge(&mut self, other: &Self) {
        match (self, other) {
            (Self::Sorted(a), Self::Sorted(b)) => a.merge(b),
            (Self::Heap(a), Self::Heap(b)) => a.merge(b),
            (a, b) => panic!(
                "cannot merge estimators with different policies: {:?} vs {:?}",
                a.policy(),
                b.policy()
            ),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Sorted(est) => est.clear(),
            Self::Heap(est) => est.clear(),
        }
    }

    fn len(&self) -> u64 {
        match self {
            Self::Sorted(est) => est.len(),
            Self::Heap(est) => est.len(),
        }
    }
}

impl<T: Ord + Clone + Debug> QuantileEstimator for Estimator<T> {
    fn estimate(&self, percentile: f64) -> Result<T> {
        match self {
            Self::Sorted(est) => est.estimate(percentile),
            Self::Heap(est) => est.estimate(percentile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_index() {
        assert_eq!(percentile_index(0.0, 6).unwrap(), 0);
        assert_eq!(percentile_index(0.5, 6).unwrap(), 3);
        assert_eq!(percentile_index(1.0, 6).unwrap(), 5); // clamped
        assert_eq!(percentile_index(0.5, 0), Err(Error::EmptyInput));
        assert_eq!(
            percentile_index(1.01, 6),
            Err(Error::PercentileOutOfRange(1.01))
        );
    }

    #[test]
    fn test_for_policy() {
        let sorted = Estimator::<i32>::for_policy(QuantilePolicy::Sorted);
        let heap = Estimator::<i32>::for_policy(QuantilePolicy::Heap);

        assert_eq!(sorted.policy(), QuantilePolicy::Sorted);
        assert_eq!(heap.policy(), QuantilePolicy::Heap);
    }

    #[test]
    fn test_dispatch() {
        let mut est = Estimator::for_policy(QuantilePolicy::Sorted);
        est.observe_batch(&[3, 1, 2]);

        assert_eq!(est.len(), 3);
        assert_eq!(est.estimate(0.0).unwrap(), 1);
        assert_eq!(est.estimate(1.0).unwrap(), 3);
    }

    #[test]
    #[should_panic(expected = "cannot merge estimators with different policies")]
    fn test_mixed_policy_merge_panics() {
        let mut sorted = Estimator::<i32>::for_policy(QuantilePolicy::Sorted);
        let heap = Estimator::<i32>::for_policy(QuantilePolicy::Heap);
        sorted.merge(&heap);
    }
}
