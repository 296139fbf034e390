//! Heap-based approximate quantile estimation
//!
//! Keeps a min-heap reservoir of the upper half of the stream. Percentile
//! reads are answered against the retained contents only, so they are
//! approximate and sensitive to how observations arrived. This is an accepted
//! accuracy/performance trade-off, not a defect to correct. Use
//! [`SortedEstimator`](crate::quantiles::SortedEstimator) when exact answers
//! over the full buffer are required.

use crate::error::Result;
use crate::quantiles::percentile_index;
use crate::traits::{QuantileEstimator, StreamCollector};
use core::cmp::Reverse;
use core::fmt::Debug;
use std::collections::BinaryHeap;

/// Approximate quantile estimator backed by a min-heap reservoir
///
/// Every observation is pushed into a min-heap; after each push the heap is
/// trimmed back to `max(1, observed / 2)` elements by popping the minimum, so
/// it retains the largest ~half of everything seen. The median is then
/// approximated by the low end of the retained contents: queries sort the
/// retained values and index them like the sort-based policy does.
///
/// Because the heap preserves only a partial order and discards the lower half
/// of the stream, low percentiles refer to ranks within the reservoir, not the
/// full stream, and answers after incremental merges can differ from the
/// sort-based policy on the same data.
///
/// # Example
///
/// ```
/// use streamstats::quantiles::HeapEstimator;
/// use streamstats::traits::{QuantileEstimator, StreamCollector};
///
/// let mut est = HeapEstimator::new();
/// est.observe_batch(&[5, 5, 5, 2, 2, 9]);
///
/// // three of six observations retained; the middle one tracks the median
/// assert_eq!(est.estimate(0.5).unwrap(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct HeapEstimator<T: Ord + Clone + Debug> {
    heap: BinaryHeap<Reverse<T>>,
    observed: u64,
}

impl<T: Ord + Clone + Debug> HeapEstimator<T> {
    /// Create an empty estimator
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            observed: 0,
        }
    }

    /// Number of values currently retained in the reservoir
    pub fn retained(&self) -> usize {
        self.heap.len()
    }

    /// How many values the reservoir may hold given the observation count
    fn retain_target(&self) -> usize {
        ((self.observed / 2).max(1)) as usize
    }

    /// Pop minima until the reservoir is back within its target size
    fn trim(&mut self) {
        let target = self.retain_target();
        while self.heap.len() > target {
            self.heap.pop();
        }
    }

    /// Retained contents in ascending order
    fn sorted_contents(&self) -> Vec<T> {
        let mut values: Vec<T> = self.heap.iter().map(|r| r.0.clone()).collect();
        values.sort_unstable();
        values
    }
}

impl<T: Ord + Clone + Debug> Default for HeapEstimator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone + Debug> StreamCollector for HeapEstimator<T> {
    type Item = T;

    fn observe(&mut self, value: T) {
        self.observed += 1;
        self.heap.push(Reverse(value));
        self.trim();
    }

    fn merge(&mut self, other: &Self) {
        self.observed += other.observed;
        self.heap.extend(other.heap.iter().cloned());
        self.trim();
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.observed = 0;
    }

    fn len(&self) -> u64 {
        self.observed
    }
}

impl<T: Ord + Clone + Debug> QuantileEstimator for HeapEstimator<T> {
    fn estimate(&self, percentile: f64) -> Result<T> {
        let values = self.sorted_contents();
        let index = percentile_index(percentile, values.len())?;
        Ok(values[index].clone())
    }
}
