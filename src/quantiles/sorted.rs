//! Sort-based quantile estimation
//!
//! Buffers every observation and sorts on demand. Queries on `&self` sort the
//! internal buffer in place through a `RefCell` instead of cloning it, so
//! repeated reads after an ingestion burst pay for one sort, not many.
//!
//! # Thread Safety
//!
//! `SortedEstimator` is `Send` but **not `Sync`** due to the internal
//! `RefCell`. For concurrent read access, wrap in `Arc<Mutex<_>>`.

use crate::error::Result;
use crate::quantiles::percentile_index;
use crate::traits::{QuantileEstimator, StreamCollector};
use core::cell::RefCell;
use core::fmt::Debug;

/// Buffered values plus a flag telling whether they are currently sorted.
#[derive(Clone, Debug)]
struct SortedInner<T> {
    values: Vec<T>,
    sorted: bool,
}

/// Exact quantile estimator backed by a sort-on-demand buffer
///
/// Given the final buffer contents, answers are deterministic: after sorting,
/// index `i` holds the value of rank `i`, and `estimate(p)` returns the value
/// at index `floor(p * len)`, clamped to the last element so `p = 1.0` stays
/// in range. Equal values are interchangeable, so tie-breaking never affects
/// the returned value.
///
/// # Example
///
/// ```
/// use streamstats::quantiles::SortedEstimator;
/// use streamstats::traits::{QuantileEstimator, StreamCollector};
///
/// let mut est = SortedEstimator::new();
/// est.observe_batch(&[5, 5, 5, 2, 2, 9]);
///
/// assert_eq!(est.estimate(0.0).unwrap(), 2); // minimum
/// assert_eq!(est.estimate(0.5).unwrap(), 5); // median
/// assert_eq!(est.estimate(1.0).unwrap(), 9); // maximum
/// ```
#[derive(Debug)]
pub struct SortedEstimator<T: Ord + Clone + Debug> {
    inner: RefCell<SortedInner<T>>,
}

impl<T: Ord + Clone + Debug> SortedEstimator<T> {
    /// Create an empty estimator
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(SortedInner {
                values: Vec::new(),
                sorted: true,
            }),
        }
    }

    /// Number of buffered observations
    pub fn buffered(&self) -> usize {
        self.inner.borrow().values.len()
    }

    /// Sort the buffer now instead of on the next query
    pub fn sort(&mut self) {
        let inner = self.inner.get_mut();
        if !inner.sorted {
            inner.values.sort_unstable();
            inner.sorted = true;
        }
    }

    /// Sort lazily for `&self` query methods.
    fn ensure_sorted(&self) {
        if self.inner.borrow().sorted {
            return;
        }
        let mut inner = self.inner.borrow_mut();
        inner.values.sort_unstable();
        inner.sorted = true;
    }
}

impl<T: Ord + Clone + Debug> Default for SortedEstimator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone + Debug> Clone for SortedEstimator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: RefCell::new(self.inner.borrow().clone()),
        }
    }
}

impl<T: Ord + Clone + Debug> StreamCollector for SortedEstimator<T> {
    type Item = T;

    fn observe(&mut self, value: T) {
        let inner = self.inner.get_mut();
        inner.values.push(value);
        inner.sorted = false;
    }

    fn merge(&mut self, other: &Self) {
        let other_inner = other.inner.borrow();
        let inner = self.inner.get_mut();
        inner.values.extend(other_inner.values.iter().cloned());
        inner.sorted = false;
    }

    fn clear(&mut self) {
        let inner = self.inner.get_mut();
        inner.values.clear();
        inner.sorted = true;
    }

    fn len(&self) -> u64 {
        self.inner.borrow().values.len() as u64
    }
}

impl<T: Ord + Clone + Debug> QuantileEstimator for SortedEstimator<T> {
    fn estimate(&self, percentile: f64) -> Result<T> {
        let index = percentile_index(percentile, self.buffered())?;
        self.ensure_sorted();
        Ok(self.inner.borrow().values[index].clone())
    }
}
