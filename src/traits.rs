//! Core traits for stream analytics collectors
//!
//! Every accumulating structure implements the base [`StreamCollector`] trait,
//! with a specialized trait for quantile estimation. Batching strategies feed
//! collectors through these seams, so a strategy never depends on a concrete
//! accumulator type.

use core::fmt::Debug;

use crate::error::Result;
use crate::quantiles::Quartiles;

/// Core trait for everything that accumulates stream observations
///
/// Collectors are created empty at the start of one analysis run, mutated only
/// during ingestion, and either returned to the caller or discarded at the end.
/// `merge` combines two partial collectors built over disjoint slices of a
/// stream; for exact structures it is commutative and associative, so merge
/// order never affects the final result.
pub trait StreamCollector: Clone + Debug {
    /// The type of observation this collector processes
    type Item;

    /// Ingest a single observation
    fn observe(&mut self, value: Self::Item);

    /// Ingest a slice of observations
    fn observe_batch(&mut self, values: &[Self::Item])
    where
        Self::Item: Clone,
    {
        for value in values {
            self.observe(value.clone());
        }
    }

    /// Fold another collector built over a disjoint slice into this one
    fn merge(&mut self, other: &Self);

    /// Reset to the empty state
    fn clear(&mut self);

    /// Number of observations ingested
    fn len(&self) -> u64;

    /// Check if nothing has been ingested yet
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Quantile estimation over everything observed so far
///
/// Implementations differ in how much ordering information they keep; see the
/// policies in [`crate::quantiles`]. None of them touch the frequency table.
pub trait QuantileEstimator: StreamCollector
where
    Self::Item: Ord + Clone,
{
    /// Value at the given percentile (0.0 to 1.0) of everything observed
    ///
    /// Fails with [`Error::EmptyInput`](crate::Error::EmptyInput) when nothing
    /// has been observed, and with
    /// [`Error::PercentileOutOfRange`](crate::Error::PercentileOutOfRange) for
    /// percentiles outside the closed range.
    fn estimate(&self, percentile: f64) -> Result<Self::Item>;

    /// The 25th/50th/75th percentile markers in one call
    fn quartiles(&self) -> Result<Quartiles<Self::Item>> {
        Ok(Quartiles {
            p25: self.estimate(0.25)?,
            p50: self.estimate(0.5)?,
            p75: self.estimate(0.75)?,
        })
    }
}
