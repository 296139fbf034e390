//! Batching strategies: how the stream is sliced and aggregated
//!
//! A strategy decides the unit of work submitted to the collectors and
//! whether aggregation happens as-you-go or at the end:
//!
//! - [`Greedy`]: unit = 1 element; everything is updated per observation,
//!   giving the earliest heavy-hitter signals at the highest per-element cost
//! - [`DivideAndConquer`]: unit = a contiguous batch; each batch is counted
//!   as an independent sub-problem, merged into the running table, and
//!   contributes its median to the quantile estimate
//! - [`DecreaseAndConquer`]: unit = a fixed-size sample; items are counted
//!   directly while each sample contributes one representative order
//!   statistic
//!
//! The batched strategies estimate quantiles over the collection of per-slice
//! medians, not the raw stream, a deliberate median-of-medians style
//! approximation that keeps every slice independently processable. Frequency
//! counts are exact under every strategy: slicing never changes them.
//!
//! # Example
//!
//! ```
//! use streamstats::strategy::{AnalyzerConfig, Greedy, Strategy};
//!
//! let config = AnalyzerConfig::new(3);
//! let report = Greedy.run([5u32, 5, 5, 2, 2, 9], &config).unwrap();
//!
//! assert_eq!(report.frequency.count_of(&5), 3);
//! assert_eq!(report.quantiles.p50, 5);
//! assert!(report.heavy_hitters.contains(&5));
//! ```

mod decrease;
mod divide;
mod greedy;
mod run;

pub use decrease::DecreaseAndConquer;
pub use divide::DivideAndConquer;
pub use greedy::Greedy;
pub use run::RunPhase;

pub(crate) use run::Run;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::quantiles::{QuantilePolicy, Quartiles};
use core::fmt::Debug;
use core::hash::Hash;
use std::collections::HashSet;
use std::time::Duration;

/// Configuration for one analysis run
///
/// Passed explicitly into every run; no process-wide state survives between
/// runs. Callers that want sizes proportional to the stream length can use
/// [`for_stream_len`](Self::for_stream_len); the core never derives them
/// itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AnalyzerConfig {
    /// Occurrence count at which a value becomes a heavy hitter
    pub threshold: u64,
    /// Slice size for [`DivideAndConquer`]
    pub batch_size: usize,
    /// Slice size for [`DecreaseAndConquer`]
    pub sample_size: usize,
    /// Which quantile estimator the run uses
    pub quantile_policy: QuantilePolicy,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            threshold: 5,
            batch_size: 1000,
            sample_size: 1000,
            quantile_policy: QuantilePolicy::Sorted,
        }
    }
}

impl AnalyzerConfig {
    /// Config with the given heavy-hitter threshold and default slice sizes
    pub fn new(threshold: u64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Derive sizes from a known stream length: threshold at 5% of `len`,
    /// batch and sample at 10%, each floored at 1
    pub fn for_stream_len(len: usize) -> Self {
        Self {
            threshold: (len / 20).max(1) as u64,
            batch_size: (len / 10).max(1),
            sample_size: (len / 10).max(1),
            quantile_policy: QuantilePolicy::Sorted,
        }
    }

    /// Replace the quantile policy
    pub fn with_quantile_policy(mut self, policy: QuantilePolicy) -> Self {
        self.quantile_policy = policy;
        self
    }

    /// Replace the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Replace the sample size
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Reject unusable field values
    ///
    /// Zero batch or sample sizes cannot slice a stream. A zero threshold is
    /// allowed (it flags every recorded value), and negative thresholds are
    /// unrepresentable.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig {
                field: "batch_size",
                expected: "positive",
                got: 0,
            });
        }
        if self.sample_size == 0 {
            return Err(Error::InvalidConfig {
                field: "sample_size",
                expected: "positive",
                got: 0,
            });
        }
        Ok(())
    }
}

/// Everything one run produces
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunReport<T: Hash + Eq> {
    /// Name of the strategy that produced this report
    pub strategy: &'static str,
    /// Exact per-value occurrence counts
    pub frequency: FrequencyTable<T>,
    /// 25th/50th/75th percentile markers
    pub quantiles: Quartiles<T>,
    /// Values whose count met or exceeded the threshold
    pub heavy_hitters: HashSet<T>,
    /// Number of observations consumed
    pub observations: u64,
    /// Wall-clock time from first observation to finished artifacts
    pub elapsed: Duration,
}

/// A batching strategy: slices the stream and drives the collectors
///
/// All strategies consume the stream exactly once, produce identical
/// frequency counts and heavy-hitter sets for identical input, and differ in
/// quantile accuracy and latency characteristics.
pub trait Strategy {
    /// Human-readable strategy name, stamped into reports
    fn name(&self) -> &'static str;

    /// Run the full analysis over a finite stream
    ///
    /// Fails with [`Error::InvalidConfig`] before consuming anything, and
    /// with [`Error::EmptyInput`] for an empty stream, never with partial
    /// artifacts.
    fn run<T, I>(&self, stream: I, config: &AnalyzerConfig) -> Result<RunReport<T>>
    where
        T: Ord + Hash + Clone + Debug,
        I: IntoIterator<Item = T>;
}

/// Median of a slice: sort a copy, take index `len / 2`
pub(crate) fn slice_median<T: Ord + Clone>(values: &[T]) -> T {
    debug_assert!(!values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted[sorted.len() / 2].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyzerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = AnalyzerConfig::new(3).with_batch_size(0);
        assert_eq!(
            config.validate().unwrap_err(),
            Error::InvalidConfig {
                field: "batch_size",
                expected: "positive",
                got: 0,
            }
        );
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let config = AnalyzerConfig::new(3).with_sample_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_for_stream_len_scaling() {
        let config = AnalyzerConfig::for_stream_len(10_000);
        assert_eq!(config.threshold, 500);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.sample_size, 1000);
    }

    #[test]
    fn test_for_stream_len_floors_at_one() {
        let config = AnalyzerConfig::for_stream_len(3);
        assert_eq!(config.threshold, 1);
        assert_eq!(config.batch_size, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_slice_median() {
        assert_eq!(slice_median(&[2, 2, 5, 5, 5, 9]), 5);
        assert_eq!(slice_median(&[9, 1]), 9); // index len/2 = 1
        assert_eq!(slice_median(&[7]), 7);
    }
}
