//! Greedy (online) strategy: one element at a time

use crate::error::Result;
use crate::strategy::{AnalyzerConfig, Run, RunReport, Strategy};
use core::fmt::Debug;
use core::hash::Hash;

/// Online pass with slice size 1
///
/// Every observation is immediately recorded into the frequency table, fed to
/// the quantile estimator, and checked against the heavy-hitter threshold.
/// O(1) amortized work per observation and the lowest latency to the first
/// crossing event, at the price of paying full per-element overhead with no
/// batching amortization.
///
/// # Example
///
/// ```
/// use streamstats::strategy::{AnalyzerConfig, Greedy, Strategy};
///
/// let report = Greedy.run([5u32, 5, 5, 2, 2, 9], &AnalyzerConfig::new(3)).unwrap();
///
/// assert_eq!(report.heavy_hitters, [5].into_iter().collect());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl Strategy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn run<T, I>(&self, stream: I, config: &AnalyzerConfig) -> Result<RunReport<T>>
    where
        T: Ord + Hash + Clone + Debug,
        I: IntoIterator<Item = T>,
    {
        let mut run = Run::new(config)?;
        run.start();

        for value in stream {
            run.ingest_value(value);
        }

        run.finish(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::quantiles::QuantilePolicy;

    #[test]
    fn test_reference_scenario() {
        let report = Greedy
            .run([5, 5, 5, 2, 2, 9], &AnalyzerConfig::new(3))
            .unwrap();

        assert_eq!(report.strategy, "greedy");
        assert_eq!(report.observations, 6);
        assert_eq!(report.frequency.count_of(&5), 3);
        assert_eq!(report.frequency.count_of(&2), 2);
        assert_eq!(report.frequency.count_of(&9), 1);
        assert_eq!(report.heavy_hitters, [5].into_iter().collect());
        assert_eq!(report.quantiles.p50, 5);
    }

    #[test]
    fn test_empty_stream_fails() {
        let result = Greedy.run(std::iter::empty::<i32>(), &AnalyzerConfig::new(3));
        assert_eq!(result.unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_heap_policy_runs() {
        let config = AnalyzerConfig::new(3).with_quantile_policy(QuantilePolicy::Heap);
        let report = Greedy.run([5, 5, 5, 2, 2, 9], &config).unwrap();

        // frequency and heavy hitters are exact under either policy
        assert_eq!(report.frequency.total(), 6);
        assert_eq!(report.heavy_hitters, [5].into_iter().collect());
    }

    #[test]
    fn test_quantile_boundaries() {
        let report = Greedy
            .run([7, 1, 4, 9, 3, 8, 2], &AnalyzerConfig::new(100))
            .unwrap();

        assert_eq!(report.quantiles.p25, 2);
        assert_eq!(report.quantiles.p50, 4);
        assert_eq!(report.quantiles.p75, 8);
        assert!(report.heavy_hitters.is_empty());
    }
}
