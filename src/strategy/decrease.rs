//! Decrease-and-conquer strategy: fixed-size samples, reduced to medians

use crate::error::Result;
use crate::strategy::{slice_median, AnalyzerConfig, Run, RunReport, Strategy};
use core::fmt::Debug;
use core::hash::Hash;

/// Sampled pass with slice size `sample_size`
///
/// Shrinks the working set before solving: each sample of the stream is
/// reduced to one representative order statistic (its median) for quantile
/// estimation, while its items are recorded straight into the running
/// frequency table, with no per-sample table or merge step. Final quantiles are
/// computed over the collection of sample medians, like the batched pass.
///
/// Heavy hitters are judged against the running global counts, not counts
/// local to one sample, so the reported set always agrees with the other
/// strategies for the same input. (A sample-local reading would flag values
/// that are frequent within one sample but rare overall, and miss values
/// spread thinly across many samples.)
///
/// # Example
///
/// ```
/// use streamstats::strategy::{AnalyzerConfig, DecreaseAndConquer, Strategy};
///
/// let config = AnalyzerConfig::new(3).with_sample_size(2);
/// let report = DecreaseAndConquer.run([5u32, 5, 5, 2, 2, 9], &config).unwrap();
///
/// assert_eq!(report.heavy_hitters, [5].into_iter().collect());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DecreaseAndConquer;

impl Strategy for DecreaseAndConquer {
    fn name(&self) -> &'static str {
        "decrease-and-conquer"
    }

    fn run<T, I>(&self, stream: I, config: &AnalyzerConfig) -> Result<RunReport<T>>
    where
        T: Ord + Hash + Clone + Debug,
        I: IntoIterator<Item = T>,
    {
        let mut run = Run::new(config)?;
        run.start();

        let mut sample: Vec<T> = Vec::with_capacity(config.sample_size);
        for value in stream {
            sample.push(value);
            if sample.len() == config.sample_size {
                reduce(&mut run, &mut sample);
            }
        }
        if !sample.is_empty() {
            reduce(&mut run, &mut sample);
        }

        run.finish(self.name())
    }
}

/// Reduce one completed sample to its median and record its items.
fn reduce<T: Ord + Hash + Clone + Debug>(run: &mut Run<T>, sample: &mut Vec<T>) {
    let median = slice_median(sample);
    for value in sample.drain(..) {
        run.record_only(value);
    }
    run.observe_marker(median);
}
